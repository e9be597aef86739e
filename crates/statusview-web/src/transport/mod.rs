//! Consumer-facing transports for the status page.
//!
//! `page` serves the server-mounted page as HTML/JSON; `ws` streams a
//! per-session page over WebSocket.

pub mod page;
pub mod ws;
