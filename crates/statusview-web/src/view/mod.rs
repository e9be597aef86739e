//! StatusView: mounted widgets and the page that composes them.
//!
//! Mounting a widget subscribes it to the endpoint's shared feed; dropping or
//! unmounting it releases the subscription. Widgets on the same endpoint never
//! poll twice.

pub mod page;
pub mod widgets;

pub use page::StatusPage;
pub use widgets::{DatabaseStatusWidget, UpdatedAtWidget};
