//! Shared polling feeds.
//!
//! One feed per endpoint URL, fanned out to any number of subscriptions over
//! a `watch` channel. The feed lives exactly as long as its subscriptions:
//! dropping the last one cancels the poll task, including a fetch in flight.

mod hub;
mod poller;

pub use hub::{FeedHub, Subscription, MIN_INTERVAL};
