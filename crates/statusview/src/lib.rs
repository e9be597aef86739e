//! Top-level facade crate for statusview.
//!
//! Re-exports the core model/rendering and the server library so users can
//! depend on a single crate.

pub mod core {
    pub use statusview_core::*;
}

pub mod web {
    pub use statusview_web::*;
}
