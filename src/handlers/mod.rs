//! HTTP handlers.

pub mod post;
pub use post::*;
