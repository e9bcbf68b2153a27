//! Blog post service: the request-level logic between handlers and the store.

mod post;
pub use post::*;
