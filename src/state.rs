//! Shared application state for all routes.

use crate::service::PostService;
use crate::store::PostStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Wire the service to a store built at process start.
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            posts: PostService::new(store),
        }
    }
}
