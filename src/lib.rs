//! Blog post REST backend: axum handlers over a PostgreSQL-backed post store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, DatabaseConfig, StoreKind};
pub use error::{AppError, ConfigError, StoreError};
pub use model::{BlogPost, BlogPostInput, DeleteResponse, ErrorResponse};
pub use openapi::ApiDoc;
pub use response::PostOutcome;
pub use routes::{app, common_routes, common_routes_with_ready, post_routes};
pub use service::PostService;
pub use state::AppState;
pub use store::{MemoryPostStore, PgPostStore, PostStore};
