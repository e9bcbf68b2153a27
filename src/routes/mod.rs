//! Router assembly.

mod common;
mod post;

pub use common::{common_routes, common_routes_with_ready};
pub use post::post_routes;

use crate::error::AppError;
use crate::openapi::docs_routes;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Full application: blog post API, health/readiness, OpenAPI document.
/// Bodies larger than `body_limit` bytes are rejected with 413 by the body extractor,
/// so the rejection goes through `AppError` like every other failure.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(docs_routes())
        .merge(post_routes(state))
        .fallback(no_route)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
}

async fn no_route() -> AppError {
    AppError::NotFound("Not found")
}
