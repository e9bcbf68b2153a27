//! Blog post CRUD routes under `/api/blog-post`.

use crate::handlers::post::{create_post, delete_post, get_post, list_posts, update_post};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn post_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/blog-post", get(list_posts).post(create_post))
        .route(
            "/api/blog-post/:id",
            get(get_post).patch(update_post).delete(delete_post),
        )
        .with_state(state)
}
