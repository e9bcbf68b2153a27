//! Blog post handlers. Bodies arrive as raw bytes so the service controls when a
//! malformed payload is rejected relative to the store lookup. Extractor rejections
//! are converted to `AppError` so every failure carries the `{"error": ...}` body.

use crate::error::AppError;
use crate::model::{BlogPost, BlogPostInput, DeleteResponse, ErrorResponse};
use crate::response::PostOutcome;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
};

/// Get all blog posts.
#[utoipa::path(
    get,
    path = "/api/blog-post",
    tag = "blog-post",
    responses(
        (status = 200, description = "List of blog posts", body = Vec<BlogPost>),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    )
)]
pub async fn list_posts(State(state): State<AppState>) -> Result<PostOutcome, AppError> {
    state.posts.list().await
}

/// Get a single blog post by id.
#[utoipa::path(
    get,
    path = "/api/blog-post/{id}",
    tag = "blog-post",
    params(("id" = i64, Path, description = "Blog Post ID")),
    responses(
        (status = 200, description = "The blog post", body = BlogPost),
        (status = 404, description = "Blog post not found", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<PostOutcome, AppError> {
    let Path(id) = id?;
    state.posts.get(&id).await
}

/// Create a new blog post with title, description and body.
#[utoipa::path(
    post,
    path = "/api/blog-post",
    tag = "blog-post",
    request_body = BlogPostInput,
    responses(
        (status = 201, description = "Successfully created blog post", body = BlogPost),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<PostOutcome, AppError> {
    state.posts.create(&body?).await
}

/// Update the title, description and/or body of an existing blog post.
/// Empty or omitted fields keep their stored value.
#[utoipa::path(
    patch,
    path = "/api/blog-post/{id}",
    tag = "blog-post",
    params(("id" = i64, Path, description = "Blog Post ID")),
    request_body = BlogPostInput,
    responses(
        (status = 200, description = "Successfully updated blog post", body = BlogPost),
        (status = 400, description = "Missing id or invalid request body", body = ErrorResponse),
        (status = 404, description = "Blog post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<PostOutcome, AppError> {
    let Path(id) = id?;
    state.posts.update(&id, &body?).await
}

/// Delete a blog post by id.
#[utoipa::path(
    delete,
    path = "/api/blog-post/{id}",
    tag = "blog-post",
    params(("id" = i64, Path, description = "Blog Post ID")),
    responses(
        (status = 200, description = "Blog post deleted", body = DeleteResponse),
        (status = 404, description = "Blog post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<PostOutcome, AppError> {
    let Path(id) = id?;
    state.posts.delete(&id).await
}
