//! OpenAPI document for the blog post API, served as JSON.

use crate::handlers::post as post_handlers;
use crate::model::{BlogPost, BlogPostInput, DeleteResponse, ErrorResponse};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

pub const DOC_PATH: &str = "/swagger/doc.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Post APIs",
        version = "1.0",
        description = "This is a simple CRUD API for blog posts."
    ),
    paths(
        post_handlers::list_posts,
        post_handlers::get_post,
        post_handlers::create_post,
        post_handlers::update_post,
        post_handlers::delete_post,
    ),
    components(schemas(BlogPost, BlogPostInput, DeleteResponse, ErrorResponse)),
    tags((name = "blog-post", description = "Blog post CRUD"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_routes() -> Router {
    Router::new().route(DOC_PATH, get(openapi_json))
}
