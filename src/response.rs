//! Successful operation outcomes and their HTTP representation.

use crate::model::{BlogPost, DeleteResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Result of a successful blog post operation. Failures travel as `AppError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Listed(Vec<BlogPost>),
    Found(BlogPost),
    Created(BlogPost),
    Updated(BlogPost),
    Deleted(DeleteResponse),
}

impl PostOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            PostOutcome::Created(_) => StatusCode::CREATED,
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for PostOutcome {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            PostOutcome::Listed(posts) => (status, Json(posts)).into_response(),
            PostOutcome::Found(post) | PostOutcome::Created(post) | PostOutcome::Updated(post) => {
                (status, Json(post)).into_response()
            }
            PostOutcome::Deleted(resp) => (status, Json(resp)).into_response(),
        }
    }
}
