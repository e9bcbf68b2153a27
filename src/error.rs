//! Typed errors and HTTP mapping.

use crate::model::ErrorResponse;
use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("unknown store kind: {0}")]
    UnknownStore(String),
}

/// Failures reported by a post store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl StoreError {
    /// True when a row came back but could not be mapped into a post.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            StoreError::Db(sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_))
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    /// Request rejected by an extractor before reaching the service.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    /// Store failure. Only `message` reaches the client.
    #[error("{message}")]
    StoreFailure {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn store(message: &'static str, source: StoreError) -> Self {
        AppError::StoreFailure { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Rejected { status, .. } => *status,
            AppError::StoreFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        tracing::warn!(error = %rejection, "request body rejected");
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(error = %rejection, "path rejected");
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            AppError::StoreFailure { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (*message).to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
