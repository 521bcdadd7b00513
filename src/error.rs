//! Error types for the library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Application error codes reported in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    StoreFailure = 1,
    NoSuchItem = 2,
    NoSuchReader = 3,
    BadValue = 4,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A composite fetch failed part way; reported as one error for the request
    #[error("{context}: {source}")]
    Lookup {
        context: String,
        #[source]
        source: StoreError,
    },

    #[error("Cannot update info of reader {reader_id}: {reason}")]
    ReaderUpdate { reader_id: i32, reason: String },
}

impl AppError {
    /// Wrap a store failure with the request context it happened in
    pub fn lookup(context: impl Into<String>) -> impl FnOnce(StoreError) -> AppError {
        let context = context.into();
        move |source| AppError::Lookup { context, source }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchItem, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::StoreFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Lookup { source, .. } => {
                tracing::error!("{} ({:?})", self, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::StoreFailure,
                    self.to_string(),
                )
            }
            AppError::ReaderUpdate { .. } => {
                (StatusCode::BAD_REQUEST, ErrorCode::NoSuchReader, self.to_string())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
