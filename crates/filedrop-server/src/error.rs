//! Error types for the HTTP boundary.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use filedrop_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// JSON error body: `{"status": "error", "code": ..., "message": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Body is not the expected JSON object.
    #[error("invalid request body: {0}")]
    Json(#[from] JsonRejection),

    /// Malformed multipart body.
    #[error("invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.code(),
            Self::Json(_) => "invalid_json",
            Self::Multipart(_) => "bad_request",
            Self::Io(_) => "io_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(e) => match e {
                StoreError::InvalidInput
                | StoreError::DuplicateUser(_)
                | StoreError::NoFile
                | StoreError::UnsupportedExtension(_)
                | StoreError::MissingParticipants => StatusCode::BAD_REQUEST,
                StoreError::UnknownUser(_) | StoreError::BadPassword => StatusCode::UNAUTHORIZED,
                StoreError::NotFound(_) | StoreError::MissingOnDisk { .. } => StatusCode::NOT_FOUND,
                StoreError::CorruptStore { .. }
                | StoreError::Password(_)
                | StoreError::Serialization(_)
                | StoreError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Json(_) => StatusCode::BAD_REQUEST,
            Self::Multipart(e) => e.status(),
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            status: "error",
            code: self.code().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to initialize state: {0}")]
    Init(#[from] StoreError),

    #[error("failed to start server: {0}")]
    StartupFailed(String),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
