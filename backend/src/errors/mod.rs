//! Global application error types and handlers.
//!
//! This module defines the error taxonomy used across the entire backend and
//! maps each kind onto an HTTP status plus a stable JSON envelope
//! `{"kind": ..., "message": ...}`. Internal detail never reaches a client:
//! a 500 response always carries the same generic message while the cause is
//! logged server-side.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use homeward_uploads::UploadError;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A request payload failed validation.
    #[error("{0}")]
    Validation(String),
    /// Unique-key violation on registration.
    #[error("email already registered")]
    DuplicateCredential,
    /// A write referenced an entity that does not exist.
    #[error("referenced {entity} {id} does not exist")]
    DanglingReference { entity: &'static str, id: Uuid },
    #[error("only image uploads are accepted")]
    UnsupportedMediaType,
    /// Login with a wrong password.
    #[error("invalid credentials")]
    InvalidCredential,
    /// Uniform guard failure; the cause is never disclosed to the caller.
    #[error("authentication required")]
    Unauthorized,
    /// Authenticated but outside the caller's shelter scope.
    #[error("insufficient permissions for this resource")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Catch-all; the contained detail is logged, never returned.
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable kind for the response envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::DuplicateCredential => "duplicate_credential",
            ApiError::DanglingReference { .. } => "dangling_reference",
            ApiError::UnsupportedMediaType => "unsupported_media_type",
            ApiError::InvalidCredential => "invalid_credential",
            ApiError::Unauthorized => "unauthorized",
            ApiError::Forbidden => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Internal(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::DuplicateCredential
            | ApiError::DanglingReference { .. }
            | ApiError::UnsupportedMediaType => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredential | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(%detail, "request failed");
        }
        let body = json!({ "kind": self.kind(), "message": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::UnsupportedMediaType(_) => ApiError::UnsupportedMediaType,
            UploadError::Io(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Validation(err.to_string())
    }
}
