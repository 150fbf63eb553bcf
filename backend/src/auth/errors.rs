//! Custom error types specific to authentication failures.
//!
//! This module defines a comprehensive set of errors that can occur during
//! registration, login, and token validation, and maps them onto the API's
//! response taxonomy.

use thiserror::Error;
use uuid::Uuid;

use crate::errors::ApiError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("account not found")]
    UserNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("referenced shelter {0} does not exist")]
    UnknownShelter(Uuid),
    #[error("failed to issue token: {0}")]
    TokenIssuance(jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),
    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
    #[error("password hashing task aborted")]
    HashingAborted,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(message) => ApiError::Validation(message),
            AuthError::DuplicateEmail => ApiError::DuplicateCredential,
            AuthError::UserNotFound => ApiError::NotFound("account"),
            AuthError::InvalidCredentials => ApiError::InvalidCredential,
            AuthError::UnknownShelter(id) => ApiError::DanglingReference {
                entity: "shelter",
                id,
            },
            AuthError::TokenIssuance(err) => ApiError::Internal(err.to_string()),
            AuthError::InvalidToken(_) => ApiError::Unauthorized,
            AuthError::Hashing(err) => ApiError::Internal(err.to_string()),
            AuthError::HashingAborted => ApiError::Internal("password hashing task aborted".into()),
            AuthError::Database(err) => ApiError::from(err),
        }
    }
}
