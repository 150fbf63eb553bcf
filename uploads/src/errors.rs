//! Custom error types specific to the `uploads` crate.
//!
//! This module defines errors that can occur while validating or persisting
//! an uploaded file, providing a unified error handling mechanism for all
//! store implementations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// The client declared a mime type outside `image/*`.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    /// The bytes could not be written to the backing store.
    #[error("failed to persist upload: {0}")]
    Io(#[from] std::io::Error),
}
