//! Core `uploads` crate for abstracting image storage.
//!
//! This crate defines the `ImageStore` trait, which outlines how the backend
//! hands an uploaded image to storage and receives a public locator back,
//! and provides a central point for accessing concrete implementations
//! (local filesystem, in-memory).

pub mod errors;
pub mod local;
pub mod memory;
pub mod models;

pub use errors::UploadError;
pub use local::LocalImageStore;
pub use memory::InMemoryImageStore;
pub use models::{NewImage, StoredImage};

use async_trait::async_trait;

/// Destination for uploaded pet images.
///
/// Implementations accept one image per call, reject anything that does not
/// declare an `image/*` mime type, and return a locator that stays valid for
/// as long as the referencing entity exists.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persists one image and returns its public locator.
    async fn store(&self, image: NewImage<'_>) -> Result<StoredImage, UploadError>;
}
