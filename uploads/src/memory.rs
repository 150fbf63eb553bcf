//! In-memory implementation of the `ImageStore` trait.
//!
//! This store keeps uploaded bytes in a map keyed by locator. It exists for
//! tests and for consumers that need the gateway contract without touching
//! disk; contents vanish with the process.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::errors::UploadError;
use crate::models::{content_address, NewImage, StoredImage};
use crate::ImageStore;

#[derive(Default)]
pub struct InMemoryImageStore {
    public_prefix: String,
    images: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryImageStore {
    pub fn new(public_prefix: impl Into<String>) -> Self {
        Self {
            public_prefix: public_prefix.into(),
            images: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the stored bytes for a locator, if any.
    pub fn get(&self, locator: &str) -> Option<Vec<u8>> {
        self.lock().get(locator).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.images.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn store(&self, image: NewImage<'_>) -> Result<StoredImage, UploadError> {
        let name = content_address(&image)?;
        let locator = format!("{}/{name}", self.public_prefix.trim_end_matches('/'));
        self.lock().insert(locator.clone(), image.bytes.to_vec());
        Ok(StoredImage {
            locator,
            size: image.bytes.len() as u64,
        })
    }
}
