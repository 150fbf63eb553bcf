//! Filesystem-backed implementation of the `ImageStore` trait.
//!
//! This store writes each upload under a configured directory using a
//! content-addressed file name, so re-uploading identical bytes is
//! idempotent, and returns a locator of the form `<prefix>/<file name>`
//! suitable for serving the directory statically.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::UploadError;
use crate::models::{content_address, NewImage, StoredImage};
use crate::ImageStore;

pub struct LocalImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalImageStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    /// `public_prefix` is prepended to file names to form locators.
    pub fn new(
        root: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
    ) -> Result<Self, UploadError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            public_prefix: public_prefix.into(),
        })
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, image: NewImage<'_>) -> Result<StoredImage, UploadError> {
        let name = content_address(&image)?;
        tokio::fs::write(self.root.join(&name), image.bytes).await?;
        debug!(name = %name, size = image.bytes.len(), "stored image on disk");
        Ok(StoredImage {
            locator: format!("{}/{name}", self.public_prefix.trim_end_matches('/')),
            size: image.bytes.len() as u64,
        })
    }
}
