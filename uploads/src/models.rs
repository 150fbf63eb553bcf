//! Generic data models for the `uploads` crate.
//!
//! These models define the common representations of an inbound image (raw
//! bytes plus client-supplied metadata) and of a stored one, allowing the
//! backend to interact with any store implementation through a consistent
//! data format.

use std::ffi::OsStr;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::errors::UploadError;

/// An image received from a client, not yet persisted.
#[derive(Debug, Clone, Copy)]
pub struct NewImage<'a> {
    /// File name as supplied by the client, if any.
    pub file_name: Option<&'a str>,
    /// Declared mime type, e.g. `image/png`.
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

/// A persisted image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Public locator for the stored bytes, usable as an image URL.
    pub locator: String,
    /// Size of the stored payload in bytes.
    pub size: u64,
}

/// Derives the content-addressed file name for an image: SHA-256 of the
/// bytes plus an extension taken from the client file name, falling back to
/// the mime subtype. Rejects anything that is not declared `image/*`.
pub(crate) fn content_address(image: &NewImage<'_>) -> Result<String, UploadError> {
    if !image.content_type.starts_with("image/") {
        return Err(UploadError::UnsupportedMediaType(
            image.content_type.to_owned(),
        ));
    }
    let ext = image
        .file_name
        .map(Path::new)
        .and_then(Path::extension)
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| extension_from_mime(image.content_type).to_owned());
    let digest = hex::encode(Sha256::digest(image.bytes));
    Ok(format!("{digest}.{ext}"))
}

fn extension_from_mime(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "img",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image<'a>(file_name: Option<&'a str>, content_type: &'a str) -> NewImage<'a> {
        NewImage {
            file_name,
            content_type,
            bytes: b"not really pixels",
        }
    }

    #[test]
    fn rejects_non_image_mime() {
        let err = content_address(&image(Some("notes.txt"), "text/plain"));
        assert!(matches!(err, Err(UploadError::UnsupportedMediaType(t)) if t == "text/plain"));
    }

    #[test]
    fn extension_comes_from_file_name_first() {
        let name = content_address(&image(Some("Rex.JPG"), "image/png")).unwrap();
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn extension_falls_back_to_mime_subtype() {
        let name = content_address(&image(None, "image/png")).unwrap();
        assert!(name.ends_with(".png"));
        let name = content_address(&image(Some("photo"), "image/jpeg")).unwrap();
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn same_bytes_share_an_address() {
        let a = content_address(&image(Some("a.png"), "image/png")).unwrap();
        let b = content_address(&image(Some("b.png"), "image/png")).unwrap();
        assert_eq!(a, b);
    }
}
