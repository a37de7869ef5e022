use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A blob in the container together with a URL a browser can fetch directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub name: String,
    pub url: String,
}

impl ImageEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        display_name(&self.name)
    }
}

/// A local file waiting to be uploaded.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// The declared media type, or a guess from the file extension when none was declared.
    pub fn effective_content_type(&self) -> &str {
        let declared = self.content_type.trim();
        if declared.is_empty() {
            guess_content_type(&self.name)
        } else {
            declared
        }
    }
}

/// Everything before the last `.`, or the whole name when there is none.
pub fn display_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Blob name for an upload: `<epoch-ms>-<original name>`.
pub fn stored_name(epoch_ms: i64, original: &str) -> String {
    format!("{epoch_ms}-{original}")
}

pub fn is_empty(images: &[ImageEntry]) -> bool {
    images.is_empty()
}

pub fn guess_content_type(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

pub fn is_image_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    guess_content_type(name).starts_with("image/")
}
