use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use axum::Router;
use gallery_core::{BlobStore, Gallery, GalleryError, ImageEntry, Result};
use gallery_web::{router, AppState, DEFAULT_MAX_UPLOAD_BYTES};

/// In-memory container keyed by blob name.
#[derive(Default)]
pub struct MemoryStore {
    pub blobs: Mutex<Vec<(String, String, Bytes)>>,
}

impl MemoryStore {
    pub fn with_blobs(names: &[&str]) -> Self {
        let store = Self::default();
        for name in names {
            store.blobs.lock().unwrap().push((
                name.to_string(),
                "image/png".to_string(),
                Bytes::new(),
            ));
        }
        store
    }
}

fn entry(name: &str) -> ImageEntry {
    ImageEntry::new(name, format!("https://acct.blob.core.windows.net/photos/{name}?sig=x"))
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn list(&self) -> Result<Vec<ImageEntry>> {
        Ok(self
            .blobs
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _, _)| entry(name))
            .collect())
    }

    async fn put(&self, name: &str, content_type: &str, data: Bytes) -> Result<ImageEntry> {
        self.blobs
            .lock()
            .unwrap()
            .push((name.to_string(), content_type.to_string(), data));
        Ok(entry(name))
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let mut blobs = self.blobs.lock().unwrap();
        let before = blobs.len();
        blobs.retain(|(n, _, _)| n != name);
        if blobs.len() == before {
            return Err(GalleryError::backend("delete", format!("blob not found: {name}")));
        }
        Ok(())
    }
}

pub fn fixed_clock() -> i64 {
    1_700_000_000_000
}

pub fn test_app(store: Arc<MemoryStore>) -> Router {
    let gallery = Gallery::new(store).with_clock(fixed_clock);
    router(AppState::new(gallery), DEFAULT_MAX_UPLOAD_BYTES)
}

pub fn unconfigured_app() -> Router {
    router(
        AppState::new(Gallery::unconfigured("STORAGE_ACCOUNT")),
        DEFAULT_MAX_UPLOAD_BYTES,
    )
}
