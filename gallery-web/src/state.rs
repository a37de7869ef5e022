use std::sync::Arc;

use anyhow::Result;
use gallery_core::{Gallery, StorageConfig};

#[derive(Clone)]
pub struct AppState {
    pub gallery: Arc<Gallery>,
}

impl AppState {
    pub fn new(gallery: Gallery) -> Self {
        Self {
            gallery: Arc::new(gallery),
        }
    }

    /// Load credentials from the environment and run the first fetch.
    pub async fn from_env() -> Result<Self> {
        let gallery = Gallery::from_config(StorageConfig::from_env())?;
        gallery.mount().await;

        Ok(Self::new(gallery))
    }
}
