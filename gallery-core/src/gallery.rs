use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::config::StorageConfig;
use crate::error::{GalleryError, Result};
use crate::image::{stored_name, ImageEntry, SelectedFile};
use crate::store::{AzureBlobStore, BlobStore};

pub type Clock = fn() -> i64;

fn epoch_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Holds the displayed image list and the busy flag, and drives the blob store.
///
/// The list is only ever replaced wholesale by a successful listing. The busy
/// flag is advisory: it stays set while any call is in flight, but overlapping
/// calls are not queued, and whichever listing finishes last decides what is
/// displayed.
pub struct Gallery {
    /// `Err` names the missing credential.
    store: std::result::Result<Arc<dyn BlobStore>, &'static str>,
    images: RwLock<Vec<ImageEntry>>,
    in_flight: AtomicUsize,
    clock: Clock,
}

struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn enter(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Gallery {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self::with_store(Ok(store))
    }

    /// A gallery whose every operation reports missing credentials.
    pub fn unconfigured(missing: &'static str) -> Self {
        Self::with_store(Err(missing))
    }

    /// Build from loaded configuration; a configuration error yields an unconfigured gallery.
    pub fn from_config(config: Result<StorageConfig>) -> Result<Self> {
        match config {
            Ok(config) => Ok(Self::new(Arc::new(AzureBlobStore::new(&config)?))),
            Err(GalleryError::Configuration { missing }) => {
                tracing::warn!("Storage credentials not configured: {} is empty", missing);
                Ok(Self::unconfigured(missing))
            }
            Err(e) => Err(e),
        }
    }

    fn with_store(store: std::result::Result<Arc<dyn BlobStore>, &'static str>) -> Self {
        Self {
            store,
            images: RwLock::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            clock: epoch_millis,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_ok()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Snapshot of the most recently fetched list.
    pub fn images(&self) -> Vec<ImageEntry> {
        match self.images.read() {
            Ok(images) => images.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn store(&self) -> Result<&Arc<dyn BlobStore>> {
        self.store
            .as_ref()
            .map_err(|&missing| GalleryError::Configuration { missing })
    }

    fn replace_images(&self, images: Vec<ImageEntry>) {
        match self.images.write() {
            Ok(mut current) => *current = images,
            Err(poisoned) => *poisoned.into_inner() = images,
        }
    }

    /// First fetch after start-up.
    pub async fn mount(&self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!("Initial image fetch failed: {}", e);
        }
    }

    /// Re-list the container. On failure the previous list is kept.
    pub async fn refresh(&self) -> Result<Vec<ImageEntry>> {
        let store = self.store()?;
        let _busy = BusyGuard::enter(&self.in_flight);
        self.list_into_state(&**store).await
    }

    /// Upload the selected file as `<epoch-ms>-<name>`, then re-list.
    pub async fn upload(&self, file: Option<SelectedFile>) -> Result<ImageEntry> {
        let Some(file) = file else {
            tracing::warn!("Upload attempted with no file selected");
            return Err(GalleryError::NoSelection);
        };
        let store = self.store()?;
        let _busy = BusyGuard::enter(&self.in_flight);

        let name = stored_name((self.clock)(), &file.name);
        let content_type = file.effective_content_type().to_string();
        tracing::info!("Uploading image: {} ({} bytes)", name, file.data.len());

        let entry = store
            .put(&name, &content_type, file.data)
            .await
            .inspect_err(|e| tracing::error!("Upload of {} failed: {}", name, e))?;

        self.relist_after_mutation(&**store).await;
        Ok(entry)
    }

    /// Delete a blob by name, then re-list.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let store = self.store()?;
        let _busy = BusyGuard::enter(&self.in_flight);

        tracing::info!("Deleting image: {}", name);
        store
            .delete(name)
            .await
            .inspect_err(|e| tracing::error!("Delete of {} failed: {}", name, e))?;

        self.relist_after_mutation(&**store).await;
        Ok(())
    }

    /// The mutation already happened, so a failed re-list only leaves the
    /// previous list on display.
    async fn relist_after_mutation(&self, store: &dyn BlobStore) {
        if self.list_into_state(store).await.is_err() {
            tracing::warn!("Keeping previous image list after failed re-list");
        }
    }

    async fn list_into_state(&self, store: &dyn BlobStore) -> Result<Vec<ImageEntry>> {
        let images = store
            .list()
            .await
            .inspect_err(|e| tracing::error!("Listing images failed: {}", e))?;

        tracing::debug!("Fetched {} images", images.len());
        self.replace_images(images.clone());
        Ok(images)
    }
}
