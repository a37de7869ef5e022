use async_trait::async_trait;
use bytes::Bytes;
use opendal::layers::LoggingLayer;
use opendal::services::Azblob;
use opendal::Operator;
use std::fmt;
use url::Url;

use crate::config::StorageConfig;
use crate::error::{GalleryError, Result};
use crate::image::ImageEntry;

/// The three blob operations the gallery needs, scoped to one container.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Every blob in the container, in backend order.
    async fn list(&self) -> Result<Vec<ImageEntry>>;

    async fn put(&self, name: &str, content_type: &str, data: Bytes) -> Result<ImageEntry>;

    async fn delete(&self, name: &str) -> Result<()>;
}

/// Azure Blob Storage container accessed with a pre-issued SAS token.
#[derive(Clone)]
pub struct AzureBlobStore {
    operator: Operator,
    container_url: Url,
    sas_token: String,
}

/// Validate the three credentials and build a store for the container.
pub fn init(account: &str, sas_token: &str, container: &str) -> Result<AzureBlobStore> {
    AzureBlobStore::new(&StorageConfig::new(account, sas_token, container)?)
}

impl AzureBlobStore {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let endpoint = config.service_endpoint();

        let mut container_url =
            Url::parse(&endpoint).map_err(|e| GalleryError::backend("connect", e))?;
        container_url
            .path_segments_mut()
            .map_err(|_| GalleryError::backend("connect", format!("invalid endpoint: {endpoint}")))?
            .pop_if_empty()
            .push(config.container());

        let builder = Azblob::default()
            .root("/")
            .endpoint(&endpoint)
            .account_name(config.account())
            .container(config.container())
            .sas_token(config.sas_token());

        let operator = Operator::new(builder)
            .map_err(|e| GalleryError::backend("connect", e))?
            .layer(LoggingLayer::default())
            .finish();

        tracing::info!(
            "Blob store initialized: endpoint={}, container={}",
            endpoint,
            config.container()
        );

        Ok(Self {
            operator,
            container_url,
            sas_token: config.sas_token().to_string(),
        })
    }

    /// Directly fetchable URL for a blob, signed with the embedded SAS token.
    pub fn blob_url(&self, name: &str) -> String {
        let mut url = self.container_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.extend(name.split('/'));
        }
        url.set_query(Some(&self.sas_token));
        url.into()
    }

    fn entry(&self, name: &str) -> ImageEntry {
        ImageEntry::new(name, self.blob_url(name))
    }
}

impl fmt::Debug for AzureBlobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureBlobStore")
            .field("container_url", &self.container_url.as_str())
            .finish()
    }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn list(&self) -> Result<Vec<ImageEntry>> {
        tracing::debug!("Blob LIST: container={}", self.container_url);

        let entries = self
            .operator
            .list_with("/")
            .recursive(true)
            .await
            .map_err(|e| GalleryError::backend("list", e))?;

        let images: Vec<_> = entries
            .iter()
            .filter(|entry| entry.metadata().is_file())
            .map(|entry| self.entry(entry.path().trim_start_matches('/')))
            .collect();

        tracing::debug!("Blob LIST success: {} blobs", images.len());
        Ok(images)
    }

    async fn put(&self, name: &str, content_type: &str, data: Bytes) -> Result<ImageEntry> {
        tracing::debug!(
            "Blob PUT: name={}, content_type={}, size={} bytes",
            name,
            content_type,
            data.len()
        );

        self.operator
            .write_with(name, data)
            .content_type(content_type)
            .await
            .map_err(|e| GalleryError::backend("upload", e))?;

        tracing::debug!("Blob PUT success: name={}", name);
        Ok(self.entry(name))
    }

    async fn delete(&self, name: &str) -> Result<()> {
        tracing::debug!("Blob DELETE: name={}", name);

        self.operator
            .delete(name)
            .await
            .map_err(|e| GalleryError::backend("delete", e))?;

        tracing::debug!("Blob DELETE success: name={}", name);
        Ok(())
    }
}
