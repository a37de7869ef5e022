pub mod config;
pub mod error;
pub mod gallery;
pub mod image;
pub mod store;

pub use config::StorageConfig;
pub use error::{GalleryError, Result};
pub use gallery::Gallery;
pub use image::{display_name, is_empty, stored_name, ImageEntry, SelectedFile};
pub use store::{init, AzureBlobStore, BlobStore};
