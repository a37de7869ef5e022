use std::error::Error as StdError;

/// Shown to the user whenever storage credentials are missing.
pub const CREDENTIALS_ALERT: &str =
    "Please make sure you have set the storage credentials (STORAGE_ACCOUNT, STORAGE_SAS, STORAGE_CONTAINER)";

/// Shown to the user when an upload is submitted without a file.
pub const NO_SELECTION_ALERT: &str = "Please select an image to upload";

pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// A credential was missing; raised before any network call.
    #[error("storage credentials not configured: {missing} is empty")]
    Configuration { missing: &'static str },

    #[error("no file selected for upload")]
    NoSelection,

    #[error("storage {operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl GalleryError {
    pub fn backend(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Backend {
            operation,
            source: source.into(),
        }
    }

    /// Alert text for errors the user should see. Backend failures are only logged.
    pub fn user_alert(&self) -> Option<&'static str> {
        match self {
            Self::Configuration { .. } => Some(CREDENTIALS_ALERT),
            Self::NoSelection => Some(NO_SELECTION_ALERT),
            Self::Backend { .. } => None,
        }
    }
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;
