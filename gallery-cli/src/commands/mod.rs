pub mod delete;
pub mod list;
pub mod upload;

use anyhow::Result;
use gallery_core::GalleryError;

/// Print user-facing alerts and carry on; backend failures end the command.
pub(crate) fn settle<T>(result: Result<T, GalleryError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => match e.user_alert() {
            Some(alert) => {
                eprintln!("⚠ {alert}");
                Ok(None)
            }
            None => Err(e.into()),
        },
    }
}
