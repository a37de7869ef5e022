use anyhow::Result;
use gallery_core::Gallery;

use super::settle;

pub async fn execute(gallery: &Gallery, name: &str) -> Result<()> {
    tracing::info!("Deleting image: {}", name);

    if settle(gallery.delete(name).await)?.is_some() {
        println!("✓ Image deleted: {name}");
        println!("{} images remain", gallery.images().len());
    }

    Ok(())
}
