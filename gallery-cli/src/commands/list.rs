use anyhow::Result;
use gallery_core::{is_empty, Gallery};

use super::settle;

pub async fn execute(gallery: &Gallery) -> Result<()> {
    let Some(images) = settle(gallery.refresh().await)? else {
        return Ok(());
    };

    if is_empty(&images) {
        println!("No Images Found");
        return Ok(());
    }

    for image in &images {
        println!("{}\t{}", image.display_name(), image.name);
        println!("  {}", image.url);
    }
    println!("\n{} images", images.len());

    Ok(())
}
