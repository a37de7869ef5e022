use anyhow::{Context, Result};
use gallery_core::image::is_image_file;
use gallery_core::{Gallery, SelectedFile};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::settle;

pub async fn execute(gallery: &Gallery, paths: Vec<String>) -> Result<()> {
    // Collect all image paths
    let image_paths = collect_image_paths(paths)?;

    if image_paths.is_empty() {
        anyhow::bail!("No images found in the provided paths");
    }

    println!("Images to upload: {}\n", image_paths.len());

    let upload_pb = ProgressBar::new(image_paths.len() as u64);
    upload_pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.green/blue} {pos}/{len} {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("█▓▒░ "),
    );
    upload_pb.set_message("Uploading...");

    // One at a time: each upload re-lists the container afterwards
    let mut uploaded = Vec::new();
    for path in &image_paths {
        let file = read_selection(path).await?;
        let filename = file.name.clone();

        match settle(gallery.upload(Some(file)).await)? {
            Some(entry) => {
                upload_pb.set_message(format!("Uploaded: {}", filename));
                uploaded.push(entry);
            }
            None => {
                upload_pb.abandon_with_message("Upload aborted");
                return Ok(());
            }
        }
        upload_pb.inc(1);
    }

    upload_pb.finish_with_message("All images uploaded");
    println!();

    for entry in &uploaded {
        println!("✓ {}", entry.name);
    }
    println!("\nContainer now holds {} images", gallery.images().len());

    Ok(())
}

async fn read_selection(path: &Path) -> Result<SelectedFile> {
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    // No declared media type on the command line; the extension decides
    Ok(SelectedFile::new(name, "", data))
}

fn collect_image_paths(paths: Vec<String>) -> Result<Vec<PathBuf>> {
    let mut image_paths = Vec::new();

    for path_str in paths {
        let path = Path::new(&path_str);

        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }

        if path.is_file() {
            if is_image_file(path) {
                image_paths.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            // Walk directory and collect all images
            for entry in WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let entry_path = entry.path();
                if entry_path.is_file() && is_image_file(entry_path) {
                    image_paths.push(entry_path.to_path_buf());
                }
            }
        }
    }

    // Sort for consistent ordering
    image_paths.sort();

    Ok(image_paths)
}
