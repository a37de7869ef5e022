use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use gallery_core::{GalleryError, SelectedFile};
use serde::Serialize;

use crate::state::AppState;
use crate::view::{cards, render_grid, render_page, ImageCard};

/// Body of every image API response.
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub images: Vec<ImageCard>,
    /// Pre-rendered grid markup the page swaps in.
    pub grid: String,
    pub alert: Option<&'static str>,
    /// Read after this request's own call has settled, so it reports calls
    /// from other clients that are still in flight.
    pub busy: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub configured: bool,
    pub busy: bool,
    pub images: usize,
}

/// Backend failures are already logged by the gallery; the user only sees
/// alerts for missing credentials and missing selections.
fn respond<T>(state: &AppState, outcome: Result<T, GalleryError>) -> Json<GalleryResponse> {
    let alert = match outcome {
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Gallery operation settled with error: {}", e);
            e.user_alert()
        }
    };

    let images = state.gallery.images();
    Json(GalleryResponse {
        grid: render_grid(&images),
        images: cards(&images),
        alert,
        busy: state.gallery.is_busy(),
    })
}

/// Gallery page
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let alert = if state.gallery.is_configured() {
        None
    } else {
        Some(gallery_core::error::CREDENTIALS_ALERT)
    };

    Html(render_page(&state.gallery.images(), alert))
}

/// Re-list the container
pub async fn list_images(State(state): State<AppState>) -> Json<GalleryResponse> {
    tracing::info!("List request");

    let outcome = state.gallery.refresh().await;
    respond(&state, outcome)
}

/// Upload the `file` field of a multipart form
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GalleryResponse>, StatusCode> {
    let selection = read_selection(multipart).await.map_err(|e| {
        tracing::error!("Failed to read upload form: {:?}", e);
        StatusCode::BAD_REQUEST
    })?;
    tracing::info!(
        "Upload request: file={:?}",
        selection.as_ref().map(|f| f.name.as_str())
    );

    let outcome = state.gallery.upload(selection).await;
    Ok(respond(&state, outcome))
}

/// Delete a blob by name
pub async fn delete_image(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<GalleryResponse> {
    tracing::info!("Delete request: name={}", name);

    let outcome = state.gallery.delete(&name).await;
    respond(&state, outcome)
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        configured: state.gallery.is_configured(),
        busy: state.gallery.is_busy(),
        images: state.gallery.images().len(),
    })
}

/// The first non-empty `file` field, if any. A picker submitted without a
/// choice arrives as a part with an empty file name.
async fn read_selection(
    mut multipart: Multipart,
) -> Result<Option<SelectedFile>, axum::extract::multipart::MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await?;

        if name.is_empty() {
            continue;
        }

        return Ok(Some(SelectedFile::new(name, content_type, data)));
    }

    Ok(None)
}
