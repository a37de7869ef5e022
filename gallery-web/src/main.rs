use anyhow::Result;
use gallery_web::{router, AppState, DEFAULT_MAX_UPLOAD_BYTES};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery_web=info,gallery_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get configuration from environment
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

    // Missing credentials leave the gallery unconfigured rather than failing start-up
    let state = AppState::from_env().await?;
    if !state.gallery.is_configured() {
        tracing::warn!("Serving without storage credentials; every operation will show an alert");
    }

    let app = router(state, max_upload_bytes);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Gallery web server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
