//! HTTP API tests against an in-memory blob store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use gallery_core::error::{CREDENTIALS_ALERT, NO_SELECTION_ALERT};
use serde_json::Value;
use tower::ServiceExt;

mod common;
use common::{test_app, unconfigured_app, MemoryStore};

const BOUNDARY: &str = "gallery-test-boundary";

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

fn upload_request(file: Option<(&str, &str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    if let Some((filename, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .uri("/api/images")
        .method(Method::POST)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn image_names(json: &Value) -> Vec<String> {
    json["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|image| image["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_images() {
    let app = test_app(Arc::new(MemoryStore::with_blobs(&["photo.jpg", "a.b.c"])));

    let response = app.oneshot(request(Method::GET, "/api/images")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(image_names(&json), ["photo.jpg", "a.b.c"]);
    assert_eq!(json["images"][0]["display_name"], "photo");
    assert_eq!(json["images"][1]["display_name"], "a.b");
    assert!(json["alert"].is_null());
    assert_eq!(json["busy"], false);
}

#[tokio::test]
async fn test_empty_container_renders_empty_state() {
    let app = test_app(Arc::new(MemoryStore::default()));

    let response = app.oneshot(request(Method::GET, "/api/images")).await.unwrap();

    let json = json_body(response).await;
    assert!(json["images"].as_array().unwrap().is_empty());
    assert!(json["grid"].as_str().unwrap().contains("No Images Found"));
}

#[tokio::test]
async fn test_upload_image() {
    let store = Arc::new(MemoryStore::default());
    let app = test_app(store.clone());

    let response = app
        .oneshot(upload_request(Some(("cat.png", "image/png", b"\x89PNG"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(image_names(&json), ["1700000000000-cat.png"]);

    let blobs = store.blobs.lock().unwrap();
    assert_eq!(blobs[0].1, "image/png");
    assert_eq!(&blobs[0].2[..], b"\x89PNG");
}

#[tokio::test]
async fn test_upload_without_file_alerts() {
    let store = Arc::new(MemoryStore::default());
    let app = test_app(store.clone());

    let response = app.oneshot(upload_request(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["alert"], NO_SELECTION_ALERT);
    assert!(store.blobs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_image_with_nested_name() {
    let store = Arc::new(MemoryStore::with_blobs(&["trip/day 1.jpg", "b.png"]));
    let app = test_app(store.clone());

    let response = app
        .oneshot(request(Method::DELETE, "/api/images/trip/day%201.jpg"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(image_names(&json), ["b.png"]);
}

#[tokio::test]
async fn test_delete_missing_blob_is_silent() {
    let app = test_app(Arc::new(MemoryStore::with_blobs(&["a.png"])));

    let response = app
        .oneshot(request(Method::DELETE, "/api/images/ghost.png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert!(json["alert"].is_null());
    assert_eq!(json["busy"], false);
}

#[tokio::test]
async fn test_unconfigured_operations_alert() {
    for req in [
        request(Method::GET, "/api/images"),
        upload_request(Some(("cat.png", "image/png", b"png"))),
        request(Method::DELETE, "/api/images/cat.png"),
    ] {
        let response = unconfigured_app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["alert"], CREDENTIALS_ALERT);
        assert!(json["images"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_index_page() {
    let app = test_app(Arc::new(MemoryStore::default()));

    let response = app.oneshot(request(Method::GET, "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"id="upload-form""#));
    assert!(html.contains("const startupAlert = null;"));
}

#[tokio::test]
async fn test_status_endpoint() {
    let response = unconfigured_app()
        .oneshot(request(Method::GET, "/api/status"))
        .await
        .unwrap();

    let json = json_body(response).await;
    assert_eq!(json["configured"], false);
    assert_eq!(json["busy"], false);
    assert_eq!(json["images"], 0);
}
