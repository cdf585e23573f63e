#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cinedex_api::config::{LogFormat, ServerConfig, StoreConfig};
use cinedex_api::router::build_app_router;
use cinedex_api::state::AppState;
use cinedex_db::store::{MemoryMovieStore, MovieStore};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store: StoreConfig::Memory,
        empty_on_missing: true,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over the given store and config.
pub fn build_test_app_with(store: Arc<dyn MovieStore>, config: ServerConfig) -> Router {
    build_app_router(AppState {
        store,
        config: Arc::new(config),
    })
}

/// Build the full application router over a fresh in-memory store.
///
/// The store is returned too so tests can inspect or close it.
pub fn build_test_app() -> (Router, Arc<MemoryMovieStore>) {
    let store = Arc::new(MemoryMovieStore::new());
    let app = build_test_app_with(store.clone(), test_config());
    (app, store)
}

/// Same as [`build_test_app`] but answering 404 for missing movies.
pub fn build_strict_test_app() -> (Router, Arc<MemoryMovieStore>) {
    let store = Arc::new(MemoryMovieStore::new());
    let config = ServerConfig {
        empty_on_missing: false,
        ..test_config()
    };
    let app = build_test_app_with(store.clone(), config);
    (app, store)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Send a raw body with an explicit content type.
pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &'static str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
