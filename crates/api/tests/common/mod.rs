#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use kennel_api::config::{LogFormat, ServerConfig};
use kennel_api::router::build_app_router;
use kennel_api::state::AppState;
use kennel_api::storage::{FileStore, LocalStore};

pub const TOKEN: &str = "test-token";

/// 1x1 transparent PNG.
pub const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

const BOUNDARY: &str = "kennel-test-boundary";

/// Build a test `ServerConfig` with safe defaults and uploads under `upload_dir`.
pub fn test_config(upload_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
        upload_dir: upload_dir.to_path_buf(),
        upload_url_prefix: "/uploads".to_string(),
        max_upload_bytes: 1024 * 1024,
        cdn: None,
        log_format: LogFormat::Pretty,
    }
}

/// The application under test plus the temporary upload directory it writes to.
pub struct TestApp {
    pub pool: PgPool,
    pub uploads: TempDir,
}

impl TestApp {
    pub fn new(pool: PgPool) -> Self {
        let uploads = tempfile::tempdir().unwrap();
        Self { pool, uploads }
    }

    /// A fresh router over the same pool and upload directory, running the
    /// same middleware stack as production.
    pub fn router(&self) -> Router {
        let config = test_config(self.uploads.path());
        let store: Arc<dyn FileStore> = Arc::new(LocalStore::new(
            config.upload_dir.clone(),
            &config.upload_url_prefix,
        ));
        let state = AppState {
            pool: self.pool.clone(),
            config: Arc::new(config.clone()),
            photo_store: Arc::clone(&store),
            document_store: store,
        };
        build_app_router(state, &config)
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn authed(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, authed(Method::GET, uri).body(Body::empty()).unwrap()).await
}

/// GET without an `Authorization` header.
pub async fn get_public(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, authed(Method::DELETE, uri).body(Body::empty()).unwrap()).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = authed(method, uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body).await
}

/// POST JSON without an `Authorization` header.
pub async fn post_json_public(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a `multipart/form-data` body with text fields and one file part.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    file: (&str, &[u8]),
) -> Response<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    let (filename, bytes) = file;
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = authed(Method::POST, uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a dog through the API and return its id.
pub async fn create_dog(app: &TestApp, name: &str, gender: &str) -> i64 {
    let response = post_json(
        app.router(),
        "/api/dogs",
        serde_json::json!({ "name": name, "gender": gender }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a litter out of a fresh dam and return its id.
pub async fn create_litter(app: &TestApp, name: &str) -> i64 {
    let dam_id = create_dog(app, &format!("{name} dam"), "female").await;
    let response = post_json(
        app.router(),
        "/api/litters",
        serde_json::json!({ "name": name, "dam_id": dam_id }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
