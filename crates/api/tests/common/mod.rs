#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use gamezone_core::search::MatchMode;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use gamezone_api::config::ServerConfig;
use gamezone_api::router::build_app_router;
use gamezone_api::state::AppState;

pub const BOUNDARY: &str = "gamezone-test-boundary";

/// Build a test `ServerConfig` with safe defaults and the given cover
/// directory.
pub fn test_config(covers_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        covers_dir,
        search_match: MatchMode::CaseInsensitive,
    }
}

/// The application router plus the temporary cover directory backing it.
///
/// The directory is deleted when the value is dropped, so keep it alive for
/// the whole test.
pub struct TestApp {
    pub router: Router,
    pub covers: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn cover_path(&self, name: &str) -> PathBuf {
        self.covers.path().join(name)
    }

    pub fn cover_exists(&self, name: &str) -> bool {
        self.cover_path(name).exists()
    }

    /// Names of every file currently in the cover directory.
    pub fn stored_covers(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.covers.path())
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}

/// Build the full application router (same middleware stack as production)
/// over the given pool and a fresh temporary cover directory.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let covers = tempfile::tempdir().unwrap();
    let config = test_config(covers.path().to_path_buf());
    let state = AppState::new(pool, config.clone());
    let router = build_app_router(state, &config).unwrap();
    TestApp { router, covers }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty(), None).await
}

pub async fn post_multipart(app: Router, uri: &str, form: &MultipartForm) -> Response<Body> {
    send_multipart(app, Method::POST, uri, form).await
}

pub async fn put_multipart(app: Router, uri: &str, form: &MultipartForm) -> Response<Body> {
    send_multipart(app, Method::PUT, uri, form).await
}

async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    form: &MultipartForm,
) -> Response<Body> {
    let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
    send(app, method, uri, Body::from(form.encode()), Some(content_type)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<String>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Minimal `multipart/form-data` encoder for the game forms.
#[derive(Debug, Default, Clone)]
pub struct MultipartForm {
    texts: Vec<(String, String)>,
    files: Vec<(String, String, Vec<u8>)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl ToString) -> Self {
        self.texts.push((name.to_string(), value.to_string()));
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        self.files
            .push((name.to_string(), file_name.to_string(), data.to_vec()));
        self
    }

    /// A complete, valid game form with a small PNG cover.
    pub fn game(name: &str, category_id: i64, devices: &[i64]) -> Self {
        let mut form = Self::new()
            .text("name", name)
            .text("description", format!("{name} description"))
            .text("category_id", category_id);
        for device in devices {
            form = form.text("selected_devices", device);
        }
        form.file("cover", "cover.png", b"\x89PNG fake image")
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in &self.texts {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (name, file_name, data) in &self.files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                     filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }
}

pub async fn category_id(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn device_id(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM devices WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn game_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM games")
        .fetch_one(pool)
        .await
        .unwrap()
}
