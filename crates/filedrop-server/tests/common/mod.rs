//! Shared harness for the HTTP tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use filedrop_core::AppConfig;
use filedrop_server::{AppState, create_router};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "filedrop-test-boundary";

/// A router backed by a throwaway upload directory and users file.
pub struct TestServer {
    pub dir: TempDir,
    pub state: AppState,
    pub router: Router,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Build a server after applying `adjust` to the default configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = TempDir::new().unwrap();
        let mut cfg = AppConfig::default();
        cfg.storage.upload_dir = dir.path().join("uploads");
        cfg.storage.users_file = dir.path().join("users.json");
        adjust(&mut cfg);
        let cfg = cfg.validated().unwrap();

        let state = AppState::init(&cfg).await.unwrap();
        let router = create_router(state.clone());
        Self { dir, state, router }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        json_response(self.send(request).await).await
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        json_response(self.send(request).await).await
    }

    pub async fn upload(&self, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        json_response(self.send(request).await).await
    }

    pub async fn register(&self, username: &str, password: &str) -> StatusCode {
        let (status, _) = self
            .post_json(
                "/register",
                serde_json::json!({ "username": username, "password": password }),
            )
            .await;
        status
    }
}

/// One multipart part. `filename` makes it a file part.
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            data: value.as_bytes(),
        }
    }

    pub fn file(filename: &'a str, data: &'a [u8]) -> Self {
        Self {
            name: "file",
            filename: Some(filename),
            data,
        }
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    part.name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name).as_bytes(),
            ),
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn json_response(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}
