//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as production)
//! over a per-test database provided by `#[sqlx::test]`, and drives it with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use bulletin_api::auth::jwt::JwtConfig;
use bulletin_api::config::ServerConfig;
use bulletin_api::media::{MediaBackendKind, MediaStore};
use bulletin_api::router::build_app_router;
use bulletin_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults: inline media backend,
/// small upload ceiling, fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:9001".to_string()],
        request_timeout_secs: 30,
        public_base_url: "http://localhost:3000".to_string(),
        media_backend: MediaBackendKind::Inline,
        media_root: std::env::temp_dir().join("bulletin-test-media"),
        max_upload_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_days: 1,
        },
    }
}

/// Build the full application router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let media = Arc::new(MediaStore::new(
        config.media_backend,
        config.media_root.clone(),
    ));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media,
    };
    build_app_router(state, &config)
}

/// Send a GET request.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request must build");
    app.clone().oneshot(request).await.expect("request must run")
}

/// Send a JSON POST request, optionally with a bearer token.
pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request must build");
    app.clone().oneshot(request).await.expect("request must run")
}

/// Send a DELETE request with a bearer token.
pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request must build");
    app.clone().oneshot(request).await.expect("request must run")
}

/// One file part for [`multipart_request`].
pub struct FilePart {
    pub field: &'static str,
    pub filename: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

const BOUNDARY: &str = "----bulletin-test-boundary";

/// Assemble a multipart/form-data body from text fields and file parts.
fn multipart_body(fields: &[(&str, &str)], files: &[FilePart]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for file in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.filename, file.mime
            )
            .as_bytes(),
        );
        body.extend_from_slice(&file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Send a multipart request (POST or PUT), optionally with a bearer token.
pub async fn multipart_request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
    files: &[FilePart],
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(multipart_body(fields, files)))
        .expect("request must build");
    app.clone().oneshot(request).await.expect("request must run")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .expect("body must collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body must be JSON")
}

/// Sign up a fresh admin via the API and return a usable bearer token.
pub async fn signup_token(app: &Router, email: &str) -> String {
    let response = post_json(
        app,
        "/admin/signup",
        None,
        serde_json::json!({
            "email": email,
            "password": "pw123456",
            "name": "Test Admin",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("signup must return a token")
        .to_string()
}
