//! Shared helpers for driving the HTTP surface in-process.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use devtime_server::{build_router, config::Config, db::Database, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 1,
        static_dir: "does-not-exist".to_string(),
    }
}

/// Application state backed by a fresh in-memory database.
pub async fn create_test_state() -> AppState {
    let config = test_config();
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to create test database");
    db.run_migrations().await.expect("Failed to run migrations");
    AppState::new(db, config)
}

pub async fn create_test_app() -> Router {
    build_router(create_test_state().await)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.body))
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn register(app: &Router, username: &str, password: &str) -> TestResponse {
    send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await
}

pub async fn login(app: &Router, username: &str, password: &str) -> TestResponse {
    send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await
}

/// Registers `username` and returns a bearer token for it.
pub async fn token_for(app: &Router, username: &str) -> String {
    let registered = register(app, username, "pw").await;
    assert_eq!(registered.status, StatusCode::OK, "{}", registered.body);

    let logged_in = login(app, username, "pw").await;
    assert_eq!(logged_in.status, StatusCode::OK, "{}", logged_in.body);
    logged_in.body
}
