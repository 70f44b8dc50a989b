//! Test helpers for wxlog server integration tests
//!
//! - In-memory SQLite pools with migrations applied
//! - The scripted [`StubProvider`] standing in for Open-Meteo
//! - Router construction and request shortcuts

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::sync::Arc;
use tower::ServiceExt;

use wxlog_server::{
    api,
    config::CorsConfig,
    db,
    features::FeatureState,
    provider::WeatherProvider,
};

pub use wxlog_server::provider::stub::StubProvider;

/// Fresh in-memory database with the schema applied
///
/// A single connection that never expires, so every query sees the same
/// in-memory database.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Full application router over `pool` and `provider`
pub fn setup_test_app(pool: SqlitePool, provider: Arc<dyn WeatherProvider>) -> Router {
    let cors = CorsConfig {
        allowed_origins: vec!["http://localhost:3000".to_string()],
        allow_credentials: false,
    };
    api::create_router(FeatureState { db: pool, provider }, &cors)
}

/// Send one request and return the status and raw body
pub async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

/// Send one request and parse the body as JSON
pub async fn send_json(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(app, method, uri).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Create the Paris record used by most tests and return its JSON
pub async fn create_paris(app: &Router) -> Value {
    let (status, json) = send_json(
        app,
        Method::POST,
        "/weather/?query=Paris&date_from=2024-01-01&date_to=2024-01-03",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json
}
