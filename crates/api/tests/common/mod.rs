//! Shared test harness for API integration tests.
//!
//! Builds the application router with the exact same middleware stack that
//! production uses, but with a stub generation collaborator and a fixed
//! JWT secret so tests can mint their own tokens.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use jobflow_ai::{GenerationError, TextGenerator};
use jobflow_api::auth::jwt::{generate_access_token, JwtConfig};
use jobflow_api::config::ServerConfig;
use jobflow_api::router::build_app_router;
use jobflow_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        generation_budget_secs: 5,
        anthropic_api_key: "test-key".to_string(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// A generator that always succeeds, echoing the first prompt line.
pub struct StubGenerator;

#[async_trait::async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _system: &str, prompt: &str) -> Result<String, GenerationError> {
        let first_line = prompt.lines().next().unwrap_or_default();
        Ok(format!("[generated] {first_line}"))
    }
}

/// A generator that always fails with an upstream error.
pub struct FailingGenerator;

#[async_trait::async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Api {
            status: 500,
            message: "upstream unavailable".to_string(),
        })
    }
}

/// Build the app with the stub generator.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(StubGenerator))
}

/// Build the app with a specific generator implementation.
pub fn build_test_app_with(pool: PgPool, generator: Arc<dyn TextGenerator>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generator,
    };
    build_app_router(state, &config)
}

/// Mint an access token for a test user.
pub fn token_for(user_id: i64) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation")
}

/// Send a request through the router.
pub async fn send(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request build"),
        None => builder.body(Body::empty()).expect("request build"),
    };
    app.oneshot(request).await.expect("router call")
}

pub async fn get(app: Router, path: &str, token: &str) -> Response {
    send(app, Method::GET, path, Some(token), None).await
}

pub async fn post(app: Router, path: &str, token: &str) -> Response {
    send(app, Method::POST, path, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, path, Some(token), Some(body)).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}
