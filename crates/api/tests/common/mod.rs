//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` via `build_app_router` so
//! tests exercise the same middleware stack (CORS, request ID, timeout,
//! tracing, panic recovery) that production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use eventlog_api::auth::jwt::{generate_access_token, JwtConfig};
use eventlog_api::config::ServerConfig;
use eventlog_api::router::build_app_router;
use eventlog_api::state::AppState;
use eventlog_core::nonce::{self, BULK_EVENTS_ACTION};
use eventlog_db::models::event::CreateEvent;
use eventlog_db::models::user::CreateUser;
use eventlog_db::repositories::{EventRepo, UserRepo};

/// Secret shared by JWT signing and action tokens in tests.
pub const TEST_SECRET: &str = "test_secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_per_page: 20,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        nonce_secret: TEST_SECRET.to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// An `Authorization` header value for the given user.
pub fn bearer(user_id: i64, role: &str) -> String {
    let token = generate_access_token(user_id, role, &test_config().jwt)
        .expect("token generation should not fail");
    format!("Bearer {token}")
}

/// A valid bulk-events action token for the given user.
pub fn bulk_token(user_id: i64) -> String {
    nonce::issue(
        TEST_SECRET,
        BULK_EVENTS_ACTION,
        user_id,
        chrono::Utc::now().timestamp(),
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request with the given `Authorization` header.
pub async fn get(app: Router, uri: &str, auth: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("authorization", auth)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a GET request without authentication.
pub async fn get_unauthenticated(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a form-encoded POST.
pub async fn post_form(app: Router, uri: &str, auth: &str, body: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("authorization", auth)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON PUT.
pub async fn put_json(app: Router, uri: &str, auth: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("authorization", auth)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get("location")
        .expect("response should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Seed a user and return its id.
pub async fn seed_user(pool: &PgPool, login: &str, role: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            user_login: login.to_string(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

/// Seed `count` published events for a user and return their ids.
pub async fn seed_events(pool: &PgPool, user_id: i64, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let event = EventRepo::insert(
            pool,
            &CreateEvent {
                user_id,
                occurred_at: Some(chrono::Utc::now() - chrono::Duration::minutes(i as i64)),
                event_name: format!("event {i}"),
            },
        )
        .await
        .unwrap();
        ids.push(event.id);
    }
    ids
}
