//! Shared helpers for HTTP-level integration tests.
//!
//! Requests go straight to the router through `tower::ServiceExt::oneshot`,
//! no TCP listener involved. `Router` is cheap to clone, so tests build one
//! app and clone it per request.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use goalboard_api::auth::jwt::{generate_access_token, JwtConfig};
use goalboard_api::auth::password::hash_password;
use goalboard_api::config::ServerConfig;
use goalboard_api::router::build_app_router;
use goalboard_api::state::AppState;
use goalboard_core::types::DbId;
use goalboard_db::models::user::CreateUser;
use goalboard_db::repositories::UserRepo;
use http_body_util::BodyExt;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

/// Password given to every user made by [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-with-enough-entropy".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

/// Build the application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert an active user directly and return its id.
pub async fn create_user(pool: &PgPool, username: &str) -> DbId {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        first_name: String::new(),
        last_name: String::new(),
        password_hash,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

/// Mint an access token for `user_id` signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_jwt_config()).expect("token generation should succeed")
}

/// Create a user and return `(id, access_token)`.
pub async fn create_user_with_token(pool: &PgPool, username: &str) -> (DbId, String) {
    let id = create_user(pool, username).await;
    (id, token_for(id))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixture helpers (through the API, so they exercise the real handlers)
// ---------------------------------------------------------------------------

/// Create a board as the token's user and return its id.
pub async fn create_board(app: &Router, token: &str, title: &str) -> DbId {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/boards",
        token,
        serde_json::json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), 201, "board creation should succeed");
    body_json(response).await["id"].as_i64().expect("board id")
}

/// Replace a board's non-owner participants.
pub async fn share_board(app: &Router, owner_token: &str, board_id: DbId, participants: serde_json::Value) {
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/boards/{board_id}"),
        owner_token,
        serde_json::json!({ "participants": participants }),
    )
    .await;
    assert_eq!(response.status(), 200, "sharing the board should succeed");
}

pub async fn create_category(app: &Router, token: &str, board_id: DbId, title: &str) -> DbId {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/categories",
        token,
        serde_json::json!({ "board_id": board_id, "title": title }),
    )
    .await;
    assert_eq!(response.status(), 201, "category creation should succeed");
    body_json(response).await["id"].as_i64().expect("category id")
}

pub async fn create_goal(app: &Router, token: &str, body: serde_json::Value) -> DbId {
    let response = post_json_auth(app.clone(), "/api/v1/goals", token, body).await;
    assert_eq!(response.status(), 201, "goal creation should succeed");
    body_json(response).await["id"].as_i64().expect("goal id")
}
