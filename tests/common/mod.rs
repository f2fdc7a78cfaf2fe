// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response},
};
use saga_api::config::Config;
use saga_api::models::{Role, UserSeed};
use saga_api::routes::create_router;
use saga_api::services::UserDirectory;
use saga_api::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// bcrypt cost for test directories (minimum allowed).
pub const TEST_BCRYPT_COST: u32 = 4;

/// Create a test app around the default seed.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_directory(UserDirectory::new()).await
}

/// Create a test app around a custom seed.
#[allow(dead_code)]
pub async fn create_test_app_with_seed(
    roles: Vec<Role>,
    users: Vec<UserSeed>,
) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_directory(UserDirectory::with_seed(roles, users)).await
}

/// Create a test app around the default seed with a custom configuration.
#[allow(dead_code)]
pub async fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    build_test_app(config, UserDirectory::new()).await
}

async fn create_test_app_with_directory(directory: UserDirectory) -> (axum::Router, Arc<AppState>) {
    build_test_app(Config::test_default(), directory).await
}

async fn build_test_app(config: Config, directory: UserDirectory) -> (axum::Router, Arc<AppState>) {
    let directory = Arc::new(directory.with_bcrypt_cost(TEST_BCRYPT_COST));
    directory
        .initialize()
        .await
        .expect("Failed to seed test directory");

    let state = Arc::new(AppState::new(config, directory));
    (create_router(state.clone()), state)
}

/// Build a JSON POST to the login endpoint.
#[allow(dead_code)]
pub fn login_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send a login request and return the response.
#[allow(dead_code)]
pub async fn post_login(app: axum::Router, body: &str) -> Response<Body> {
    app.oneshot(login_request(body)).await.unwrap()
}

/// Read a response body as raw bytes.
#[allow(dead_code)]
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap()
        .to_vec()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Response body is not JSON")
}

/// Seed user with the standard test password.
#[allow(dead_code)]
pub fn seed_user(id: u64, username: &str, role: u64, is_active: bool) -> UserSeed {
    UserSeed {
        id,
        name: "Test".to_string(),
        last_name: "Reader".to_string(),
        email: format!("{username}@saga.com"),
        username: username.to_string(),
        bio: "Test account".to_string(),
        role,
        password: "Password@123".to_string(),
        is_active,
    }
}

#[allow(dead_code)]
pub fn role(id: u64, name: &str, is_active: bool) -> Role {
    Role {
        id,
        name: name.to_string(),
        is_active,
    }
}
