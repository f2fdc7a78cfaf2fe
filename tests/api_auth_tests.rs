// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication and CORS tests.
//!
//! These tests verify that:
//! 1. The protected route rejects requests without valid tokens
//! 2. The protected route accepts tokens issued by the login endpoint
//! 3. CORS preflight requests from the frontend return correct headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use tower::ServiceExt;

mod common;

fn me_request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/api/auth/me");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn assert_invalid_token(app: axum::Router, authorization: Option<&str>) {
    let response = app.oneshot(me_request(authorization)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = common::body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _) = common::create_test_app().await;
    assert_invalid_token(app, None).await;
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _) = common::create_test_app().await;
    assert_invalid_token(app, Some("Bearer invalid.token.here")).await;
}

#[tokio::test]
async fn test_protected_route_with_wrong_scheme() {
    let (app, state) = common::create_test_app().await;
    let user = &state.directory.all_users().unwrap()[0];
    let role = state.directory.find_role_by_id(user.role).unwrap().unwrap();
    let issued = state.token_service.issue(user, role).unwrap();

    assert_invalid_token(app, Some(&format!("Token {}", issued.access_token))).await;
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let (app, state) = common::create_test_app().await;
    let user = &state.directory.all_users().unwrap()[0];
    let role = state.directory.find_role_by_id(user.role).unwrap().unwrap();
    let issued = state
        .token_service
        .issue_at(user, role, Utc::now() - Duration::hours(3))
        .unwrap();

    assert_invalid_token(app, Some(&format!("Bearer {}", issued.access_token))).await;
}

#[tokio::test]
async fn test_login_token_unlocks_protected_route() {
    let (app, _) = common::create_test_app().await;

    let login = common::post_login(
        app.clone(),
        r#"{"credential": "janedoe", "password": "Password@123"}"#,
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let login_json = common::body_json(login).await;
    let token = login_json["data"]["accessToken"].as_str().unwrap();

    let response = app
        .oneshot(me_request(Some(&format!("Bearer {}", token))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["id"], 2);
    assert_eq!(json["data"]["username"], "janedoe");
    assert_eq!(json["data"]["email"], "janedoe@saga.com");
    assert_eq!(json["data"]["role"], "User");
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/auth/login")
                .header(header::ORIGIN, "http://localhost:4200")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);

    // Should have CORS headers
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Health should be accessible without auth
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
}
