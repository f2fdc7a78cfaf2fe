// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::middleware::require_auth;
use crate::routes::SuccessResponse;
use crate::services::login::LoginData;
use crate::AppState;

pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/api/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/api/auth/login", post(login))
        .merge(protected)
}

/// Login request body.
///
/// Non-string values are read as missing so validation reports them.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub credential: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub password: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// POST /api/auth/login
async fn login(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<SuccessResponse<LoginData>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable login body");
        AppError::InvalidInput(rejection.body_text())
    })?;

    let data = state
        .login_service
        .login(request.credential.as_deref(), request.password.as_deref())
        .await?;

    Ok(SuccessResponse::new("Login successful", data))
}

/// Identity carried by a verified access token.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/app/generated/")
)]
pub struct TokenIdentity {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// GET /api/auth/me
async fn me(Extension(user): Extension<AuthUser>) -> SuccessResponse<TokenIdentity> {
    let claims = user.claims;
    SuccessResponse::new(
        "Token is valid",
        TokenIdentity {
            id: claims.id,
            username: claims.username,
            email: claims.email,
            role: claims.role,
        },
    )
}
