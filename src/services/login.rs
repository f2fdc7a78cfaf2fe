// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login flow: validate, look up, verify, issue.

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::models::SafeUser;
use crate::services::directory::UserDirectory;
use crate::services::password;
use crate::services::token::{IssuedToken, TokenService};
use crate::services::validation::validate_credentials;

/// Payload of a successful login.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/app/generated/")
)]
pub struct LoginData {
    #[serde(flatten)]
    pub token: IssuedToken,
    pub user: SafeUser,
}

/// Composes the directory, password check and token issuer.
#[derive(Clone)]
pub struct LoginService {
    directory: Arc<UserDirectory>,
    tokens: TokenService,
}

impl LoginService {
    pub fn new(directory: Arc<UserDirectory>, tokens: TokenService) -> Self {
        Self { directory, tokens }
    }

    /// Authenticate a credential/password pair.
    ///
    /// An unknown credential and a wrong password produce the same error.
    /// Nothing is mutated by a login attempt.
    pub async fn login(
        &self,
        credential: Option<&str>,
        password: Option<&str>,
    ) -> Result<LoginData> {
        let validation = validate_credentials(credential, password);
        if !validation.is_valid {
            tracing::debug!(errors = ?validation.errors, "Login rejected by validation");
            return Err(AppError::InvalidInput(validation.message()));
        }
        // Both are present once validation passes.
        let (Some(credential), Some(password)) = (credential, password) else {
            return Err(AppError::InvalidInput(validation.message()));
        };

        let Some(user) = self
            .directory
            .find_user_by_credential(credential)
            .context("user lookup failed")?
        else {
            // Same bcrypt work as a wrong password; the outcome is ignored.
            let dummy_hash = self.directory.dummy_hash().context("user lookup failed")?;
            let _ = password::verify_password(password, dummy_hash)
                .await
                .context("password verification failed")?;
            tracing::warn!("Login failed: unknown credential");
            return Err(AppError::InvalidCredentials);
        };

        if !user.is_active {
            tracing::warn!(user_id = user.id, "Login failed: account inactive");
            return Err(AppError::AccountInactive);
        }

        let matches = password::verify_password(password, &user.password_hash)
            .await
            .context("password verification failed")?;
        if !matches {
            tracing::warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let role = self
            .directory
            .find_role_by_id(user.role)
            .context("role lookup failed")?
            .ok_or_else(|| {
                AppError::Integrity(format!(
                    "user {} references missing role {}",
                    user.id, user.role
                ))
            })?;

        if !role.is_active {
            return Err(AppError::Integrity(format!(
                "user {} has inactive role {}",
                user.id, role.id
            )));
        }

        let token = self
            .tokens
            .issue(user, role)
            .context("token issuing failed")?;

        tracing::info!(user_id = user.id, role = %role.name, "Login successful");

        Ok(LoginData {
            token,
            user: user.to_safe(role),
        })
    }
}
