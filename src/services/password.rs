// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! bcrypt password hashing and verification.
//!
//! Both operations are CPU-bound and run on the blocking thread pool.

/// bcrypt work factor used for seeded accounts.
pub const BCRYPT_COST: u32 = 10;

/// Errors from password hashing.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Hashing task failed: {0}")]
    Join(String),
}

/// Hash a password with a fresh salt.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || {
        bcrypt::hash(password, cost).map_err(|e| PasswordError::Hash(e.to_string()))
    })
    .await
    .map_err(|e| PasswordError::Join(e.to_string()))?
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// A malformed hash counts as a mismatch. Only a failed blocking task is
/// reported as an error.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_string();
    let hash = hash.to_string();

    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| PasswordError::Join(e.to_string()))?;

    Ok(outcome.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Stored password hash could not be checked");
        false
    }))
}
