// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token issuing and verification (HS256 JWT).

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Role, User};

pub const TOKEN_TYPE: &str = "Bearer";

/// JWT claims structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub id: u64,
    pub username: String,
    pub email: String,
    /// Role display name
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Token handed back to the client after a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/app/generated/")
)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub expires_in: u64,
}

/// Errors from token issuing.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Issue time precedes the Unix epoch")]
    ClockBeforeEpoch,
}

/// Signs and verifies access tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], expires_in: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expires_in,
        }
    }

    /// Configured token lifetime.
    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    /// Issue a token for `user` with `role`, valid from now.
    pub fn issue(&self, user: &User, role: &Role) -> Result<IssuedToken, TokenError> {
        self.issue_at(user, role, Utc::now())
    }

    /// Issue a token as if it were minted at `issued_at`.
    pub fn issue_at(
        &self,
        user: &User,
        role: &Role,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let iat = u64::try_from(issued_at.timestamp()).map_err(|_| TokenError::ClockBeforeEpoch)?;
        let expires_in = self.expires_in.as_secs();

        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: role.name.clone(),
            iat,
            exp: iat.saturating_add(expires_in),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in,
        })
    }

    /// Decode and check a token. Bad signature, malformed input and expiry
    /// all yield `None`.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected access token");
                None
            }
        }
    }
}
