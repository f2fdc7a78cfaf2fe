//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use std::env;
use std::time::Duration;

/// Placeholder signing secret. Only acceptable for local development.
pub const INSECURE_DEFAULT_SECRET: &str = "saga-insecure-dev-secret";

const DEFAULT_EXPIRES_IN: &str = "1h";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:4200";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// HS256 signing secret for access tokens (raw bytes)
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime, parsed from `JWT_EXPIRES_IN`
    pub jwt_expires_in: Duration,
    /// Server port
    pub port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret.trim().as_bytes().to_vec(),
            _ => INSECURE_DEFAULT_SECRET.as_bytes().to_vec(),
        };

        let expires_raw =
            env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| DEFAULT_EXPIRES_IN.to_string());
        let jwt_expires_in = parse_duration(&expires_raw)
            .ok_or_else(|| ConfigError::Invalid("JWT_EXPIRES_IN", expires_raw.clone()))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw.clone()))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            jwt_secret,
            jwt_expires_in,
            port,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
        })
    }

    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            jwt_secret: b"test_jwt_secret_32_bytes_minimum!".to_vec(),
            jwt_expires_in: Duration::from_secs(3600),
            port: DEFAULT_PORT,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
        }
    }

    /// Whether the signing secret is still the development placeholder.
    pub fn uses_insecure_secret(&self) -> bool {
        self.jwt_secret == INSECURE_DEFAULT_SECRET.as_bytes()
    }
}

/// Parse a lifetime in the `ms` notation used by JavaScript JWT tooling:
/// `3600000`, `90s`, `1.5h`, `2 days`, `1y`.
///
/// A bare number is milliseconds. Units are case-insensitive and may be
/// separated from the number by spaces. Tokens carry whole seconds, so the
/// value is truncated to seconds and anything under one second is rejected,
/// as are negative values.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    const SECOND: f64 = 1000.0;
    const MINUTE: f64 = 60.0 * SECOND;
    const HOUR: f64 = 60.0 * MINUTE;
    const DAY: f64 = 24.0 * HOUR;

    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(raw.len());
    let (number, unit) = raw.split_at(split);
    if !is_ms_number(number) {
        return None;
    }
    let value: f64 = number.parse().ok()?;

    let millis_per_unit = match unit.trim_start_matches(' ').to_ascii_lowercase().as_str() {
        "" | "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => SECOND,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR,
        "d" | "day" | "days" => DAY,
        "w" | "week" | "weeks" => 7.0 * DAY,
        "y" | "yr" | "yrs" | "year" | "years" => 365.25 * DAY,
        _ => return None,
    };

    let secs = Duration::try_from_secs_f64(value * millis_per_unit / SECOND)
        .ok()?
        .as_secs();
    if secs == 0 {
        return None;
    }
    Some(Duration::from_secs(secs))
}

/// Digits with at most one decimal point, ending in a digit (`5`, `1.5`, `.5`).
fn is_ms_number(number: &str) -> bool {
    let mut parts = number.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    match parts.next() {
        Some(fraction) => {
            !fraction.is_empty() && fraction.bytes().all(|b| b.is_ascii_digit())
        }
        None => !whole.is_empty(),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
