// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shape and strength checks for submitted login credentials.

pub const CREDENTIAL_REQUIRED: &str = "Credential is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_WEAK: &str = "Password must be at least 8 characters long and contain at least one uppercase letter, one lowercase letter, and one number";

/// Minimum password length, in UTF-16 code units (as the web frontend counts it).
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Outcome of credential validation. Errors are in check order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// All errors joined into a single message.
    pub fn message(&self) -> String {
        self.errors.join(", ")
    }
}

/// Validate a login attempt before any lookup happens.
///
/// `None` stands for a missing or non-string value.
pub fn validate_credentials(credential: Option<&str>, password: Option<&str>) -> ValidationResult {
    let mut errors = Vec::new();

    if credential.map_or(true, |c| c.trim().is_empty()) {
        errors.push(CREDENTIAL_REQUIRED.to_string());
    }

    match password {
        Some(p) if !p.trim().is_empty() => {
            if !is_strong_password(p) {
                errors.push(PASSWORD_TOO_WEAK.to_string());
            }
        }
        _ => errors.push(PASSWORD_REQUIRED.to_string()),
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// At least 8 characters with a lowercase letter, an uppercase letter and a digit.
///
/// Line terminators are never accepted inside a password.
pub fn is_strong_password(password: &str) -> bool {
    !password.contains(is_line_terminator)
        && password.encode_utf16().count() >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
