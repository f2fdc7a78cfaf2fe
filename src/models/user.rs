//! User records and their outward-facing view.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Role;

/// User record held by the directory.
///
/// Deliberately not `Serialize`: the password hash must never leave the
/// process. Use [`SafeUser`] for anything outward-facing.
#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    /// First name
    pub name: String,
    pub last_name: String,
    /// Case-insensitive login key
    pub email: String,
    /// Case-insensitive login key
    pub username: String,
    pub bio: String,
    /// Role id (references [`Role::id`])
    pub role: u64,
    /// bcrypt hash (includes salt and cost)
    pub password_hash: String,
    pub is_active: bool,
}

impl User {
    /// Whether `credential` matches this user's email or username, ignoring case.
    pub fn matches_credential(&self, credential: &str) -> bool {
        let credential = credential.to_lowercase();
        self.email.to_lowercase() == credential || self.username.to_lowercase() == credential
    }

    /// Build the safe view, resolving the role id to its display name.
    pub fn to_safe(&self, role: &Role) -> SafeUser {
        SafeUser {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            bio: self.bio.clone(),
            role: role.name.clone(),
        }
    }
}

/// User representation with the password hash omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/app/generated/")
)]
pub struct SafeUser {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub username: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub bio: String,
    /// Role display name
    pub role: String,
}

/// Seed entry for a user; the plaintext password is hashed when the
/// directory initializes.
#[derive(Debug, Clone)]
pub struct UserSeed {
    pub id: u64,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub bio: String,
    pub role: u64,
    pub password: String,
    pub is_active: bool,
}
