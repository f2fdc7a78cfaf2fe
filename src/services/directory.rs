// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory user and role directory.
//!
//! The directory starts `Uninitialized`. [`UserDirectory::initialize`] hashes
//! the seed passwords and moves it to `Ready`; after that it is read-only and
//! can be shared across requests without locking.

use std::collections::HashSet;

use tokio::sync::OnceCell;

use crate::models::{Role, User, UserSeed};
use crate::services::password::{self, PasswordError, BCRYPT_COST};

const DUMMY_PASSWORD: &str = "saga-no-such-account";

/// Lifecycle of the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    Uninitialized,
    Ready,
}

#[derive(Debug)]
struct Records {
    users: Vec<User>,
    roles: Vec<Role>,
    // Verified against when a credential matches nobody, so unknown
    // accounts cost the same bcrypt work as known ones.
    dummy_hash: String,
}

/// User and role store, seeded once at startup.
pub struct UserDirectory {
    seed_roles: Vec<Role>,
    seed_users: Vec<UserSeed>,
    bcrypt_cost: u32,
    records: OnceCell<Records>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory {
    /// Directory with the built-in accounts.
    pub fn new() -> Self {
        Self::with_seed(default_roles(), default_users())
    }

    /// Directory with a custom seed. Nothing is hashed until `initialize`.
    pub fn with_seed(roles: Vec<Role>, users: Vec<UserSeed>) -> Self {
        Self {
            seed_roles: roles,
            seed_users: users,
            bcrypt_cost: BCRYPT_COST,
            records: OnceCell::new(),
        }
    }

    /// Override the bcrypt cost used when seeding.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn state(&self) -> DirectoryState {
        if self.records.initialized() {
            DirectoryState::Ready
        } else {
            DirectoryState::Uninitialized
        }
    }

    /// Hash seed passwords and make the directory `Ready`.
    ///
    /// Idempotent. Concurrent first calls wait on a single seeding run.
    pub async fn initialize(&self) -> Result<(), DirectoryError> {
        self.records
            .get_or_try_init(|| self.seed())
            .await
            .map(|_| ())
    }

    async fn seed(&self) -> Result<Records, DirectoryError> {
        self.check_seed();

        let mut users = Vec::with_capacity(self.seed_users.len());
        for seed in &self.seed_users {
            let password_hash = password::hash_password(&seed.password, self.bcrypt_cost).await?;
            users.push(User {
                id: seed.id,
                name: seed.name.clone(),
                last_name: seed.last_name.clone(),
                email: seed.email.clone(),
                username: seed.username.clone(),
                bio: seed.bio.clone(),
                role: seed.role,
                password_hash,
                is_active: seed.is_active,
            });
        }

        let dummy_hash = password::hash_password(DUMMY_PASSWORD, self.bcrypt_cost).await?;

        tracing::info!(
            users = users.len(),
            roles = self.seed_roles.len(),
            "User directory initialized"
        );

        Ok(Records {
            users,
            roles: self.seed_roles.clone(),
            dummy_hash,
        })
    }

    /// Warn about seed data that breaks lookup assumptions. Login still
    /// handles these cases at request time.
    fn check_seed(&self) {
        let role_ids: HashSet<u64> = self.seed_roles.iter().map(|r| r.id).collect();
        let mut emails = HashSet::new();
        let mut usernames = HashSet::new();

        for seed in &self.seed_users {
            if !role_ids.contains(&seed.role) {
                tracing::warn!(
                    user_id = seed.id,
                    role_id = seed.role,
                    "Seed user references unknown role"
                );
            }
            if !emails.insert(seed.email.to_lowercase()) {
                tracing::warn!(user_id = seed.id, "Duplicate email in user seed");
            }
            if !usernames.insert(seed.username.to_lowercase()) {
                tracing::warn!(user_id = seed.id, "Duplicate username in user seed");
            }
        }
    }

    fn records(&self) -> Result<&Records, DirectoryError> {
        self.records.get().ok_or(DirectoryError::NotInitialized)
    }

    /// First user whose email or username equals `credential`, ignoring case.
    pub fn find_user_by_credential(
        &self,
        credential: &str,
    ) -> Result<Option<&User>, DirectoryError> {
        Ok(self
            .records()?
            .users
            .iter()
            .find(|u| u.matches_credential(credential)))
    }

    pub fn find_role_by_id(&self, id: u64) -> Result<Option<&Role>, DirectoryError> {
        Ok(self.records()?.roles.iter().find(|r| r.id == id))
    }

    /// Hash to verify against when no user matches, at the seed's bcrypt cost.
    pub fn dummy_hash(&self) -> Result<&str, DirectoryError> {
        Ok(&self.records()?.dummy_hash)
    }

    pub fn all_users(&self) -> Result<&[User], DirectoryError> {
        Ok(&self.records()?.users)
    }

    pub fn all_roles(&self) -> Result<&[Role], DirectoryError> {
        Ok(&self.records()?.roles)
    }
}

/// Errors from directory operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("User directory has not been initialized")]
    NotInitialized,

    #[error(transparent)]
    Password(#[from] PasswordError),
}

fn default_roles() -> Vec<Role> {
    vec![
        Role {
            id: 1,
            name: "Admin".to_string(),
            is_active: true,
        },
        Role {
            id: 2,
            name: "User".to_string(),
            is_active: true,
        },
    ]
}

fn default_users() -> Vec<UserSeed> {
    vec![
        UserSeed {
            id: 1,
            name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "johnsmith@saga.com".to_string(),
            username: "johnsmith".to_string(),
            bio: "Avid reader and library administrator.".to_string(),
            role: 1,
            password: "Password@123".to_string(),
            is_active: true,
        },
        UserSeed {
            id: 2,
            name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "janedoe@saga.com".to_string(),
            username: "janedoe".to_string(),
            bio: "Fantasy and science fiction enthusiast.".to_string(),
            role: 2,
            password: "Password@123".to_string(),
            is_active: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn fast_directory() -> UserDirectory {
        UserDirectory::new().with_bcrypt_cost(4)
    }

    #[tokio::test]
    async fn test_lookups_fail_before_initialize() {
        let directory = fast_directory();
        assert_eq!(directory.state(), DirectoryState::Uninitialized);
        assert!(matches!(
            directory.find_user_by_credential("johnsmith"),
            Err(DirectoryError::NotInitialized)
        ));
        assert!(matches!(
            directory.find_role_by_id(1),
            Err(DirectoryError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_default_seed() {
        let directory = fast_directory();
        directory.initialize().await.unwrap();
        assert_eq!(directory.state(), DirectoryState::Ready);

        let roles = directory.all_roles().unwrap();
        assert_eq!(roles.len(), 2);
        assert!(roles.iter().all(|r| r.is_active));

        let users = directory.all_users().unwrap();
        assert_eq!(users.len(), 2);
        for user in users {
            assert!(user.password_hash.starts_with("$2b$"));
            assert_ne!(user.password_hash, "Password@123");
            assert!(directory.find_role_by_id(user.role).unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_dummy_hash_uses_seed_cost() {
        let directory = fast_directory();
        assert!(matches!(
            directory.dummy_hash(),
            Err(DirectoryError::NotInitialized)
        ));

        directory.initialize().await.unwrap();
        let dummy = directory.dummy_hash().unwrap();
        assert!(dummy.starts_with("$2b$04$"));
        assert!(!password::verify_password("Password@123", dummy).await.unwrap());
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let directory = fast_directory();
        directory.initialize().await.unwrap();
        let first_hash = directory.all_users().unwrap()[0].password_hash.clone();

        directory.initialize().await.unwrap();
        assert_eq!(directory.all_users().unwrap()[0].password_hash, first_hash);
        assert_eq!(directory.all_users().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_initialize_seeds_once() {
        let directory = Arc::new(fast_directory());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let directory = directory.clone();
                tokio::spawn(async move { directory.initialize().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(directory.all_users().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_user_by_credential_is_case_insensitive() {
        let directory = fast_directory();
        directory.initialize().await.unwrap();

        let by_email = directory
            .find_user_by_credential("JohnSmith@Saga.com")
            .unwrap()
            .expect("email lookup");
        assert_eq!(by_email.id, 1);

        let by_username = directory
            .find_user_by_credential("JANEDOE")
            .unwrap()
            .expect("username lookup");
        assert_eq!(by_username.id, 2);

        assert!(directory.find_user_by_credential("john").unwrap().is_none());
        assert!(directory
            .find_user_by_credential("nobody@saga.com")
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_find_role_by_id() {
        let directory = fast_directory();
        directory.initialize().await.unwrap();

        assert_eq!(directory.find_role_by_id(1).unwrap().unwrap().name, "Admin");
        assert_eq!(directory.find_role_by_id(2).unwrap().unwrap().name, "User");
        assert!(directory.find_role_by_id(99).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_first_match_wins_on_overlap() {
        let mut users = default_users();
        // Second user's username collides with the first user's email.
        users[1].username = "johnsmith@saga.com".to_string();

        let directory = UserDirectory::with_seed(default_roles(), users).with_bcrypt_cost(4);
        directory.initialize().await.unwrap();

        let found = directory
            .find_user_by_credential("johnsmith@saga.com")
            .unwrap()
            .unwrap();
        assert_eq!(found.id, 1);
    }
}
