// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod directory;
pub mod login;
pub mod password;
pub mod token;
pub mod validation;

pub use directory::{DirectoryError, DirectoryState, UserDirectory};
pub use login::{LoginData, LoginService};
pub use token::{Claims, IssuedToken, TokenService};
pub use validation::{validate_credentials, ValidationResult};
