// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod role;
pub mod user;

pub use role::Role;
pub use user::{SafeUser, User, UserSeed};
