// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saga: book-tracking backend.
//!
//! This crate provides the authentication API used by the Saga frontend:
//! credential login against an in-memory user directory and signed,
//! time-limited bearer tokens.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{LoginService, TokenService, UserDirectory};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub directory: Arc<UserDirectory>,
    pub token_service: TokenService,
    pub login_service: LoginService,
}

impl AppState {
    /// Wire services from configuration around an existing directory.
    pub fn new(config: Config, directory: Arc<UserDirectory>) -> Self {
        let token_service = TokenService::new(&config.jwt_secret, config.jwt_expires_in);
        let login_service = LoginService::new(directory.clone(), token_service.clone());

        Self {
            config,
            directory,
            token_service,
            login_service,
        }
    }
}
