// SPDX-License-Identifier: MIT

//! Wellness Portal: patient-wellness backend with session-cookie auth.
//!
//! This crate provides the backend API for the patient portal: account
//! registration and login, the session gate in front of page routes, and
//! the admin user-management endpoints.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::UserStore;
use services::AccountService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: UserStore,
    pub accounts: AccountService,
}
