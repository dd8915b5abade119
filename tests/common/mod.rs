// SPDX-License-Identifier: MIT

use std::sync::Arc;
use wellness_portal::config::Config;
use wellness_portal::db::UserStore;
use wellness_portal::routes::create_router;
use wellness_portal::services::AccountService;
use wellness_portal::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a mock store (offline).
#[allow(dead_code)]
pub fn test_store_offline() -> UserStore {
    UserStore::new_mock()
}

/// Assemble an app around the given config and store.
#[allow(dead_code)]
pub fn build_app(config: Config, store: UserStore) -> (axum::Router, Arc<AppState>) {
    let accounts = AccountService::new(store.clone(), config.jwt_signing_key.clone());
    let state = Arc::new(AppState {
        config,
        store,
        accounts,
    });
    (create_router(state.clone()), state)
}

/// Create a test app with an offline mock store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(Config::test_default(), test_store_offline())
}

/// Create a test app with a custom config and an offline mock store.
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    build_app(config, test_store_offline())
}

/// Create a test app backed by the Firestore emulator (lazy connect).
#[allow(dead_code)]
pub fn create_emulator_app() -> (axum::Router, Arc<AppState>) {
    build_app(Config::test_default(), UserStore::new("test-project"))
}
