//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;

use inkpost::config::AuthConfig;
use inkpost::{create_app, AppState, Database};

/// Signing secret used by every test server.
pub const SECRET: &str = "test-secret-key-for-testing-only";

/// Session lifetime used by every test server.
pub const EXPIRATION_SECS: u64 = 3600;

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> TestServer {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let config = AuthConfig {
        jwt_secret: SECRET.to_string(),
        jwt_expiration_secs: EXPIRATION_SECS,
    };
    let app_state = Arc::new(AppState::from_database(&db, &config));

    TestServer::new(create_app(app_state, &[])).expect("Failed to create test server")
}
