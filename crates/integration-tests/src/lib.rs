//! Integration tests for the Import/Export Hub.
//!
//! # Running Tests
//!
//! These tests exercise a live API instance end to end and are `#[ignore]`d
//! by default:
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p ihub-cli -- migrate
//!
//! # Start the API
//! cargo run -p ihub-api
//!
//! # Run integration tests
//! cargo test -p ihub-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `IHUB_BASE_URL` - API base URL (default: `http://localhost:3000`)
//! - `IHUB_TEST_TOKEN` - A valid identity-provider bearer token for the
//!   authenticated routes

use reqwest::Client;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("IHUB_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A valid bearer token for authenticated routes.
///
/// # Panics
///
/// Panics if `IHUB_TEST_TOKEN` is unset; the ignored tests need one.
#[must_use]
pub fn test_token() -> String {
    std::env::var("IHUB_TEST_TOKEN").expect("IHUB_TEST_TOKEN must be set for integration tests")
}

/// Create an HTTP client for the tests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder().build().expect("Failed to create HTTP client")
}
