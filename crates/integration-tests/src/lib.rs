//! Integration tests for Kirana.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and apply migrations
//! cargo run -p kirana-cli -- migrate
//! cargo run -p kirana-cli -- seed
//!
//! # Start the server
//! cargo run -p kirana-server
//!
//! # Run integration tests
//! cargo test -p kirana-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `KIRANA_BASE_URL` - Server base URL (default `http://localhost:3000`)
//! - `ADMIN_PASSWORD` - Password used by the admin login tests
//!
//! The test files live under `tests/`; this library carries shared helpers.

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL of the running server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("KIRANA_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Plain HTTP client; the API is stateless so no cookie store is needed.
#[must_use]
pub fn client() -> Client {
    Client::new()
}

/// Register a throwaway customer and return its JSON representation.
///
/// Uses a random phone number so repeated runs never collide on the
/// earliest-registration login rule.
///
/// # Panics
///
/// Panics if the server is unreachable or rejects the registration.
pub async fn register_test_customer(client: &Client, full_name: &str) -> Value {
    let phone = random_phone();
    let resp = client
        .post(format!("{}/api/customers/register", base_url()))
        .json(&json!({
            "full_name": full_name,
            "phone_number": phone,
            "shop_name": "Test Traders",
            "delivery_location": "12 Test Lane"
        }))
        .send()
        .await
        .expect("Failed to register test customer");

    assert!(resp.status().is_success());
    resp.json().await.expect("Failed to parse customer")
}

/// A random ten-digit phone number.
#[must_use]
pub fn random_phone() -> String {
    let digits: String = uuid::Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(9)
        .collect();
    format!("9{digits}")
}

/// Ensure the store gate has the wanted value, toggling if needed.
///
/// # Panics
///
/// Panics if the server is unreachable.
pub async fn set_store_open(client: &Client, open: bool) {
    let resp = client
        .get(format!("{}/api/store/status", base_url()))
        .send()
        .await
        .expect("Failed to get store status");
    let body: Value = resp.json().await.expect("Failed to parse status");

    if body["is_store_open"].as_bool() != Some(open) {
        let resp = client
            .post(format!("{}/api/store/toggle", base_url()))
            .send()
            .await
            .expect("Failed to toggle store");
        assert!(resp.status().is_success());
    }
}
