//! Shared fixtures for Freightline integration tests.
//!
//! The tests here exercise the library crates' pure seams (channel gate,
//! token signing, wire projections) without a database or network; tests
//! needing live infrastructure would sit beside these behind an env guard.

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::SecretString;

use freightline_core::{Email, Role, UserId};
use freightline_web::config::RealtimeConfig;
use freightline_web::models::CurrentUser;
use freightline_web::services::realtime::RealtimeClient;

/// A session for an operations user.
#[must_use]
pub fn admin_session(id: i32, name: Option<&str>) -> CurrentUser {
    CurrentUser {
        id: UserId::new(id),
        email: Email::parse("avery@freightline.dev").expect("fixture email is valid"),
        name: name.map(String::from),
        role: Role::Admin,
    }
}

/// A session for a customer.
#[must_use]
pub fn customer_session(id: i32) -> CurrentUser {
    CurrentUser {
        id: UserId::new(id),
        email: Email::parse("cass@example.com").expect("fixture email is valid"),
        name: Some("Cass".to_string()),
        role: Role::Customer,
    }
}

/// A realtime client with fixed test credentials.
#[must_use]
pub fn realtime_client() -> RealtimeClient {
    RealtimeClient::new(&RealtimeConfig {
        app_id: "100001".to_string(),
        key: "test_public_key".to_string(),
        secret: SecretString::from("test_signing_value"),
        cluster: "mt1".to_string(),
    })
}
