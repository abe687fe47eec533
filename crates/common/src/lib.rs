// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between login clients and the server.
//! This module defines the JSON request and response bodies of the HTTP adapter.

use serde::{Deserialize, Serialize};

/// Store-assigned account identifier
pub type AccountId = i64;

/// Registration form submitted by a client
/// # Fields
/// * `username` - Desired username (4 to 25 characters)
/// * `email` - Email address (6 to 35 characters, format is not checked)
/// * `password` - New password
/// * `confirm` - Repeat of `password`
/// * `accept_tos` - Terms-of-service checkbox; absent means unchecked
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    #[serde(default)]
    pub accept_tos: bool,
}

/// Login form submitted by a client
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Publicly visible part of a stored account.
/// The password hash never leaves the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub id: AccountId,
    pub username: String,
    pub email: String,
}

/// Outcome of a login attempt
/// # Fields
/// * `authenticated` - Whether the password matched
/// * `redirect` - Route the client should show next
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub authenticated: bool,
    pub redirect: String,
}

impl LoginResponse {
    pub const SUCCESS_ROUTE: &'static str = "/success";
    pub const FAIL_ROUTE: &'static str = "/fail";

    pub fn success() -> Self {
        Self {
            authenticated: true,
            redirect: Self::SUCCESS_ROUTE.to_string(),
        }
    }

    pub fn failure() -> Self {
        Self {
            authenticated: false,
            redirect: Self::FAIL_ROUTE.to_string(),
        }
    }
}
