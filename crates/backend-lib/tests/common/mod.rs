//! Shared setup for the integration tests.
#![allow(dead_code)]

use login_backend_lib::auth::HashSettings;
use login_backend_lib::config::Settings;
use login_common::RegisterRequest;

/// Settings with cheap hashing so tests stay fast
pub fn test_settings() -> Settings {
    Settings {
        debug: true,
        hashing: HashSettings { log_n: 4, r: 8, p: 1 },
        ..Settings::default()
    }
}

/// A registration form that passes every check
pub fn valid_form(username: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm: password.to_string(),
        accept_tos: true,
    }
}
