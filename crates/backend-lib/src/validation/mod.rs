// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Form field validation.

use crate::auth::{validate_password_strength, PasswordRequirements};
use login_common::{LoginRequest, RegisterRequest};
use thiserror::Error;

// Field length limits, counted in characters
pub const MIN_USERNAME_LENGTH: usize = 4;
pub const MAX_USERNAME_LENGTH: usize = 25;
pub const MIN_EMAIL_LENGTH: usize = 6;
pub const MAX_EMAIL_LENGTH: usize = 35;

/// Possible validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Passwords must match")]
    PasswordMismatch,

    #[error("The terms of service must be accepted")]
    TermsNotAccepted,
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

fn length_between(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

/// Validate a username
pub fn validate_username(username: &str) -> ValidationResult<&str> {
    if !length_between(username, MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH) {
        return Err(ValidationError::InvalidUsername(format!(
            "Field must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters long"
        )));
    }

    Ok(username)
}

/// Validate an email address.
///
/// Only the length is checked; the address format is not.
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if !length_between(email, MIN_EMAIL_LENGTH, MAX_EMAIL_LENGTH) {
        return Err(ValidationError::InvalidEmail(format!(
            "Field must be between {MIN_EMAIL_LENGTH} and {MAX_EMAIL_LENGTH} characters long"
        )));
    }

    Ok(email)
}

/// Validate a new password against the configured policy
pub fn validate_password<'a>(
    password: &'a str,
    requirements: &PasswordRequirements,
) -> ValidationResult<&'a str> {
    // Required field: blank input counts as missing
    if password.trim().is_empty() {
        return Err(ValidationError::InvalidPassword(
            "This field is required".to_string(),
        ));
    }

    if !validate_password_strength(password, requirements) {
        return Err(ValidationError::InvalidPassword(requirements.describe()));
    }

    Ok(password)
}

/// Validate a registration form.
///
/// Checks run in field order and the first failure is returned.
pub fn validate_registration(
    form: &RegisterRequest,
    requirements: &PasswordRequirements,
) -> ValidationResult<()> {
    validate_username(&form.username)?;
    validate_email(&form.email)?;
    validate_password(&form.password, requirements)?;

    if form.password != form.confirm {
        return Err(ValidationError::PasswordMismatch);
    }

    if !form.accept_tos {
        return Err(ValidationError::TermsNotAccepted);
    }

    Ok(())
}

/// Validate a login form. Only the username shape is checked here.
pub fn validate_login(form: &LoginRequest) -> ValidationResult<()> {
    validate_username(&form.username)?;
    Ok(())
}
