use crate::error::AppError;
use crate::storage::Account;
use login_common::RegisterRequest;

/// Registration and credential checks.
///
/// Every method completes synchronously; callers on an async runtime should
/// run them on the blocking pool since hashing is deliberately slow.
pub trait AuthService: Send + Sync {
    /// Validate the form, hash the password and store a new account
    fn register(&self, form: &RegisterRequest) -> Result<Account, AppError>;

    /// Check a password for an existing username.
    ///
    /// Returns [`AppError::NotFound`] when no account has that username.
    fn authenticate(&self, username: &str, password: &str) -> Result<bool, AppError>;

    /// Every stored account in registration order
    fn list_accounts(&self) -> Result<Vec<Account>, AppError>;
}
