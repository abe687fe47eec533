// ============================
// crates/backend-lib/src/storage/mod.rs
// ============================
//! Account storage abstraction with in-memory and flat-file implementations.
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use login_common::{AccountId, AccountSummary};

mod flat_file;
mod memory;
mod table;

pub use flat_file::FlatFileStorage;
pub use memory::MemoryStorage;

/// A stored user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub pw_hash: String,
}

/// An account that has not been assigned an id yet
#[derive(Debug, Clone)]
pub struct AccountDraft {
    pub username: String,
    pub email: String,
    pub pw_hash: String,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        AccountSummary {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
        }
    }
}

/// Trait for account storage backends.
///
/// Rows are only ever appended; there is no update or delete path.
pub trait Storage: Send + Sync {
    /// Persist a new account, assigning its id.
    ///
    /// Fails with [`AppError::Conflict`] when the username or email is taken.
    /// Either the account becomes visible to every later read or nothing is stored.
    fn insert(&self, draft: AccountDraft) -> Result<Account, AppError>;

    /// Point lookup by exact username
    fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError>;

    /// Every account in insertion order
    fn list_all(&self) -> Result<Vec<Account>, AppError>;
}
