//! Volatile storage backend.
use parking_lot::RwLock;

use super::table::Table;
use super::{Account, AccountDraft, Storage};
use crate::error::AppError;

/// Storage that keeps every account in process memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    table: RwLock<Table>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn insert(&self, draft: AccountDraft) -> Result<Account, AppError> {
        let mut table = self.table.write();
        let account = table.prepare(draft)?;
        table.push(account.clone())?;
        Ok(account)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        Ok(self.table.read().get_by_username(username).cloned())
    }

    fn list_all(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.table.read().rows().to_vec())
    }
}
