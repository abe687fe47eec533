//! In-memory account table with unique indexes, shared by both backends.
use std::collections::HashMap;

use super::{Account, AccountDraft};
use crate::error::{AppError, UniqueField};
use login_common::AccountId;

#[derive(Debug)]
pub(super) struct Table {
    rows: Vec<Account>,
    by_username: HashMap<String, usize>,
    by_email: HashMap<String, usize>,
    next_id: AccountId,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            by_username: HashMap::new(),
            by_email: HashMap::new(),
            next_id: 1,
        }
    }
}

impl Table {
    /// Check the unique indexes and build the row the draft would become.
    /// Nothing is modified.
    pub(super) fn prepare(&self, draft: AccountDraft) -> Result<Account, AppError> {
        if self.by_username.contains_key(&draft.username) {
            return Err(AppError::Conflict(UniqueField::Username));
        }
        if self.by_email.contains_key(&draft.email) {
            return Err(AppError::Conflict(UniqueField::Email));
        }

        Ok(Account {
            id: self.next_id,
            username: draft.username,
            email: draft.email,
            pw_hash: draft.pw_hash,
        })
    }

    /// Publish a row. Used for rows from [`Table::prepare`] and for replayed rows.
    pub(super) fn push(&mut self, account: Account) -> Result<(), AppError> {
        if account.id < self.next_id {
            return Err(AppError::Storage(format!(
                "account id {} is not above the last assigned id {}",
                account.id,
                self.next_id - 1
            )));
        }
        if self.by_username.contains_key(&account.username) {
            return Err(AppError::Conflict(UniqueField::Username));
        }
        if self.by_email.contains_key(&account.email) {
            return Err(AppError::Conflict(UniqueField::Email));
        }

        let index = self.rows.len();
        self.next_id = account.id + 1;
        self.by_username.insert(account.username.clone(), index);
        self.by_email.insert(account.email.clone(), index);
        self.rows.push(account);
        Ok(())
    }

    pub(super) fn get_by_username(&self, username: &str) -> Option<&Account> {
        self.by_username.get(username).map(|&i| &self.rows[i])
    }

    pub(super) fn rows(&self) -> &[Account] {
        &self.rows
    }
}
