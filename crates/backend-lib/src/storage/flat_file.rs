// ============================
// crates/backend-lib/src/storage/flat_file.rs
// ============================
//! Append-only flat-file storage backend.
//!
//! Accounts are kept as one JSON object per line in `accounts.log`. The log is
//! replayed into memory on open and every insert appends exactly one line.
use std::{
    fs::{self, File, OpenOptions},
    io::{Read, Write},
    path::{Path, PathBuf},
};

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use super::table::Table;
use super::{Account, AccountDraft, Storage};
use crate::error::AppError;

/// File name of the account log inside the data directory
pub const ACCOUNTS_FILE: &str = "accounts.log";

#[derive(Debug)]
struct Inner {
    table: Table,
    file: File,
    /// Length of the log up to the last complete line
    len: u64,
}

/// Flat-file implementation of the Storage trait
#[derive(Debug)]
pub struct FlatFileStorage {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl FlatFileStorage {
    /// Open (or create) the account log under `root` and replay it
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, AppError> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        let path = root.join(ACCOUNTS_FILE);

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;

        let mut content = Vec::new();
        file.read_to_end(&mut content)?;

        // A crash mid-append can leave a fragment without its newline
        let complete = content
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        if complete < content.len() {
            warn!(
                path = %path.display(),
                discarded = content.len() - complete,
                "discarding incomplete trailing record"
            );
            file.set_len(complete as u64)?;
        }

        let text = std::str::from_utf8(&content[..complete])
            .map_err(|e| AppError::Storage(format!("{}: {e}", path.display())))?;

        let mut table = Table::default();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = index + 1;
            let account: Account = serde_json::from_str(line).map_err(|e| {
                AppError::Storage(format!("{} line {line_no}: {e}", path.display()))
            })?;
            table.push(account).map_err(|e| match e {
                AppError::Conflict(field) => AppError::Storage(format!(
                    "{} line {line_no}: duplicate {field}",
                    path.display()
                )),
                AppError::Storage(msg) => {
                    AppError::Storage(format!("{} line {line_no}: {msg}", path.display()))
                },
                other => other,
            })?;
        }

        info!(path = %path.display(), accounts = table.rows().len(), "opened account log");

        Ok(Self {
            path,
            inner: RwLock::new(Inner {
                table,
                file,
                len: complete as u64,
            }),
        })
    }

    /// Location of the account log
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FlatFileStorage {
    fn insert(&self, draft: AccountDraft) -> Result<Account, AppError> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let account = inner.table.prepare(draft)?;

        let mut line = serde_json::to_vec(&account)?;
        line.push(b'\n');

        let written = inner
            .file
            .write_all(&line)
            .and_then(|()| inner.file.sync_data());
        if let Err(e) = written {
            // Roll back whatever part of the line reached the file
            if let Err(truncate_err) = inner.file.set_len(inner.len) {
                error!(
                    path = %self.path.display(),
                    error = %truncate_err,
                    "failed to roll back partial account record"
                );
            }
            return Err(e.into());
        }

        inner.len += line.len() as u64;
        inner.table.push(account.clone())?;
        debug!(id = account.id, "appended account record");
        Ok(account)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        Ok(self.inner.read().table.get_by_username(username).cloned())
    }

    fn list_all(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.inner.read().table.rows().to_vec())
    }
}
