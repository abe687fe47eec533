use metrics::counter;
use tracing::{debug, info, instrument, warn};

use crate::auth::{verify_password, AuthService, PasswordRequirements, ScryptHasher, MAX_HASH_LENGTH};
use crate::config::Settings;
use crate::error::AppError;
use crate::metrics::{ACCOUNT_CONFLICT, ACCOUNT_REGISTERED, AUTH_FAILURE, AUTH_SUCCESS};
use crate::storage::{Account, AccountDraft, Storage};
use crate::validation;
use login_common::RegisterRequest;

/// Credential service over an injected storage backend
pub struct DefaultAuth<S> {
    storage: S,
    hasher: ScryptHasher,
    requirements: PasswordRequirements,
    /// Verified against when the username is unknown, so both outcomes cost one hash
    decoy_hash: String,
}

impl<S: Storage> DefaultAuth<S> {
    pub fn new(
        storage: S,
        hasher: ScryptHasher,
        requirements: PasswordRequirements,
    ) -> Result<Self, AppError> {
        let decoy_hash = hasher.hash("decoy password for unknown users")?;
        Ok(Self {
            storage,
            hasher,
            requirements,
            decoy_hash,
        })
    }

    /// Build the service with the hashing and password policy from `settings`
    pub fn from_settings(storage: S, settings: &Settings) -> Result<Self, AppError> {
        let hasher = ScryptHasher::new(&settings.hashing)?;
        Self::new(storage, hasher, settings.password_requirements.clone())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn hash_for_storage(&self, password: &str) -> Result<String, AppError> {
        let pw_hash = self.hasher.hash(password)?;

        if pw_hash.is_empty() || pw_hash == password {
            return Err(AppError::Internal(
                "password hash is empty or equal to the input".to_string(),
            ));
        }
        if pw_hash.len() > MAX_HASH_LENGTH {
            return Err(AppError::Internal(format!(
                "password hash is {} characters, limit is {MAX_HASH_LENGTH}",
                pw_hash.len()
            )));
        }

        Ok(pw_hash)
    }
}

impl<S: Storage> AuthService for DefaultAuth<S> {
    #[instrument(skip_all, fields(username = %form.username))]
    fn register(&self, form: &RegisterRequest) -> Result<Account, AppError> {
        validation::validate_registration(form, &self.requirements)?;

        let pw_hash = self.hash_for_storage(&form.password)?;
        let draft = AccountDraft {
            username: form.username.clone(),
            email: form.email.clone(),
            pw_hash,
        };

        match self.storage.insert(draft) {
            Ok(account) => {
                counter!(ACCOUNT_REGISTERED).increment(1);
                info!(id = account.id, "account registered");
                Ok(account)
            },
            Err(AppError::Conflict(field)) => {
                counter!(ACCOUNT_CONFLICT).increment(1);
                warn!(%field, "registration rejected, value already taken");
                Err(AppError::Conflict(field))
            },
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, password))]
    fn authenticate(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let Some(account) = self.storage.find_by_username(username)? else {
            verify_password(&self.decoy_hash, password);
            counter!(AUTH_FAILURE).increment(1);
            debug!("no account with this username");
            return Err(AppError::NotFound(format!("account {username}")));
        };

        let matched = verify_password(&account.pw_hash, password);
        if matched {
            counter!(AUTH_SUCCESS).increment(1);
            info!(id = account.id, "authentication succeeded");
        } else {
            counter!(AUTH_FAILURE).increment(1);
            warn!(id = account.id, "authentication failed: wrong password");
        }

        Ok(matched)
    }

    fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        self.storage.list_all()
    }
}
