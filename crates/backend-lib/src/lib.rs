// ============================
// login-backend-lib/src/lib.rs
// ============================
//! Core functionality of the login server: account storage, credential checks
//! and the JSON HTTP adapter in front of them.

pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use crate::auth::{AuthRateLimiter, AuthService, DefaultAuth};
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::{FlatFileStorage, Storage};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential service
    pub auth: Arc<dyn AuthService>,
    /// Settings the server was started with
    pub settings: Arc<Settings>,
    /// Failed-login lockouts
    pub rate_limiter: AuthRateLimiter,
}

impl AppState {
    /// Create a new application state over the given storage backend
    pub fn new<S: Storage + 'static>(storage: S, settings: Settings) -> Result<Self, AppError> {
        let auth = Arc::new(DefaultAuth::from_settings(storage, &settings)?);
        Ok(Self::with_auth(auth, settings))
    }

    /// Create a new application state around an existing credential service
    pub fn with_auth(auth: Arc<dyn AuthService>, settings: Settings) -> Self {
        let rate_limiter = AuthRateLimiter::from_settings(&settings.auth);
        Self {
            auth,
            settings: Arc::new(settings),
            rate_limiter,
        }
    }

    /// Create a new application state backed by the flat-file store in `settings.data_dir`
    pub fn open(settings: Settings) -> Result<Self, AppError> {
        let storage = FlatFileStorage::new(&settings.data_dir)?;
        Self::new(storage, settings)
    }
}
