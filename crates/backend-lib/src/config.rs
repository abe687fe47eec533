// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::auth::{HashSettings, PasswordRequirements, ScryptHasher};

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "login.toml";

/// Prefix of environment variable overrides, e.g. `LOGIN_AUTH__LOCKOUT_SECS`
pub const ENV_PREFIX: &str = "LOGIN_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Directory holding the account log
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Mount the account listing route
    pub debug: bool,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
    /// scrypt cost parameters
    pub hashing: HashSettings,
    /// Login behaviour
    pub auth: AuthSettings,
}

/// Login behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Answer 404 for unknown usernames instead of the wrong-password response
    pub reveal_unknown_user: bool,
    /// Failed logins from one address before it is locked out
    pub max_failed_attempts: u32,
    /// Lockout length in seconds
    pub lockout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            debug: false,
            password_requirements: PasswordRequirements::default(),
            hashing: HashSettings::default(),
            auth: AuthSettings::default(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            reveal_unknown_user: false,
            max_failed_attempts: 5,
            lockout_secs: 5 * 60,
        }
    }
}

impl Settings {
    /// Load settings from `login.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings from a specific TOML file and the environment.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings: Settings = Self::figment(path.as_ref()).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!(
                "invalid log level {:?}, expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            );
        }

        if self.password_requirements.min_length == 0 {
            bail!("password_requirements.min_length must be at least 1");
        }

        if let Err(e) = ScryptHasher::new(&self.hashing) {
            bail!("hashing: {e}");
        }

        if self.auth.max_failed_attempts == 0 {
            bail!("auth.max_failed_attempts must be at least 1");
        }

        Ok(())
    }
}

#[cfg(test)]
mod config_tests;
