// ============================
// crates/backend-lib/src/auth/rate_limit.rs
// ============================
//! Lockout of client addresses after repeated failed logins.

use dashmap::DashMap;
use metrics::counter;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::AuthSettings;
use crate::metrics::AUTH_LOCKED_OUT;

/// How long failure history is kept for an address that never got locked out
const FAILURE_MEMORY: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct FailureRecord {
    failed_attempts: u32,
    last_failure: Instant,
    locked_until: Option<Instant>,
}

/// Failed-login tracker keyed by client address
#[derive(Debug, Clone)]
pub struct AuthRateLimiter {
    attempts: Arc<DashMap<IpAddr, FailureRecord>>,
    max_attempts: u32,
    lockout_duration: Duration,
}

impl AuthRateLimiter {
    pub fn new(max_attempts: u32, lockout_duration: Duration) -> Self {
        Self {
            attempts: Arc::new(DashMap::new()),
            max_attempts,
            lockout_duration,
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.max_failed_attempts,
            Duration::from_secs(settings.lockout_secs),
        )
    }

    /// Reserve one login attempt for `ip`, or refuse it while the address is locked out.
    ///
    /// The attempt counts as a failure from the moment it is reserved; a correct
    /// password clears the record through [`AuthRateLimiter::record_success`].
    /// Check and count happen under one map entry lock, so concurrent requests
    /// from one address can never evaluate more than `max_attempts` passwords.
    pub fn try_begin_attempt(&self, ip: IpAddr) -> bool {
        let now = Instant::now();

        let mut entry = self.attempts.entry(ip).or_insert_with(|| FailureRecord {
            failed_attempts: 0,
            last_failure: now,
            locked_until: None,
        });

        let locked_until = entry.locked_until;
        match locked_until {
            Some(until) if now < until => return false,
            // An expired lockout starts a fresh count
            Some(_) => {
                entry.failed_attempts = 0;
                entry.locked_until = None;
            },
            None => {},
        }

        entry.failed_attempts += 1;
        entry.last_failure = now;

        if entry.failed_attempts >= self.max_attempts {
            entry.locked_until = Some(now + self.lockout_duration);
            counter!(AUTH_LOCKED_OUT).increment(1);
            warn!(%ip, attempts = entry.failed_attempts, "client locked out after failed logins");
        }
        true
    }

    /// Record a successful authentication
    pub fn record_success(&self, ip: IpAddr) {
        self.attempts.remove(&ip);
    }

    /// Drop expired lockouts and stale failure history
    pub fn cleanup(&self) {
        let now = Instant::now();

        self.attempts.retain(|_, entry| match entry.locked_until {
            Some(until) => now < until,
            None => now.duration_since(entry.last_failure) < FAILURE_MEMORY,
        });
    }

    /// Run [`AuthRateLimiter::cleanup`] every `period` on the current runtime
    pub fn spawn_cleanup(&self, period: Duration) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                limiter.cleanup();
            }
        })
    }

    /// Number of addresses with failure history
    pub fn tracked(&self) -> usize {
        self.attempts.len()
    }
}
