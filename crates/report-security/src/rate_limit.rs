//! Submission guard: a per-user sliding-window throttle.
//!
//! Each user may send at most `max_attempts` reports within any trailing
//! `interval_ms` window. State is a JSON array of millisecond timestamps kept
//! in a [`KeyValueStore`] under `denunciaSubmissions_<userId>`.
//!
//! # Failure behaviour
//!
//! Unreadable or corrupt state is treated as an empty history: the guard
//! fails open and logs a warning rather than blocking the user.
//!
//! # Known limitation
//!
//! [`SubmissionGuard::can_submit`] and [`SubmissionGuard::record_submission`]
//! are separate read-modify-write steps over shared storage. Two clients
//! (two browser tabs, two CLI processes) acting for the same user can both
//! pass the check before either records, so the limit may be exceeded under
//! concurrent use. This is a UX throttle, not a security control; the
//! server side is authoritative.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Prefix of the per-user storage key
pub const STORAGE_KEY_PREFIX: &str = "denunciaSubmissions";

/// Configuration for the submission guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum number of submissions allowed in the window.
    pub max_attempts: u32,

    /// Size of the sliding window in milliseconds.
    pub interval_ms: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            // 3 reports per 5 minutes
            max_attempts: 3,
            interval_ms: 300_000,
        }
    }
}

/// Outcome of a throttle check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    pub is_allowed: bool,
    /// Whole seconds until the next submission is allowed (0 when allowed)
    pub wait_seconds: u64,
    /// Epoch milliseconds of the next allowed submission (0 when allowed)
    pub next_allowed_time: i64,
}

impl RateLimitInfo {
    pub fn allowed() -> Self {
        Self {
            is_allowed: true,
            wait_seconds: 0,
            next_allowed_time: 0,
        }
    }
}

/// Per-user sliding-window throttle over local state
pub struct SubmissionGuard<S, C = SystemClock> {
    store: S,
    clock: C,
    config: RateLimitConfig,
}

impl<S: KeyValueStore> SubmissionGuard<S, SystemClock> {
    /// Guard using the system clock
    pub fn new(store: S, config: RateLimitConfig) -> Self {
        Self::with_clock(store, config, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> SubmissionGuard<S, C> {
    /// Guard using a caller-supplied clock
    pub fn with_clock(store: S, config: RateLimitConfig, clock: C) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Storage key for a user
    pub fn storage_key(user_id: &str) -> String {
        format!("{}_{}", STORAGE_KEY_PREFIX, user_id)
    }

    /// Check whether `user_id` may submit now
    pub fn can_submit(&self, user_id: &str) -> RateLimitInfo {
        let now = self.clock.now_millis();
        let recent = self.recent(self.load(user_id), now);

        if recent.len() < self.config.max_attempts as usize {
            return RateLimitInfo::allowed();
        }

        let oldest = recent.iter().copied().min().unwrap_or(now);
        let next_allowed_time = oldest.saturating_add(self.config.interval_ms);
        let remaining_ms = next_allowed_time.saturating_sub(now).max(0) as u64;
        let wait_seconds = remaining_ms.div_ceil(1000);

        tracing::info!(
            user_id = %user_id,
            submissions = recent.len(),
            max = self.config.max_attempts,
            wait_seconds,
            "Submission throttled"
        );

        RateLimitInfo {
            is_allowed: false,
            wait_seconds,
            next_allowed_time,
        }
    }

    /// Submissions left in the current window
    pub fn remaining_attempts(&self, user_id: &str) -> u32 {
        let now = self.clock.now_millis();
        let used = self.recent(self.load(user_id), now).len() as u32;
        self.config.max_attempts.saturating_sub(used)
    }

    /// Record a dispatched submission for `user_id`
    ///
    /// Call only after the report was confirmed sent and the last
    /// [`can_submit`](Self::can_submit) allowed it; the guard does not
    /// re-check.
    pub fn record_submission(&self, user_id: &str) -> Result<()> {
        let now = self.clock.now_millis();
        let mut submissions = self.load(user_id);
        submissions.push(now);
        let retained = self.recent(submissions, now);

        self.store
            .set(&Self::storage_key(user_id), &serde_json::to_string(&retained)?)?;

        tracing::debug!(
            user_id = %user_id,
            retained = retained.len(),
            "Submission recorded"
        );
        Ok(())
    }

    /// Forget every stored submission for `user_id`
    pub fn clear_history(&self, user_id: &str) -> Result<()> {
        self.store.remove(&Self::storage_key(user_id))?;
        tracing::debug!(user_id = %user_id, "Submission history cleared");
        Ok(())
    }

    /// Stored timestamps for `user_id`, oldest first; empty on any failure
    pub fn history(&self, user_id: &str) -> Vec<i64> {
        self.load(user_id)
    }

    /// Timestamps inside the window; negative or future entries are corrupt
    /// and dropped
    fn recent(&self, submissions: Vec<i64>, now: i64) -> Vec<i64> {
        let total = submissions.len();
        let recent: Vec<i64> = submissions
            .into_iter()
            .filter(|t| (0..=now).contains(t))
            .filter(|t| now - t < self.config.interval_ms)
            .collect();

        if recent.len() < total {
            tracing::trace!(dropped = total - recent.len(), "Pruned submission history");
        }
        recent
    }

    fn load(&self, user_id: &str) -> Vec<i64> {
        let key = Self::storage_key(user_id);

        let stored = match self.store.get(&key) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    error = %e,
                    "Submission history unreadable, treating as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<i64>>(&stored) {
            Ok(submissions) => submissions,
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    error = %e,
                    "Submission history corrupt, treating as empty"
                );
                Vec::new()
            }
        }
    }
}
