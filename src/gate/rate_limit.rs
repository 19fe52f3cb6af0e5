//! Sliding-window login rate limiting.
//!
//! Failures are tracked per client identifier in one process-wide table.
//! Five failures inside a fifteen minute window lock the identifier out
//! for another fifteen minutes; a successful login clears its record.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

/// Failures are counted within this window from the first failure.
const FAILURE_WINDOW: Duration = Duration::from_secs(15 * 60);

/// How long an identifier stays locked once the threshold is hit.
const LOCKOUT: Duration = Duration::from_secs(15 * 60);

/// Failures within the window that trigger a lockout.
const MAX_FAILURES: u32 = 5;

#[derive(Debug, Clone, Copy)]
struct FailureRecord {
    first_failure_at: u64,
    failure_count: u32,
    locked_until: Option<u64>,
}

impl FailureRecord {
    /// Stale records have an expired lock and a first failure older than
    /// twice the window. They are pruned opportunistically on checks.
    fn is_stale(&self, now: u64) -> bool {
        let lock_expired = self.locked_until.map_or(true, |until| until < now);

        lock_expired && now.saturating_sub(self.first_failure_at) > FAILURE_WINDOW.as_secs() * 2
    }
}

/// Outcome of gating an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimiterDecision {
    Allowed,
    Locked { retry_after_seconds: u64 },
}

/// Outcome of recording a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    Counted,
    LockedOut { retry_after_seconds: u64 },
}

/// Per-identifier failure tracking behind one async mutex, so concurrent
/// failures for the same identifier cannot race past the threshold.
#[derive(Debug, Default)]
pub struct LoginRateLimiter {
    records: Mutex<HashMap<String, FailureRecord>>,
}

impl LoginRateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate an attempt. Never counts anything: only failures move the
    /// state machine.
    pub async fn check_allowed(&self, identifier: &str) -> LimiterDecision {
        self.check_allowed_at(identifier, unix_now()).await
    }

    pub(crate) async fn check_allowed_at(&self, identifier: &str, now: u64) -> LimiterDecision {
        let mut records = self.records.lock().await;

        records.retain(|_, record| !record.is_stale(now));

        let Some(record) = records.get(identifier) else {
            return LimiterDecision::Allowed;
        };

        if let Some(locked_until) = record.locked_until {
            if locked_until > now {
                return LimiterDecision::Locked {
                    retry_after_seconds: locked_until - now,
                };
            }
        }

        // The lock has passed; drop the record once its window has too.
        if now.saturating_sub(record.first_failure_at) > FAILURE_WINDOW.as_secs() {
            records.remove(identifier);
        }

        LimiterDecision::Allowed
    }

    /// Record a failed attempt, locking the identifier on the fifth
    /// failure within the window.
    pub async fn register_failure(&self, identifier: &str) -> FailureOutcome {
        self.register_failure_at(identifier, unix_now()).await
    }

    pub(crate) async fn register_failure_at(&self, identifier: &str, now: u64) -> FailureOutcome {
        let mut records = self.records.lock().await;

        let expired = records.get(identifier).is_some_and(|record| {
            now.saturating_sub(record.first_failure_at) > FAILURE_WINDOW.as_secs()
        });

        if expired {
            records.remove(identifier);
        }

        let record = records
            .entry(identifier.to_string())
            .or_insert(FailureRecord {
                first_failure_at: now,
                failure_count: 0,
                locked_until: None,
            });

        record.failure_count += 1;

        if record.failure_count >= MAX_FAILURES {
            record.failure_count = 0;
            record.first_failure_at = now;
            record.locked_until = Some(now + LOCKOUT.as_secs());

            return FailureOutcome::LockedOut {
                retry_after_seconds: LOCKOUT.as_secs(),
            };
        }

        FailureOutcome::Counted
    }

    /// Forget an identifier after a successful login.
    pub async fn clear_failures(&self, identifier: &str) {
        self.records.lock().await.remove(identifier);
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
