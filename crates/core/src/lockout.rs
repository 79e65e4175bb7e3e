//! Failed-login counter and temporary account lockout.
//!
//! The state is a plain value ([`LoginLockout`]) and every transition is a pure
//! function of `(state, policy, now)`. The repository layer applies the result
//! while holding the user row lock, so concurrent failures cannot lose updates.

use chrono::Duration;

use crate::types::Timestamp;

/// Default number of consecutive failures that triggers a lock.
pub const DEFAULT_MAX_ATTEMPTS: i32 = 5;

/// Default lock duration in minutes (2 hours).
pub const DEFAULT_LOCK_DURATION_MINS: i64 = 120;

/// Threshold and duration for account lockout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    pub max_attempts: i32,
    pub lock_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            lock_duration: Duration::minutes(DEFAULT_LOCK_DURATION_MINS),
        }
    }
}

/// The `(login_attempts, lock_until)` columns of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoginLockout {
    pub attempts: i32,
    pub lock_until: Option<Timestamp>,
}

impl LoginLockout {
    /// True iff a lock is set and still in the future.
    pub fn is_locked(&self, now: Timestamp) -> bool {
        self.lock_until.is_some_and(|until| until > now)
    }

    /// State after one more failed login.
    ///
    /// An expired lock restarts the counter at 1. Otherwise the counter is
    /// incremented and, on reaching the threshold while unlocked, the account
    /// is locked for `policy.lock_duration`.
    pub fn register_failure(&self, policy: &LockoutPolicy, now: Timestamp) -> Self {
        if self.lock_until.is_some_and(|until| until <= now) {
            return Self {
                attempts: 1,
                lock_until: None,
            };
        }

        let attempts = self.attempts.saturating_add(1);
        let lock_until = if attempts >= policy.max_attempts && !self.is_locked(now) {
            Some(now + policy.lock_duration)
        } else {
            self.lock_until
        };

        Self {
            attempts,
            lock_until,
        }
    }

    /// State after a successful login.
    pub fn reset() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn fail_n(mut state: LoginLockout, n: usize, now: Timestamp) -> LoginLockout {
        let policy = LockoutPolicy::default();
        for _ in 0..n {
            state = state.register_failure(&policy, now);
        }
        state
    }

    #[test]
    fn four_failures_stay_unlocked() {
        let now = Utc::now();
        let state = fail_n(LoginLockout::default(), 4, now);
        assert_eq!(state.attempts, 4);
        assert_eq!(state.lock_until, None);
        assert!(!state.is_locked(now));
    }

    #[test]
    fn fifth_failure_locks_for_policy_duration() {
        let now = Utc::now();
        let state = fail_n(LoginLockout::default(), 5, now);
        assert_eq!(state.attempts, 5);
        assert_eq!(state.lock_until, Some(now + Duration::hours(2)));
        assert!(state.is_locked(now));
    }

    #[test]
    fn failure_after_expiry_restarts_counter() {
        let now = Utc::now();
        let locked = fail_n(LoginLockout::default(), 5, now);
        let later = now + Duration::hours(2) + Duration::seconds(1);
        assert!(!locked.is_locked(later));

        let state = locked.register_failure(&LockoutPolicy::default(), later);
        assert_eq!(state.attempts, 1);
        assert_eq!(state.lock_until, None);
    }

    #[test]
    fn failures_while_locked_do_not_extend_lock() {
        let now = Utc::now();
        let locked = fail_n(LoginLockout::default(), 5, now);
        let soon = now + Duration::minutes(10);
        let state = locked.register_failure(&LockoutPolicy::default(), soon);
        assert_eq!(state.attempts, 6);
        assert_eq!(state.lock_until, locked.lock_until);
    }

    #[test]
    fn custom_policy_threshold() {
        let now = Utc::now();
        let policy = LockoutPolicy {
            max_attempts: 2,
            lock_duration: Duration::minutes(5),
        };
        let state = LoginLockout::default()
            .register_failure(&policy, now)
            .register_failure(&policy, now);
        assert_eq!(state.lock_until, Some(now + Duration::minutes(5)));
    }

    #[test]
    fn reset_clears_everything() {
        assert_eq!(LoginLockout::reset(), LoginLockout::default());
    }
}
