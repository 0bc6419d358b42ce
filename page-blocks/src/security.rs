//! Two-factor enrollment grace period
//!
//! New admin accounts may sign in without two-factor authentication for a
//! limited window. The admin security tab shows how much of that window is
//! used and blocks sign-in once it has run out.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::{SecurityConfig, MAX_GRACE_PERIOD_DAYS};

const SECONDS_PER_DAY: i64 = 86_400;

/// Where an account stands with two-factor enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TwoFactorStatus {
    /// Two-factor is set up
    Enrolled,
    /// Inside the window, no warning yet
    #[serde(rename_all = "camelCase")]
    Optional {
        days_remaining: u32,
        percent_elapsed: u8,
    },
    /// Inside the warning part of the window
    #[serde(rename_all = "camelCase")]
    ExpiringSoon {
        days_remaining: u32,
        percent_elapsed: u8,
    },
    /// Window is over; enrollment is mandatory
    Required,
}

impl TwoFactorStatus {
    pub fn must_enroll(&self) -> bool {
        matches!(self, TwoFactorStatus::Required)
    }
}

/// Grace window for one account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GracePeriod {
    pub started_at: DateTime<Utc>,
    pub length: Duration,
    pub warning: Duration,
}

impl GracePeriod {
    /// Window lengths are capped at [`MAX_GRACE_PERIOD_DAYS`]
    pub fn new(started_at: DateTime<Utc>, days: u32, warning_days: u32) -> Self {
        let days = days.min(MAX_GRACE_PERIOD_DAYS);
        Self {
            started_at,
            length: Duration::days(i64::from(days)),
            warning: Duration::days(i64::from(warning_days.min(days))),
        }
    }

    pub fn from_config(started_at: DateTime<Utc>, config: &SecurityConfig) -> Self {
        Self::new(started_at, config.grace_period_days, config.warning_days)
    }

    /// End of the window; saturates at the latest representable time
    pub fn deadline(&self) -> DateTime<Utc> {
        self.started_at
            .checked_add_signed(self.length)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Share of the window that has passed, 0..=100
    pub fn percent_elapsed(&self, now: DateTime<Utc>) -> u8 {
        let total = self.length.num_seconds();
        if total <= 0 {
            return 100;
        }
        let elapsed = (now - self.started_at).num_seconds().clamp(0, total);
        ((elapsed * 100) / total) as u8
    }

    /// Whole days left, rounded up; 0 once the deadline has passed
    pub fn days_remaining(&self, now: DateTime<Utc>) -> u32 {
        let remaining = (self.deadline() - now).num_seconds();
        if remaining <= 0 {
            return 0;
        }
        ((remaining + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY) as u32
    }

    pub fn status(&self, enrolled: bool, now: DateTime<Utc>) -> TwoFactorStatus {
        if enrolled {
            return TwoFactorStatus::Enrolled;
        }
        if now >= self.deadline() {
            return TwoFactorStatus::Required;
        }

        let days_remaining = self.days_remaining(now);
        let percent_elapsed = self.percent_elapsed(now);
        if self.deadline() - now <= self.warning {
            TwoFactorStatus::ExpiringSoon {
                days_remaining,
                percent_elapsed,
            }
        } else {
            TwoFactorStatus::Optional {
                days_remaining,
                percent_elapsed,
            }
        }
    }
}
