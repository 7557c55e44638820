// ABOUTME: The single authoritative reminder scheduling decision
// ABOUTME: Computes whole days since the last coach session against the user's cadence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # Reminder Scheduling
//!
//! One decision function owns "is a coach reminder due". The original product
//! computed this both client-side and in a scheduled job with near-duplicate
//! logic and drifting thresholds; here every caller (the email job and any
//! in-app surface) consults the same function, so the thresholds cannot
//! diverge.

use crate::models::ReminderFrequency;
use chrono::{DateTime, Utc};

/// Days without a session before a daily-cadence reminder is due
const DAILY_THRESHOLD_DAYS: i64 = 1;
/// Days without a session before a weekly-cadence reminder is due
const WEEKLY_THRESHOLD_DAYS: i64 = 7;

/// Whole days elapsed between two instants (floor)
#[must_use]
pub fn days_since(earlier: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - earlier).num_days()
}

/// Decide whether a coach reminder is due
///
/// A user who has never had a session is always due (unless reminders are
/// off). Otherwise the user is due once the whole days elapsed since the
/// last session reach the cadence threshold.
#[must_use]
pub fn reminder_due(
    last_session: Option<DateTime<Utc>>,
    frequency: ReminderFrequency,
    now: DateTime<Utc>,
) -> bool {
    if frequency == ReminderFrequency::None {
        return false;
    }

    let Some(last) = last_session else {
        return true;
    };

    let elapsed = days_since(last, now);
    match frequency {
        ReminderFrequency::None => false,
        ReminderFrequency::Daily => elapsed >= DAILY_THRESHOLD_DAYS,
        ReminderFrequency::Weekly => elapsed >= WEEKLY_THRESHOLD_DAYS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-08-30T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn never_had_a_session_is_always_due() {
        assert!(reminder_due(None, ReminderFrequency::Daily, now()));
        assert!(reminder_due(None, ReminderFrequency::Weekly, now()));
    }

    #[test]
    fn none_frequency_is_never_due() {
        assert!(!reminder_due(None, ReminderFrequency::None, now()));
        assert!(!reminder_due(
            Some(now() - Duration::days(365)),
            ReminderFrequency::None,
            now()
        ));
    }

    #[test]
    fn daily_cadence_triggers_after_one_whole_day() {
        let freq = ReminderFrequency::Daily;
        assert!(!reminder_due(Some(now() - Duration::hours(23)), freq, now()));
        assert!(reminder_due(Some(now() - Duration::hours(24)), freq, now()));
        assert!(reminder_due(Some(now() - Duration::days(3)), freq, now()));
    }

    #[test]
    fn weekly_cadence_triggers_after_seven_whole_days() {
        let freq = ReminderFrequency::Weekly;
        assert!(!reminder_due(
            Some(now() - Duration::days(7) + Duration::hours(1)),
            freq,
            now()
        ));
        assert!(reminder_due(Some(now() - Duration::days(7)), freq, now()));
    }
}
