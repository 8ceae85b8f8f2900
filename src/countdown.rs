//! Anniversary countdown.
//!
//! The hero banner counts down to the next occurrence of the wedding's month
//! and day: this year if it is still ahead, otherwise next year. The target
//! instant is midnight (local time) of that day. Remaining time is floored at
//! zero and split into days, hours, minutes and seconds.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Remaining time, decomposed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeLeft {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    /// Whole seconds left until `target`, floored at zero.
    pub fn until(target: NaiveDateTime, now: NaiveDateTime) -> Self {
        let total = (target - now).num_seconds().max(0) as u64;
        Self::from_seconds(total)
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }

    /// Zero-padded `(value, label)` pairs in display order.
    pub fn units(&self) -> [(String, &'static str); 4] {
        [
            (format!("{:02}", self.days), "Days"),
            (format!("{:02}", self.hours), "Hours"),
            (format!("{:02}", self.minutes), "Minutes"),
            (format!("{:02}", self.seconds), "Seconds"),
        ]
    }
}

/// Midnight of `month`/`day` in `year`.
///
/// Days past the end of the month overflow into the next one, so Feb 29 in a
/// non-leap year lands on Mar 1.
fn midnight_of(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first + Duration::days(i64::from(day) - 1);
    date.and_hms_opt(0, 0, 0)
}

/// The next occurrence of `target`'s month/day at or after `now`.
///
/// Uses `now`'s year, rolling to the following year if that instant has
/// already passed.
pub fn next_occurrence(target: NaiveDate, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let this_year = midnight_of(now.year(), target.month(), target.day())?;
    if this_year < now {
        midnight_of(now.year() + 1, target.month(), target.day())
    } else {
        Some(this_year)
    }
}

/// Time left until the next anniversary of `target` as seen from `now`.
pub fn countdown(target: NaiveDate, now: NaiveDateTime) -> TimeLeft {
    next_occurrence(target, now)
        .map(|next| TimeLeft::until(next, now))
        .unwrap_or_default()
}
