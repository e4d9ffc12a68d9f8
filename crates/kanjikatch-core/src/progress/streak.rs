//! Daily review streaks
//!
//! Dates are UTC calendar days. A streak counts consecutive days with at least
//! one completed review. Callers apply [`update_streak`] at most once per day
//! per learner; calling it twice on the same day is a no-op.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SchedulerError};

/// Day-string format used for streak bookkeeping
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Streak counters after a review day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakUpdate {
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Advance the streak counters for a review on `today`
pub fn update_streak(
    last_review_date: Option<NaiveDate>,
    current_streak: u32,
    longest_streak: u32,
    today: NaiveDate,
) -> StreakUpdate {
    let Some(last) = last_review_date else {
        return StreakUpdate {
            current_streak: 1,
            longest_streak: longest_streak.max(1),
        };
    };

    let gap_days = (today - last).num_days();
    match gap_days {
        0 => StreakUpdate {
            current_streak,
            longest_streak,
        },
        1 => {
            let current_streak = current_streak.saturating_add(1);
            debug!(current_streak, "Streak extended");
            StreakUpdate {
                current_streak,
                longest_streak: longest_streak.max(current_streak),
            }
        }
        gap => {
            if gap < 0 {
                warn!(%last, %today, "Last review date is after today; resetting streak");
            } else {
                debug!(gap_days = gap, previous = current_streak, "Streak broken");
            }
            StreakUpdate {
                current_streak: 1,
                longest_streak: longest_streak.max(current_streak),
            }
        }
    }
}

/// String variant of [`update_streak`]
///
/// An empty `last_review_date` counts as absent. Malformed dates are rejected.
pub fn update_streak_str(
    last_review_date: Option<&str>,
    current_streak: u32,
    longest_streak: u32,
    today: &str,
) -> Result<StreakUpdate> {
    let last = match last_review_date {
        Some(s) if !s.is_empty() => Some(parse_review_date(s)?),
        _ => None,
    };
    let today = parse_review_date(today)?;
    Ok(update_streak(last, current_streak, longest_streak, today))
}

/// Parse a `YYYY-MM-DD` calendar day
pub fn parse_review_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| SchedulerError::InvalidDate(format!("'{}': {}", s, e)))
}

/// UTC calendar day of an instant
pub fn review_day(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// UTC calendar day of an instant as `YYYY-MM-DD`
pub fn today_date_string(now: DateTime<Utc>) -> String {
    review_day(now).format(DATE_FORMAT).to_string()
}
