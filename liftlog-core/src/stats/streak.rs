//! Consecutive-day workout streaks
//!
//! Operates on the set of distinct session dates across all exercises.
//! Input order and duplicate dates are irrelevant; dates are deduplicated
//! and sorted internally.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

/// Current and longest consecutive-day streaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakStats {
    /// Consecutive days with a session, ending today or yesterday
    pub current: u32,
    /// Longest run of consecutive session days ever seen
    pub longest: u32,
}

/// Calculate streaks from session dates, evaluated as of `today`.
///
/// The current streak anchors at `today` when a session exists today,
/// otherwise at yesterday when a session exists yesterday; with neither it
/// is 0. From the anchor it walks backward one calendar day at a time until
/// the first gap. Any gap of two or more days ends a run.
pub fn calculate_streaks(dates: &[NaiveDate], today: NaiveDate) -> StreakStats {
    let distinct: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    if distinct.is_empty() {
        return StreakStats::default();
    }

    StreakStats {
        current: current_streak(&distinct, today),
        longest: longest_streak(&distinct),
    }
}

fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let anchor = if dates.contains(&today) {
        today
    } else {
        let yesterday = match today.checked_sub_days(Days::new(1)) {
            Some(d) => d,
            None => return 0,
        };
        if dates.contains(&yesterday) {
            yesterday
        } else {
            return 0;
        }
    };

    let mut streak = 0u32;
    let mut day = anchor;
    while dates.contains(&day) {
        streak += 1;
        day = match day.checked_sub_days(Days::new(1)) {
            Some(d) => d,
            None => break,
        };
    }
    streak
}

fn longest_streak(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        run = match previous {
            Some(prev) if (date - prev).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}
