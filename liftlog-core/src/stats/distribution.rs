//! Distribution calculator
//!
//! Percentage breakdowns of training effort: muscle groups by share of
//! total logged sets, workout types by share of distinct sessions.

use crate::types::LogEntry;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Bucket label used when a row carries no muscle group.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// One bucket of a percentage breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlice {
    pub label: String,
    pub count: u64,
    /// Share of the grand total, 0–100
    pub percent: f64,
}

/// Share of total sets per muscle group.
///
/// Rows without a muscle group land in their own [`UNKNOWN_GROUP`] bucket
/// rather than being discarded. Buckets are sorted by count descending,
/// label ascending for ties.
pub fn muscle_group_distribution(entries: &[LogEntry]) -> Vec<DistributionSlice> {
    let mut sets_by_group: BTreeMap<String, u64> = BTreeMap::new();
    for entry in entries {
        let group = entry
            .muscle_group
            .clone()
            .unwrap_or_else(|| UNKNOWN_GROUP.to_string());
        *sets_by_group.entry(group).or_insert(0) += u64::from(entry.sets);
    }
    to_slices(sets_by_group)
}

/// Share of distinct sessions per workout type.
///
/// A session is a distinct `(session_date, workout_type)` pair.
pub fn workout_type_distribution(entries: &[LogEntry]) -> Vec<DistributionSlice> {
    let sessions: BTreeSet<(NaiveDate, &str)> = entries
        .iter()
        .map(|e| (e.session_date, e.workout_type.display_name()))
        .collect();

    let mut count_by_type: BTreeMap<String, u64> = BTreeMap::new();
    for (_, workout_type) in sessions {
        *count_by_type.entry(workout_type.to_string()).or_insert(0) += 1;
    }
    to_slices(count_by_type)
}

fn to_slices(counts: BTreeMap<String, u64>) -> Vec<DistributionSlice> {
    let total: u64 = counts.values().sum();
    let mut slices: Vec<DistributionSlice> = counts
        .into_iter()
        .map(|(label, count)| DistributionSlice {
            label,
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect();

    slices.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    slices
}
