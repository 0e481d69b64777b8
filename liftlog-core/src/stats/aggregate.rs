//! Volume and set aggregation
//!
//! Folds [`LogEntry`] sequences into per-exercise and per-session totals.
//! Aggregation is a pure fold into an explicit accumulator per key; nothing
//! here touches storage.
//!
//! Defensive-arithmetic contract: zero-set/zero-rep rows contribute nothing,
//! zero weight is bodyweight (excluded from weight averages and maxima, kept
//! in set/rep totals), and every division has a defined zero-denominator
//! result.

use crate::stats::trend::{classify_trend, TrendConfig};
use crate::types::{ExerciseName, ExerciseStats, LogEntry};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Running accumulator for one exercise.
#[derive(Debug, Clone, Default)]
pub struct ExerciseAccumulator {
    exercise_name: Option<ExerciseName>,
    total_sets: u64,
    total_reps: u64,
    total_volume: f64,
    weight_sum: f64,
    weighted_rows: u64,
    max_weight: f64,
    session_dates: BTreeSet<NaiveDate>,
    /// Positive-weight samples with their dates, for trend classification
    weight_samples: Vec<(NaiveDate, f64)>,
}

impl ExerciseAccumulator {
    /// Fold one entry into the accumulator.
    pub fn fold(mut self, entry: &LogEntry) -> Self {
        if self.exercise_name.is_none() {
            self.exercise_name = Some(entry.exercise_name.clone());
        }

        self.total_sets += u64::from(entry.sets);
        self.total_reps += entry.total_reps();
        self.total_volume += entry.volume();
        self.session_dates.insert(entry.session_date);

        if entry.weight_kg > 0.0 {
            self.weight_sum += entry.weight_kg;
            self.weighted_rows += 1;
            self.max_weight = self.max_weight.max(entry.weight_kg);
            self.weight_samples.push((entry.session_date, entry.weight_kg));
        }

        self
    }

    /// Finish the fold and derive the exercise statistics.
    pub fn finish(mut self, exercise_id: String, trend: &TrendConfig) -> ExerciseStats {
        let avg_weight = if self.weighted_rows > 0 {
            self.weight_sum / self.weighted_rows as f64
        } else {
            0.0
        };

        let first_performed = self.session_dates.iter().next().copied();
        let last_performed = self.session_dates.iter().next_back().copied();
        let total_sessions = self.session_dates.len() as u64;

        // Trend over weight samples in chronological order. Sort is stable,
        // so same-day samples keep their log order.
        self.weight_samples.sort_by_key(|(date, _)| *date);
        let samples: Vec<f64> = self.weight_samples.iter().map(|(_, w)| *w).collect();
        let trend = classify_trend(&samples, trend);

        ExerciseStats {
            exercise_id,
            exercise_name: self.exercise_name.unwrap_or(ExerciseName::Unknown),
            total_sessions,
            total_sets: self.total_sets,
            total_reps: self.total_reps,
            total_volume: self.total_volume,
            avg_weight,
            max_weight: self.max_weight,
            first_performed,
            last_performed,
            trend,
            usage_frequency: usage_frequency(total_sessions, first_performed, last_performed),
        }
    }
}

/// Sessions per 7-day period over the observed span.
///
/// The denominator has a 1-day minimum, so a single session date yields a
/// degenerate but deterministic 7.0 rather than a division by zero.
pub fn usage_frequency(
    total_sessions: u64,
    first_performed: Option<NaiveDate>,
    last_performed: Option<NaiveDate>,
) -> f64 {
    if total_sessions == 0 {
        return 0.0;
    }
    let span_days = match (first_performed, last_performed) {
        (Some(first), Some(last)) => (last - first).num_days().max(1),
        _ => 1,
    };
    total_sessions as f64 / span_days as f64 * 7.0
}

/// Aggregate statistics for one exercise from entries already restricted to
/// that exercise and date window.
pub fn aggregate_exercise(
    exercise_id: &str,
    entries: &[LogEntry],
    trend: &TrendConfig,
) -> ExerciseStats {
    entries
        .iter()
        .filter(|e| e.exercise_id == exercise_id)
        .fold(ExerciseAccumulator::default(), |acc, e| acc.fold(e))
        .finish(exercise_id.to_string(), trend)
}

/// Aggregate every exercise present in the entry sequence.
///
/// Keys are exercise ids; the map is ordered so iteration is deterministic.
pub fn aggregate_by_exercise(
    entries: &[LogEntry],
    trend: &TrendConfig,
) -> BTreeMap<String, ExerciseStats> {
    let mut accumulators: BTreeMap<String, ExerciseAccumulator> = BTreeMap::new();
    for entry in entries {
        let acc = accumulators.remove(&entry.exercise_id).unwrap_or_default();
        accumulators.insert(entry.exercise_id.clone(), acc.fold(entry));
    }

    accumulators
        .into_iter()
        .map(|(id, acc)| {
            let stats = acc.finish(id.clone(), trend);
            (id, stats)
        })
        .collect()
}

/// Whole-session (or date-window) aggregate used by the comparator.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SessionAggregate {
    pub total_volume: f64,
    pub total_sets: u64,
    pub total_reps: u64,
    /// Mean over positive-weight entries only; 0 when none exist
    pub average_weight: f64,
    /// Count of distinct exercises seen
    pub exercise_count: u64,
    /// Max weight per exercise display name, for per-exercise diffs.
    /// Every exercise seen gets an entry; bodyweight-only exercises stay at 0.
    pub max_weight_by_exercise: BTreeMap<String, f64>,
}

/// Fold a whole entry sequence into a session aggregate.
pub fn aggregate_session(entries: &[LogEntry]) -> SessionAggregate {
    let mut agg = SessionAggregate::default();
    let mut weight_sum = 0.0;
    let mut weighted_rows = 0u64;
    let mut exercises: BTreeSet<String> = BTreeSet::new();

    for entry in entries {
        agg.total_sets += u64::from(entry.sets);
        agg.total_reps += entry.total_reps();
        agg.total_volume += entry.volume();
        exercises.insert(entry.exercise_id.clone());

        // Every exercise participates in the comparison union, bodyweight
        // included; only positive weights move the max and the average.
        let name = entry.exercise_name.display_name().to_string();
        let max = agg.max_weight_by_exercise.entry(name).or_insert(0.0);

        if entry.weight_kg > 0.0 {
            weight_sum += entry.weight_kg;
            weighted_rows += 1;
            *max = max.max(entry.weight_kg);
        }
    }

    agg.average_weight = if weighted_rows > 0 {
        weight_sum / weighted_rows as f64
    } else {
        0.0
    };
    agg.exercise_count = exercises.len() as u64;
    agg
}
