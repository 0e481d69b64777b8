//! Session comparator
//!
//! Structured diff between two [`SessionAggregate`]s: per-metric percentage
//! deltas plus a per-exercise union diff tagging each exercise as new,
//! dropped, or changed.

use crate::stats::aggregate::SessionAggregate;
use serde::Serialize;
use std::collections::BTreeSet;

/// One numeric metric compared across the two aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDelta {
    pub value_a: f64,
    pub value_b: f64,
    /// Percent change from a to b; defined as 0 whenever `value_a == 0`
    pub percent_change: f64,
}

impl MetricDelta {
    /// Compare two values with the zero-base masking contract: a metric
    /// appearing from nothing reads as 0% rather than undefined.
    pub fn between(value_a: f64, value_b: f64) -> Self {
        let percent_change = if value_a == 0.0 {
            0.0
        } else {
            (value_b - value_a) / value_a * 100.0
        };
        Self {
            value_a,
            value_b,
            percent_change,
        }
    }
}

/// How one exercise differs between the earlier and later aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExerciseChange {
    /// Present only in the later aggregate
    New,
    /// Present only in the earlier aggregate
    Dropped,
    /// Present in both; max-weight percent change with zero-base masking
    Changed { percent_change: f64 },
}

/// Per-exercise entry of the comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseComparison {
    pub exercise: String,
    pub change: ExerciseChange,
}

/// Full structured diff between two aggregated sessions or windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionComparison {
    pub total_volume: MetricDelta,
    pub total_sets: MetricDelta,
    pub total_reps: MetricDelta,
    pub average_weight: MetricDelta,
    pub exercise_count: MetricDelta,
    /// Union of exercises from both sides, alphabetical
    pub exercises: Vec<ExerciseComparison>,
}

/// Compare an earlier aggregate (`a`) with a later one (`b`).
pub fn compare_sessions(a: &SessionAggregate, b: &SessionAggregate) -> SessionComparison {
    let names: BTreeSet<&String> = a
        .max_weight_by_exercise
        .keys()
        .chain(b.max_weight_by_exercise.keys())
        .collect();

    let exercises = names
        .into_iter()
        .map(|name| {
            let change = match (
                a.max_weight_by_exercise.get(name),
                b.max_weight_by_exercise.get(name),
            ) {
                (None, Some(_)) => ExerciseChange::New,
                (Some(_), None) => ExerciseChange::Dropped,
                (Some(&weight_a), Some(&weight_b)) => ExerciseChange::Changed {
                    percent_change: MetricDelta::between(weight_a, weight_b).percent_change,
                },
                // Unreachable for union members, treated as new for safety
                (None, None) => ExerciseChange::New,
            };
            ExerciseComparison {
                exercise: name.clone(),
                change,
            }
        })
        .collect();

    SessionComparison {
        total_volume: MetricDelta::between(a.total_volume, b.total_volume),
        total_sets: MetricDelta::between(a.total_sets as f64, b.total_sets as f64),
        total_reps: MetricDelta::between(a.total_reps as f64, b.total_reps as f64),
        average_weight: MetricDelta::between(a.average_weight, b.average_weight),
        exercise_count: MetricDelta::between(a.exercise_count as f64, b.exercise_count as f64),
        exercises,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn aggregate(volume: f64, exercises: &[(&str, f64)]) -> SessionAggregate {
        SessionAggregate {
            total_volume: volume,
            total_sets: 10,
            total_reps: 50,
            average_weight: 80.0,
            exercise_count: exercises.len() as u64,
            max_weight_by_exercise: exercises
                .iter()
                .map(|(name, w)| (name.to_string(), *w))
                .collect::<BTreeMap<String, f64>>(),
        }
    }

    #[test]
    fn test_percent_change() {
        let delta = MetricDelta::between(1000.0, 1100.0);
        assert!((delta.percent_change - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_base_masks_to_zero() {
        // Documented masking behavior, not undefined/NaN
        let delta = MetricDelta::between(0.0, 500.0);
        assert_eq!(delta.percent_change, 0.0);
        assert_eq!(delta.value_b, 500.0);
    }

    #[test]
    fn test_exercise_union_tags() {
        let a = aggregate(1000.0, &[("Bench Press", 80.0), ("Squat", 100.0)]);
        let b = aggregate(1100.0, &[("Squat", 110.0), ("Deadlift", 140.0)]);

        let cmp = compare_sessions(&a, &b);
        let by_name: BTreeMap<&str, &ExerciseChange> = cmp
            .exercises
            .iter()
            .map(|e| (e.exercise.as_str(), &e.change))
            .collect();

        assert_eq!(by_name["Bench Press"], &ExerciseChange::Dropped);
        assert_eq!(by_name["Deadlift"], &ExerciseChange::New);
        match by_name["Squat"] {
            ExerciseChange::Changed { percent_change } => {
                assert!((percent_change - 10.0).abs() < 1e-9);
            }
            other => panic!("expected Changed, got {:?}", other),
        }
    }

    #[test]
    fn test_bodyweight_exercises_kept_in_union() {
        // A bodyweight-only exercise carries a zero max weight but must
        // still be tagged like any other union member.
        let a = aggregate(900.0, &[("Pull-up", 0.0)]);
        let b = aggregate(1100.0, &[("Barbell Row", 60.0)]);

        let cmp = compare_sessions(&a, &b);
        let by_name: BTreeMap<&str, &ExerciseChange> = cmp
            .exercises
            .iter()
            .map(|e| (e.exercise.as_str(), &e.change))
            .collect();

        assert_eq!(by_name["Pull-up"], &ExerciseChange::Dropped);
        assert_eq!(by_name["Barbell Row"], &ExerciseChange::New);
    }

    #[test]
    fn test_bodyweight_on_both_sides_masks_to_zero_change() {
        let a = aggregate(900.0, &[("Pull-up", 0.0)]);
        let b = aggregate(950.0, &[("Pull-up", 0.0)]);

        let cmp = compare_sessions(&a, &b);
        assert_eq!(cmp.exercises.len(), 1);
        assert_eq!(
            cmp.exercises[0].change,
            ExerciseChange::Changed {
                percent_change: 0.0
            }
        );
    }

    #[test]
    fn test_session_metrics_compared() {
        let a = aggregate(1000.0, &[("Squat", 100.0)]);
        let b = aggregate(1100.0, &[("Squat", 100.0)]);

        let cmp = compare_sessions(&a, &b);
        assert!((cmp.total_volume.percent_change - 10.0).abs() < 1e-9);
        assert_eq!(cmp.total_sets.percent_change, 0.0);
        assert_eq!(cmp.exercise_count.value_a, 1.0);
    }

    #[test]
    fn test_empty_sides() {
        let empty = SessionAggregate::default();
        let b = aggregate(500.0, &[("Squat", 100.0)]);

        let cmp = compare_sessions(&empty, &b);
        assert_eq!(cmp.total_volume.percent_change, 0.0);
        assert_eq!(cmp.exercises.len(), 1);
        assert_eq!(cmp.exercises[0].change, ExerciseChange::New);
    }
}
