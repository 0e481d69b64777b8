//! Log normalizer
//!
//! Raw log rows arrive in different shapes depending on which query produced
//! them: some carry the exercise attributes inline, some carry them as an
//! optional joined sub-record that may be absent entirely. This module
//! converts either shape into the canonical [`LogEntry`] sequence.
//!
//! Normalization is a pure transformation. It does **not** filter: rows with
//! `sets == 0` or `reps == 0` pass through as zero-contribution members, and
//! zero weight is a valid bodyweight entry rather than missing data. All
//! defensive arithmetic lives downstream in the statistics modules.

use crate::types::{ExerciseName, LogEntry, WorkoutType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Joined exercise attributes carried by some source shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedExercise {
    pub name: String,
    pub muscle_group: Option<String>,
}

/// A raw log row in one of the source shapes.
///
/// The discriminant is explicit so "exercise attributes absent" is a modeled
/// case instead of an implicit fallback string at every call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RawLogRow {
    /// Exercise attributes inlined on the row (either may be missing)
    Flat {
        session_date: NaiveDate,
        workout_type: WorkoutType,
        exercise_id: String,
        exercise_name: Option<String>,
        muscle_group: Option<String>,
        sets: u32,
        reps: u32,
        weight_kg: f64,
    },
    /// Exercise attributes nested as an optional join result
    Joined {
        session_date: NaiveDate,
        workout_type: WorkoutType,
        exercise_id: String,
        exercise: Option<JoinedExercise>,
        sets: u32,
        reps: u32,
        weight_kg: f64,
    },
}

/// Convert raw rows into the canonical entry sequence.
///
/// Row order is preserved. Rows are never dropped.
pub fn normalize<I>(rows: I) -> Vec<LogEntry>
where
    I: IntoIterator<Item = RawLogRow>,
{
    rows.into_iter().map(normalize_row).collect()
}

/// Convert a single raw row.
pub fn normalize_row(row: RawLogRow) -> LogEntry {
    match row {
        RawLogRow::Flat {
            session_date,
            workout_type,
            exercise_id,
            exercise_name,
            muscle_group,
            sets,
            reps,
            weight_kg,
        } => LogEntry {
            session_date,
            workout_type,
            exercise_id,
            exercise_name: ExerciseName::from_optional(exercise_name),
            muscle_group,
            sets,
            reps,
            weight_kg,
        },
        RawLogRow::Joined {
            session_date,
            workout_type,
            exercise_id,
            exercise,
            sets,
            reps,
            weight_kg,
        } => {
            let (name, muscle_group) = match exercise {
                Some(ex) => (ExerciseName::from_optional(Some(ex.name)), ex.muscle_group),
                None => (ExerciseName::Unknown, None),
            };
            LogEntry {
                session_date,
                workout_type,
                exercise_id,
                exercise_name: name,
                muscle_group,
                sets,
                reps,
                weight_kg,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_flat_row_with_attributes() {
        let entries = normalize(vec![RawLogRow::Flat {
            session_date: date(1),
            workout_type: WorkoutType::Push,
            exercise_id: "bench".to_string(),
            exercise_name: Some("Bench Press".to_string()),
            muscle_group: Some("Chest".to_string()),
            sets: 3,
            reps: 8,
            weight_kg: 80.0,
        }]);

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].exercise_name,
            ExerciseName::Known("Bench Press".to_string())
        );
        assert_eq!(entries[0].muscle_group.as_deref(), Some("Chest"));
    }

    #[test]
    fn test_joined_row_missing_exercise_is_modeled_unknown() {
        let entries = normalize(vec![RawLogRow::Joined {
            session_date: date(2),
            workout_type: WorkoutType::Pull,
            exercise_id: "ex-42".to_string(),
            exercise: None,
            sets: 4,
            reps: 10,
            weight_kg: 0.0,
        }]);

        assert_eq!(entries[0].exercise_name, ExerciseName::Unknown);
        assert_eq!(entries[0].muscle_group, None);
        assert!(entries[0].is_bodyweight());
    }

    #[test]
    fn test_joined_row_with_exercise() {
        let entries = normalize(vec![RawLogRow::Joined {
            session_date: date(3),
            workout_type: WorkoutType::Legs,
            exercise_id: "squat".to_string(),
            exercise: Some(JoinedExercise {
                name: "Back Squat".to_string(),
                muscle_group: Some("Quads".to_string()),
            }),
            sets: 5,
            reps: 5,
            weight_kg: 120.0,
        }]);

        assert_eq!(
            entries[0].exercise_name.as_known(),
            Some("Back Squat")
        );
        assert_eq!(entries[0].muscle_group.as_deref(), Some("Quads"));
    }

    #[test]
    fn test_zero_set_rows_pass_through() {
        let entries = normalize(vec![RawLogRow::Flat {
            session_date: date(4),
            workout_type: WorkoutType::Custom,
            exercise_id: "row".to_string(),
            exercise_name: Some("Row".to_string()),
            muscle_group: None,
            sets: 0,
            reps: 0,
            weight_kg: 60.0,
        }]);

        // Not filtered; contributes zero to every aggregate.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].total_reps(), 0);
        assert_eq!(entries[0].volume(), 0.0);
    }
}
