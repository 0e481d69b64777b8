//! Core domain types for liftlog
//!
//! These types form the canonical data model shared by the normalizer, the
//! statistics modules, and the record store.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **LogEntry** | One logged set-group (sets × reps × weight) for one exercise within one session |
//! | **Session** | All entries sharing a `session_date` and a `WorkoutType` |
//! | **Volume** | sets × reps × weight, the standard workload metric |
//! | **Streak** | A run of consecutive calendar days with at least one session |
//! | **PersonalRecord** | Best recorded value for one exercise and one [`RecordType`] |
//!
//! Weight is always kilograms. A weight of `0.0` denotes a bodyweight
//! movement, not missing data; the aggregator treats it accordingly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Exercise identity
// ============================================

/// Exercise name as resolved at normalization time.
///
/// Raw log rows sometimes arrive without the joined exercise attributes.
/// That case is modeled explicitly rather than smuggled through as a
/// fallback string, so consumers can tell "named X" from "name unknown".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseName {
    /// Name resolved from the exercise catalog
    Known(String),
    /// Exercise attributes were absent from the source row
    Unknown,
}

impl ExerciseName {
    /// Build from an optional source attribute.
    pub fn from_optional(name: Option<String>) -> Self {
        match name {
            Some(n) if !n.trim().is_empty() => ExerciseName::Known(n),
            _ => ExerciseName::Unknown,
        }
    }

    /// Display label; the unknown case renders as "Unknown Exercise".
    pub fn display_name(&self) -> &str {
        match self {
            ExerciseName::Known(name) => name,
            ExerciseName::Unknown => "Unknown Exercise",
        }
    }

    /// The resolved name, if any.
    pub fn as_known(&self) -> Option<&str> {
        match self {
            ExerciseName::Known(name) => Some(name),
            ExerciseName::Unknown => None,
        }
    }
}

impl std::fmt::Display for ExerciseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================
// Workout type
// ============================================

/// Categorical type of a training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Push,
    Pull,
    Legs,
    Upper,
    Lower,
    FullBody,
    Custom,
}

impl WorkoutType {
    /// Identifier used in database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Push => "push",
            WorkoutType::Pull => "pull",
            WorkoutType::Legs => "legs",
            WorkoutType::Upper => "upper",
            WorkoutType::Lower => "lower",
            WorkoutType::FullBody => "full_body",
            WorkoutType::Custom => "custom",
        }
    }

    /// Human-friendly display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkoutType::Push => "Push",
            WorkoutType::Pull => "Pull",
            WorkoutType::Legs => "Legs",
            WorkoutType::Upper => "Upper",
            WorkoutType::Lower => "Lower",
            WorkoutType::FullBody => "Full Body",
            WorkoutType::Custom => "Custom",
        }
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WorkoutType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "push" | "Push" => Ok(WorkoutType::Push),
            "pull" | "Pull" => Ok(WorkoutType::Pull),
            "legs" | "Legs" => Ok(WorkoutType::Legs),
            "upper" | "Upper" => Ok(WorkoutType::Upper),
            "lower" | "Lower" => Ok(WorkoutType::Lower),
            "full_body" | "FullBody" | "full-body" => Ok(WorkoutType::FullBody),
            "custom" | "Custom" => Ok(WorkoutType::Custom),
            _ => Err(format!("unknown workout type: {}", s)),
        }
    }
}

// ============================================
// Log entry
// ============================================

/// One logged set-group for one exercise within one session.
///
/// Invariants `sets > 0` and `reps > 0` hold for well-formed logs, but the
/// normalizer deliberately passes zero-valued rows through; they contribute
/// nothing to any aggregate and downstream arithmetic guards for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Calendar date of the session (no time component)
    pub session_date: NaiveDate,
    /// Session category (Push/Pull/Legs/...)
    pub workout_type: WorkoutType,
    /// Stable exercise identifier
    pub exercise_id: String,
    /// Resolved exercise name, or the modeled unknown case
    pub exercise_name: ExerciseName,
    /// Primary muscle group, if the catalog knows it
    pub muscle_group: Option<String>,
    /// Number of sets performed
    pub sets: u32,
    /// Reps per set
    pub reps: u32,
    /// Weight in kilograms; 0 denotes bodyweight
    pub weight_kg: f64,
}

impl LogEntry {
    /// Total repetitions in this entry (reps is per set).
    pub fn total_reps(&self) -> u64 {
        u64::from(self.sets) * u64::from(self.reps)
    }

    /// Training volume of this entry: sets × reps × weight.
    pub fn volume(&self) -> f64 {
        f64::from(self.sets) * f64::from(self.reps) * self.weight_kg
    }

    /// Whether this entry is a bodyweight movement.
    pub fn is_bodyweight(&self) -> bool {
        self.weight_kg <= 0.0
    }
}

// ============================================
// Derived statistics
// ============================================

/// Direction of change for an exercise over a comparison window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
            Trend::InsufficientData => "insufficient_data",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate statistics for one exercise over a date range.
///
/// Computed on demand from a `LogEntry` sequence; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseStats {
    pub exercise_id: String,
    pub exercise_name: ExerciseName,
    /// Count of distinct session dates contributing rows
    pub total_sessions: u64,
    pub total_sets: u64,
    /// Σ sets × reps across entries
    pub total_reps: u64,
    /// Σ sets × reps × weight across entries
    pub total_volume: f64,
    /// Mean over positive-weight entries only; 0 when none exist
    pub avg_weight: f64,
    /// Max over positive-weight entries only; 0 when none exist
    pub max_weight: f64,
    pub first_performed: Option<NaiveDate>,
    pub last_performed: Option<NaiveDate>,
    pub trend: Trend,
    /// Sessions per 7-day period over the observed span
    pub usage_frequency: f64,
}

// ============================================
// Personal records
// ============================================

/// Kind of personal record tracked per exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    OneRepMax,
    ThreeRepMax,
    FiveRepMax,
    MaxVolume,
    MaxReps,
    EnduranceDuration,
}

impl RecordType {
    /// Identifier used in database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::OneRepMax => "one_rep_max",
            RecordType::ThreeRepMax => "three_rep_max",
            RecordType::FiveRepMax => "five_rep_max",
            RecordType::MaxVolume => "max_volume",
            RecordType::MaxReps => "max_reps",
            RecordType::EnduranceDuration => "endurance_duration",
        }
    }

    /// Human-friendly display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RecordType::OneRepMax => "1RM",
            RecordType::ThreeRepMax => "3RM",
            RecordType::FiveRepMax => "5RM",
            RecordType::MaxVolume => "Max Volume",
            RecordType::MaxReps => "Max Reps",
            RecordType::EnduranceDuration => "Endurance",
        }
    }

    /// All record kinds, in display order.
    pub fn all() -> [RecordType; 6] {
        [
            RecordType::OneRepMax,
            RecordType::ThreeRepMax,
            RecordType::FiveRepMax,
            RecordType::MaxVolume,
            RecordType::MaxReps,
            RecordType::EnduranceDuration,
        ]
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_rep_max" | "1rm" => Ok(RecordType::OneRepMax),
            "three_rep_max" | "3rm" => Ok(RecordType::ThreeRepMax),
            "five_rep_max" | "5rm" => Ok(RecordType::FiveRepMax),
            "max_volume" => Ok(RecordType::MaxVolume),
            "max_reps" => Ok(RecordType::MaxReps),
            "endurance_duration" | "endurance" => Ok(RecordType::EnduranceDuration),
            _ => Err(format!("unknown record type: {}", s)),
        }
    }
}

/// A durable personal record, keyed by `(user, exercise, record_type)`.
///
/// At most one live record exists per key; an upsert for the same key
/// replaces the stored record unconditionally, even with a worse value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    /// Store-assigned id; 0 until inserted
    pub id: i64,
    pub user_id: String,
    pub exercise_id: String,
    pub record_type: RecordType,
    pub weight_kg: Option<f64>,
    pub reps: Option<u32>,
    pub sets: Option<u32>,
    /// For `max_volume`: computed once at submission, never recomputed
    pub total_volume: Option<f64>,
    pub duration_seconds: Option<u32>,
    pub achieved_date: NaiveDate,
    pub notes: Option<String>,
    /// When the record row was written
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_exercise_name_from_optional() {
        assert_eq!(
            ExerciseName::from_optional(Some("Squat".to_string())),
            ExerciseName::Known("Squat".to_string())
        );
        assert_eq!(ExerciseName::from_optional(None), ExerciseName::Unknown);
        assert_eq!(
            ExerciseName::from_optional(Some("  ".to_string())),
            ExerciseName::Unknown
        );
        assert_eq!(ExerciseName::Unknown.display_name(), "Unknown Exercise");
    }

    #[test]
    fn test_workout_type_roundtrip() {
        for wt in [
            WorkoutType::Push,
            WorkoutType::Pull,
            WorkoutType::Legs,
            WorkoutType::Upper,
            WorkoutType::Lower,
            WorkoutType::FullBody,
            WorkoutType::Custom,
        ] {
            assert_eq!(WorkoutType::from_str(wt.as_str()), Ok(wt));
        }
        assert!(WorkoutType::from_str("yoga").is_err());
    }

    #[test]
    fn test_record_type_roundtrip() {
        for rt in RecordType::all() {
            assert_eq!(RecordType::from_str(rt.as_str()), Ok(rt));
        }
        assert_eq!(RecordType::from_str("1rm"), Ok(RecordType::OneRepMax));
        assert!(RecordType::from_str("max_speed").is_err());
    }

    #[test]
    fn test_log_entry_arithmetic() {
        let entry = LogEntry {
            session_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            workout_type: WorkoutType::Legs,
            exercise_id: "squat".to_string(),
            exercise_name: ExerciseName::Known("Squat".to_string()),
            muscle_group: Some("Quads".to_string()),
            sets: 3,
            reps: 5,
            weight_kg: 100.0,
        };
        assert_eq!(entry.total_reps(), 15);
        assert!((entry.volume() - 1500.0).abs() < f64::EPSILON);
        assert!(!entry.is_bodyweight());
    }
}
