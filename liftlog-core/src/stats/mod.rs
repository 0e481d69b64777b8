//! Statistics engine for liftlog
//!
//! Pure, storage-agnostic computations over [`LogEntry`](crate::types::LogEntry)
//! sequences supplied by the caller:
//! - Volume and set aggregation ([`aggregate`])
//! - Consecutive-day streaks ([`streak`])
//! - Trend classification ([`trend`])
//! - Personal-record construction ([`records`])
//! - Muscle-group and workout-type distributions ([`distribution`])
//! - Session comparison ([`compare`])
//!
//! The normalizer runs first; every other module consumes its output
//! independently. Only the comparator has an ordering dependency: it takes
//! two aggregates produced by [`aggregate::aggregate_session`].
//!
//! Insufficient data is a first-class result state, never an error: empty or
//! singleton inputs produce zeroed aggregates or an explicit
//! `insufficient_data` tag rather than failing.

pub mod aggregate;
pub mod compare;
pub mod distribution;
pub mod records;
pub mod streak;
pub mod trend;

pub use aggregate::{
    aggregate_by_exercise, aggregate_exercise, aggregate_session, usage_frequency,
    ExerciseAccumulator, SessionAggregate,
};
pub use compare::{
    compare_sessions, ExerciseChange, ExerciseComparison, MetricDelta, SessionComparison,
};
pub use distribution::{
    muscle_group_distribution, workout_type_distribution, DistributionSlice, UNKNOWN_GROUP,
};
pub use records::{build_record, estimate_one_rep_max, RecordFields};
pub use streak::{calculate_streaks, StreakStats};
pub use trend::{classify_trend, half_split_change, TrendConfig};
