//! Personal-record construction and validation
//!
//! The pure half of the PR tracker: each [`RecordType`] requires a specific
//! set of numeric fields, validated at submission time. The durable upsert
//! and delete operations live in the database layer; this module only
//! builds well-formed [`PersonalRecord`] values.

use crate::error::{Error, Result};
use crate::types::{PersonalRecord, RecordType};
use chrono::{NaiveDate, Utc};

/// Field bundle submitted with a new record.
#[derive(Debug, Clone, Default)]
pub struct RecordFields {
    pub weight_kg: Option<f64>,
    pub reps: Option<u32>,
    pub sets: Option<u32>,
    pub duration_seconds: Option<u32>,
    pub notes: Option<String>,
}

/// Validate fields against the record-type contract and build the record.
///
/// For `max_volume` the total volume is computed here, at submission time,
/// and stored; it is never recomputed later.
///
/// Field contract per type:
/// - `one/three/five_rep_max`: `weight_kg` + `reps`
/// - `max_volume`: `sets` + `reps` + `weight_kg`
/// - `max_reps`: `reps` (`weight_kg` optional, for weighted variants)
/// - `endurance_duration`: `duration_seconds`
pub fn build_record(
    user_id: &str,
    exercise_id: &str,
    record_type: RecordType,
    fields: RecordFields,
    achieved_date: NaiveDate,
) -> Result<PersonalRecord> {
    let total_volume = match record_type {
        RecordType::OneRepMax | RecordType::ThreeRepMax | RecordType::FiveRepMax => {
            require(fields.weight_kg.is_some(), record_type, "weight_kg")?;
            require(fields.reps.is_some(), record_type, "reps")?;
            None
        }
        RecordType::MaxVolume => {
            require(fields.sets.is_some(), record_type, "sets")?;
            require(fields.reps.is_some(), record_type, "reps")?;
            require(fields.weight_kg.is_some(), record_type, "weight_kg")?;
            let weight = fields.weight_kg.unwrap_or(0.0);
            let reps = f64::from(fields.reps.unwrap_or(0));
            let sets = f64::from(fields.sets.unwrap_or(0));
            Some(weight * reps * sets)
        }
        RecordType::MaxReps => {
            require(fields.reps.is_some(), record_type, "reps")?;
            None
        }
        RecordType::EnduranceDuration => {
            require(fields.duration_seconds.is_some(), record_type, "duration_seconds")?;
            None
        }
    };

    Ok(PersonalRecord {
        id: 0,
        user_id: user_id.to_string(),
        exercise_id: exercise_id.to_string(),
        record_type,
        weight_kg: fields.weight_kg,
        reps: fields.reps,
        sets: fields.sets,
        total_volume,
        duration_seconds: fields.duration_seconds,
        achieved_date,
        notes: fields.notes,
        created_at: Utc::now(),
    })
}

fn require(present: bool, record_type: RecordType, field: &str) -> Result<()> {
    if present {
        Ok(())
    } else {
        Err(Error::InvalidRecord(format!(
            "{} requires {}",
            record_type.as_str(),
            field
        )))
    }
}

/// Epley one-rep-max estimate from a measured higher-rep set:
/// `weight × (1 + reps/30)`.
///
/// A single-rep set estimates as its own weight.
pub fn estimate_one_rep_max(weight_kg: f64, reps: u32) -> f64 {
    if reps <= 1 {
        return weight_kg;
    }
    weight_kg * (1.0 + f64::from(reps) / 30.0)
}
