//! Integration tests for the liftlog statistics pipeline
//!
//! Exercises the end-to-end flow: raw rows through the normalizer, into the
//! store, back out through fetch, and through every statistics module.

use chrono::NaiveDate;
use liftlog_core::normalize::{normalize, JoinedExercise, RawLogRow};
use liftlog_core::stats::{
    aggregate_by_exercise, aggregate_session, build_record, calculate_streaks, compare_sessions,
    muscle_group_distribution, workout_type_distribution, ExerciseChange, RecordFields,
    TrendConfig,
};
use liftlog_core::types::{ExerciseName, RecordType, Trend, WorkoutType};
use liftlog_core::{Database, LogFilter};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn flat_row(m: u32, d: u32, exercise: &str, group: &str, sets: u32, reps: u32, weight: f64) -> RawLogRow {
    RawLogRow::Flat {
        session_date: date(m, d),
        workout_type: WorkoutType::FullBody,
        exercise_id: exercise.to_string(),
        exercise_name: Some(exercise.to_string()),
        muscle_group: Some(group.to_string()),
        sets,
        reps,
        weight_kg: weight,
    }
}

fn test_db() -> Database {
    let db = Database::open_in_memory().expect("open in-memory db");
    db.migrate().expect("migrate schema");
    db
}

#[test]
fn test_normalize_store_fetch_aggregate_pipeline() {
    let rows = vec![
        flat_row(1, 1, "squat", "Quads", 3, 5, 100.0),
        flat_row(1, 1, "bench", "Chest", 3, 8, 80.0),
        flat_row(1, 3, "squat", "Quads", 3, 5, 102.5),
        // Joined shape with the exercise attributes missing entirely
        RawLogRow::Joined {
            session_date: date(1, 3),
            workout_type: WorkoutType::FullBody,
            exercise_id: "ex-99".to_string(),
            exercise: None,
            sets: 2,
            reps: 12,
            weight_kg: 0.0,
        },
    ];

    let entries = normalize(rows);
    assert_eq!(entries.len(), 4);

    let db = test_db();
    db.insert_log_entries("demo", &entries).expect("insert");

    let fetched = db.fetch_logs("demo", &LogFilter::default()).expect("fetch");
    assert_eq!(fetched.len(), 4);

    let by_exercise = aggregate_by_exercise(&fetched, &TrendConfig::default());
    let squat = &by_exercise["squat"];
    assert_eq!(squat.total_sessions, 2);
    assert_eq!(squat.total_sets, 6);
    assert_eq!(squat.total_reps, 30);
    assert!((squat.total_volume - (1500.0 + 1537.5)).abs() < 1e-9);

    // The unknown exercise survives the round trip as a modeled case
    let unknown = &by_exercise["ex-99"];
    assert_eq!(unknown.exercise_name, ExerciseName::Unknown);
    assert_eq!(unknown.avg_weight, 0.0);
    assert_eq!(unknown.trend, Trend::InsufficientData);
}

#[test]
fn test_streaks_from_stored_session_dates() {
    // 10 consecutive daily sessions, a 2-day gap, then 3 more
    let mut rows: Vec<RawLogRow> = (1..=10)
        .map(|d| flat_row(1, d, "squat", "Quads", 3, 5, 100.0))
        .collect();
    rows.extend((13..=15).map(|d| flat_row(1, d, "squat", "Quads", 3, 5, 100.0)));

    let db = test_db();
    db.insert_log_entries("demo", &normalize(rows)).expect("insert");

    let dates = db.distinct_session_dates("demo").expect("dates");
    assert_eq!(dates.len(), 13);

    let stats = calculate_streaks(&dates, date(1, 16));
    assert_eq!(stats.longest, 10);
    assert_eq!(stats.current, 3);

    // One more day on and the current streak has lapsed
    let stats = calculate_streaks(&dates, date(1, 17));
    assert_eq!(stats.current, 0);
}

#[test]
fn test_window_comparison_via_store() {
    let db = test_db();
    let rows = vec![
        // Week A
        flat_row(2, 1, "squat", "Quads", 5, 5, 100.0),
        flat_row(2, 2, "bench", "Chest", 5, 5, 80.0),
        flat_row(2, 2, "pullup", "Back", 3, 8, 0.0),
        // Week B: squat heavier, bench and pullup dropped, deadlift new
        flat_row(2, 8, "squat", "Quads", 5, 5, 110.0),
        flat_row(2, 9, "deadlift", "Back", 3, 5, 140.0),
    ];
    db.insert_log_entries("demo", &normalize(rows)).expect("insert");

    let week_a = db
        .fetch_logs("demo", &LogFilter::window(date(2, 1), date(2, 7)))
        .expect("week a");
    let week_b = db
        .fetch_logs("demo", &LogFilter::window(date(2, 8), date(2, 14)))
        .expect("week b");

    let cmp = compare_sessions(&aggregate_session(&week_a), &aggregate_session(&week_b));

    // 4500 → 4850
    assert!((cmp.total_volume.percent_change - (4850.0 - 4500.0) / 4500.0 * 100.0).abs() < 1e-9);

    let changes: Vec<(&str, &ExerciseChange)> = cmp
        .exercises
        .iter()
        .map(|e| (e.exercise.as_str(), &e.change))
        .collect();
    assert!(changes.contains(&("deadlift", &ExerciseChange::New)));
    assert!(changes.contains(&("bench", &ExerciseChange::Dropped)));
    // Bodyweight exercise still takes part in the union diff
    assert!(changes.contains(&("pullup", &ExerciseChange::Dropped)));
    assert!(changes
        .iter()
        .any(|(name, change)| *name == "squat"
            && matches!(change, ExerciseChange::Changed { percent_change }
                if (percent_change - 10.0).abs() < 1e-9)));
}

#[test]
fn test_distributions_from_mixed_sessions() {
    let db = test_db();
    let rows = vec![
        RawLogRow::Flat {
            session_date: date(3, 1),
            workout_type: WorkoutType::Push,
            exercise_id: "bench".to_string(),
            exercise_name: Some("Bench Press".to_string()),
            muscle_group: Some("Chest".to_string()),
            sets: 6,
            reps: 8,
            weight_kg: 80.0,
        },
        RawLogRow::Joined {
            session_date: date(3, 2),
            workout_type: WorkoutType::Pull,
            exercise_id: "ex-7".to_string(),
            exercise: Some(JoinedExercise {
                name: "Seal Row".to_string(),
                muscle_group: None,
            }),
            sets: 2,
            reps: 10,
            weight_kg: 60.0,
        },
    ];
    db.insert_log_entries("demo", &normalize(rows)).expect("insert");
    let entries = db.fetch_logs("demo", &LogFilter::default()).expect("fetch");

    let muscle = muscle_group_distribution(&entries);
    assert_eq!(muscle[0].label, "Chest");
    assert!((muscle[0].percent - 75.0).abs() < 1e-9);
    assert!(muscle.iter().any(|s| s.label == "Unknown" && s.count == 2));
    let total: f64 = muscle.iter().map(|s| s.percent).sum();
    assert!((total - 100.0).abs() < 1e-9);

    let workout = workout_type_distribution(&entries);
    assert_eq!(workout.len(), 2);
    assert!(workout.iter().all(|s| (s.percent - 50.0).abs() < 1e-9));
}

#[test]
fn test_personal_record_lifecycle() {
    let db = test_db();

    let record = build_record(
        "demo",
        "bench",
        RecordType::OneRepMax,
        RecordFields {
            weight_kg: Some(80.0),
            reps: Some(1),
            notes: Some("paused".to_string()),
            ..Default::default()
        },
        date(4, 1),
    )
    .expect("build");
    db.upsert_personal_record(&record).expect("upsert");

    // A later regression still overwrites: upsert-by-key, not keep-if-better
    let regression = build_record(
        "demo",
        "bench",
        RecordType::OneRepMax,
        RecordFields {
            weight_kg: Some(75.0),
            reps: Some(1),
            ..Default::default()
        },
        date(4, 20),
    )
    .expect("build");
    let id = db.upsert_personal_record(&regression).expect("upsert");

    let records = db.list_personal_records("demo", Some("bench")).expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].weight_kg, Some(75.0));
    assert_eq!(records[0].notes, None);

    db.delete_personal_record(id).expect("delete");
    assert!(db
        .list_personal_records("demo", Some("bench"))
        .expect("list")
        .is_empty());
}
