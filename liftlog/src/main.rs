//! liftlog-report - Workout statistics CLI
//!
//! Generate per-exercise statistics, streaks, distributions, window
//! comparisons, and personal-record reports from your training log.

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};
use clap::{Parser, Subcommand};
use liftlog_core::format::{format_duration, format_percent, format_volume, format_weight};
use liftlog_core::normalize::{normalize, RawLogRow};
use liftlog_core::stats::{
    aggregate_by_exercise, aggregate_session, build_record, calculate_streaks, compare_sessions,
    estimate_one_rep_max, muscle_group_distribution, workout_type_distribution, DistributionSlice,
    ExerciseChange, RecordFields, SessionComparison,
};
use liftlog_core::types::{ExerciseStats, PersonalRecord, RecordType, WorkoutType};
use liftlog_core::{Config, Database, LogFilter};
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "liftlog-report")]
#[command(about = "Workout statistics reports")]
#[command(version)]
struct Args {
    /// User whose training log is reported
    #[arg(long, global = true, default_value = "demo")]
    user: String,

    /// Export format (json); default is terminal text
    #[arg(long, global = true)]
    export: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Per-exercise statistics (volume, weights, trend, frequency)
    Stats {
        /// Restrict to one exercise id
        #[arg(long)]
        exercise: Option<String>,

        /// Inclusive lower date bound (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Inclusive upper date bound (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Consecutive-day training streaks
    Streak,

    /// Muscle-group and workout-type distributions
    Distribution,

    /// Compare two date windows
    Compare {
        /// Start of the earlier window
        #[arg(long)]
        from_a: NaiveDate,
        /// End of the earlier window
        #[arg(long)]
        to_a: NaiveDate,
        /// Start of the later window
        #[arg(long)]
        from_b: NaiveDate,
        /// End of the later window
        #[arg(long)]
        to_b: NaiveDate,
    },

    /// Personal records
    Records {
        #[command(subcommand)]
        command: RecordsCommand,
    },

    /// Load a demo training log for the user
    Seed,
}

#[derive(Subcommand, Debug)]
enum RecordsCommand {
    /// List records, most recently achieved first
    List {
        /// Restrict to one exercise id
        #[arg(long)]
        exercise: Option<String>,
    },

    /// Set a record; replaces any existing record of the same type
    Set {
        /// Exercise id
        exercise: String,

        /// Record type (1rm, 3rm, 5rm, max_volume, max_reps, endurance)
        record_type: String,

        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        reps: Option<u32>,

        #[arg(long)]
        sets: Option<u32>,

        /// Duration in seconds (endurance records)
        #[arg(long)]
        duration: Option<u32>,

        /// Date achieved (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a record by id
    Delete { id: i64 },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration and database
    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = liftlog_core::logging::init(&config.logging).ok();

    let db = Database::open(&Config::database_path()).context("failed to open database")?;
    db.migrate().context("failed to run database migrations")?;

    let json = match args.export.as_deref() {
        Some("json") => true,
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'json'", other),
        None => false,
    };

    match args.command {
        Command::Stats {
            exercise,
            from,
            to,
        } => run_stats(&db, &config, &args.user, exercise, from, to, json),
        Command::Streak => run_streak(&db, &args.user, json),
        Command::Distribution => run_distribution(&db, &args.user, json),
        Command::Compare {
            from_a,
            to_a,
            from_b,
            to_b,
        } => run_compare(&db, &args.user, (from_a, to_a), (from_b, to_b), json),
        Command::Records { command } => run_records(&db, &args.user, command, json),
        Command::Seed => run_seed(&db, &args.user),
    }
}

// ============================================
// Stats
// ============================================

fn run_stats(
    db: &Database,
    config: &Config,
    user: &str,
    exercise: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let filter = LogFilter {
        exercise_id: exercise.clone(),
        from,
        to,
    };
    let entries = db.fetch_logs(user, &filter).context("failed to fetch logs")?;
    let stats = aggregate_by_exercise(&entries, &config.analytics.trend_config());

    if json {
        let values: Vec<&ExerciseStats> = stats.values().collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if let Some(exercise_id) = exercise {
        // Single-exercise detail view
        match stats.get(&exercise_id) {
            Some(s) => print_exercise_detail(s, &entries),
            None => println!("No logged sets for '{}'.", exercise_id),
        }
        return Ok(());
    }

    if stats.is_empty() {
        println!("No logged sets found. Run `liftlog-report seed` for demo data.");
        return Ok(());
    }

    println!();
    println!("EXERCISE STATS");
    for s in stats.values() {
        println!(
            "   {:<24} {:>3} sessions  {:>4} sets  {:>5} reps  {:>10}  {}",
            s.exercise_name.display_name(),
            s.total_sessions,
            s.total_sets,
            s.total_reps,
            format_volume(s.total_volume),
            s.trend
        );
    }
    println!();
    Ok(())
}

fn print_exercise_detail(stats: &ExerciseStats, entries: &[liftlog_core::LogEntry]) {
    println!();
    println!("{}", stats.exercise_name.display_name());
    println!("   Sessions:   {:<8} Sets: {:<8} Reps: {}", stats.total_sessions, stats.total_sets, stats.total_reps);
    println!(
        "   Volume:     {:<12} Avg weight: {:<12} Max weight: {}",
        format_volume(stats.total_volume),
        format_weight(stats.avg_weight),
        format_weight(stats.max_weight)
    );
    println!(
        "   Trend:      {:<12} Frequency: {:.1}/week",
        stats.trend.as_str(),
        stats.usage_frequency
    );
    if let (Some(first), Some(last)) = (stats.first_performed, stats.last_performed) {
        println!("   Performed:  {} to {}", first, last);
    }

    // Best Epley estimate over the logged weighted sets
    let best_estimate = entries
        .iter()
        .filter(|e| e.exercise_id == stats.exercise_id && e.weight_kg > 0.0)
        .map(|e| estimate_one_rep_max(e.weight_kg, e.reps))
        .fold(0.0, f64::max);
    if best_estimate > 0.0 {
        println!("   Est. 1RM:   {} (Epley)", format_weight(best_estimate));
    }
    println!();
}

// ============================================
// Streaks
// ============================================

fn run_streak(db: &Database, user: &str, json: bool) -> Result<()> {
    let dates = db
        .distinct_session_dates(user)
        .context("failed to load session dates")?;
    let stats = calculate_streaks(&dates, Local::now().date_naive());

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!();
    println!("STREAKS");
    println!("   Current:  {} day{}", stats.current, plural(stats.current));
    println!("   Longest:  {} day{}", stats.longest, plural(stats.longest));
    println!("   Training days: {}", dates.len());
    println!();
    Ok(())
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

// ============================================
// Distributions
// ============================================

fn run_distribution(db: &Database, user: &str, json: bool) -> Result<()> {
    let entries = db
        .fetch_logs(user, &LogFilter::default())
        .context("failed to fetch logs")?;
    let muscle = muscle_group_distribution(&entries);
    let workout = workout_type_distribution(&entries);

    if json {
        let out = serde_json::json!({
            "muscle_groups": muscle,
            "workout_types": workout,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("MUSCLE GROUPS (by sets)");
    print_slices(&muscle);
    println!("WORKOUT TYPES (by sessions)");
    print_slices(&workout);
    Ok(())
}

fn print_slices(slices: &[DistributionSlice]) {
    if slices.is_empty() {
        println!("   (no data)");
    }
    for slice in slices {
        println!(
            "   {:<16} {:>5}  {:>6.1}%  {}",
            slice.label,
            slice.count,
            slice.percent,
            bar(slice.percent)
        );
    }
    println!();
}

fn bar(percent: f64) -> String {
    let filled = (percent / 5.0).round() as usize;
    "#".repeat(filled.min(20))
}

// ============================================
// Comparison
// ============================================

fn run_compare(
    db: &Database,
    user: &str,
    window_a: (NaiveDate, NaiveDate),
    window_b: (NaiveDate, NaiveDate),
    json: bool,
) -> Result<()> {
    let entries_a = db
        .fetch_logs(user, &LogFilter::window(window_a.0, window_a.1))
        .context("failed to fetch earlier window")?;
    let entries_b = db
        .fetch_logs(user, &LogFilter::window(window_b.0, window_b.1))
        .context("failed to fetch later window")?;

    let cmp = compare_sessions(&aggregate_session(&entries_a), &aggregate_session(&entries_b));

    if json {
        println!("{}", serde_json::to_string_pretty(&cmp)?);
        return Ok(());
    }

    println!();
    println!(
        "COMPARISON  {} to {}  vs  {} to {}",
        window_a.0, window_a.1, window_b.0, window_b.1
    );
    print_comparison(&cmp);
    Ok(())
}

fn print_comparison(cmp: &SessionComparison) {
    println!(
        "   Volume:     {:>10} -> {:<10} {}",
        format_volume(cmp.total_volume.value_a),
        format_volume(cmp.total_volume.value_b),
        format_percent(cmp.total_volume.percent_change)
    );
    println!(
        "   Sets:       {:>10} -> {:<10} {}",
        cmp.total_sets.value_a,
        cmp.total_sets.value_b,
        format_percent(cmp.total_sets.percent_change)
    );
    println!(
        "   Reps:       {:>10} -> {:<10} {}",
        cmp.total_reps.value_a,
        cmp.total_reps.value_b,
        format_percent(cmp.total_reps.percent_change)
    );
    println!(
        "   Avg weight: {:>10} -> {:<10} {}",
        format_weight(cmp.average_weight.value_a),
        format_weight(cmp.average_weight.value_b),
        format_percent(cmp.average_weight.percent_change)
    );
    println!();

    if !cmp.exercises.is_empty() {
        println!("EXERCISES");
        for entry in &cmp.exercises {
            match entry.change {
                ExerciseChange::New => println!("   + {}", entry.exercise),
                ExerciseChange::Dropped => println!("   - {}", entry.exercise),
                ExerciseChange::Changed { percent_change } => println!(
                    "   = {:<24} max weight {}",
                    entry.exercise,
                    format_percent(percent_change)
                ),
            }
        }
        println!();
    }
}

// ============================================
// Personal records
// ============================================

fn run_records(db: &Database, user: &str, command: RecordsCommand, json: bool) -> Result<()> {
    match command {
        RecordsCommand::List { exercise } => {
            let records = db
                .list_personal_records(user, exercise.as_deref())
                .context("failed to list records")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }

            if records.is_empty() {
                println!("No personal records yet.");
                return Ok(());
            }
            println!();
            println!("PERSONAL RECORDS");
            for record in &records {
                println!("   [{}] {}", record.id, record_summary(record));
            }
            println!();
        }
        RecordsCommand::Set {
            exercise,
            record_type,
            weight,
            reps,
            sets,
            duration,
            date,
            notes,
        } => {
            let record_type =
                RecordType::from_str(&record_type).map_err(|e| anyhow::anyhow!(e))?;
            let achieved = date.unwrap_or_else(|| Local::now().date_naive());
            let record = build_record(
                user,
                &exercise,
                record_type,
                RecordFields {
                    weight_kg: weight,
                    reps,
                    sets,
                    duration_seconds: duration,
                    notes,
                },
                achieved,
            )
            .context("invalid record")?;

            let id = db
                .upsert_personal_record(&record)
                .context("failed to store record")?;
            println!("Record stored [{}]: {}", id, record_summary(&record));
        }
        RecordsCommand::Delete { id } => {
            db.delete_personal_record(id)
                .with_context(|| format!("failed to delete record {}", id))?;
            println!("Record {} deleted.", id);
        }
    }
    Ok(())
}

fn record_summary(record: &PersonalRecord) -> String {
    let value = match record.record_type {
        RecordType::OneRepMax | RecordType::ThreeRepMax | RecordType::FiveRepMax => {
            format_weight(record.weight_kg.unwrap_or(0.0))
        }
        RecordType::MaxVolume => format_volume(record.total_volume.unwrap_or(0.0)),
        RecordType::MaxReps => match record.weight_kg {
            Some(w) => format!("{} reps @ {}", record.reps.unwrap_or(0), format_weight(w)),
            None => format!("{} reps", record.reps.unwrap_or(0)),
        },
        RecordType::EnduranceDuration => format_duration(record.duration_seconds.unwrap_or(0)),
    };
    format!(
        "{} {} - {} ({})",
        record.exercise_id,
        record.record_type.display_name(),
        value,
        record.achieved_date
    )
}

// ============================================
// Demo seed
// ============================================

fn run_seed(db: &Database, user: &str) -> Result<()> {
    let today = Local::now().date_naive();
    let entries = normalize(seed_rows(today));
    let inserted = db
        .insert_log_entries(user, &entries)
        .context("failed to seed demo log")?;
    println!("Seeded {} log rows for user '{}'.", inserted, user);
    Ok(())
}

/// Four weeks of push/pull/legs with progressing loads, ending yesterday.
fn seed_rows(today: NaiveDate) -> Vec<RawLogRow> {
    let mut rows = Vec::new();

    // week 3 is the oldest, week 0 ends yesterday
    for week in (0u64..4).rev() {
        let legs_day = today - Days::new(1 + week * 7);
        let pull_day = legs_day - Days::new(2);
        let push_day = legs_day - Days::new(4);
        let bump = (3 - week) as f64 * 2.5;

        rows.push(flat(push_day, WorkoutType::Push, "bench", "Bench Press", "Chest", 4, 8, 72.5 + bump));
        rows.push(flat(push_day, WorkoutType::Push, "ohp", "Overhead Press", "Shoulders", 3, 8, 40.0 + bump));
        rows.push(flat(pull_day, WorkoutType::Pull, "row", "Barbell Row", "Back", 4, 10, 60.0 + bump));
        rows.push(flat(pull_day, WorkoutType::Pull, "pullup", "Pull-up", "Back", 3, 8, 0.0));
        rows.push(flat(legs_day, WorkoutType::Legs, "squat", "Back Squat", "Quads", 5, 5, 95.0 + bump));
        rows.push(flat(legs_day, WorkoutType::Legs, "deadlift", "Deadlift", "Hamstrings", 2, 5, 120.0 + bump));
    }

    rows
}

#[allow(clippy::too_many_arguments)]
fn flat(
    date: NaiveDate,
    workout_type: WorkoutType,
    id: &str,
    name: &str,
    group: &str,
    sets: u32,
    reps: u32,
    weight_kg: f64,
) -> RawLogRow {
    RawLogRow::Flat {
        session_date: date,
        workout_type,
        exercise_id: id.to_string(),
        exercise_name: Some(name.to_string()),
        muscle_group: Some(group.to_string()),
        sets,
        reps,
        weight_kg,
    }
}
