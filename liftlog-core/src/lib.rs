//! # liftlog-core
//!
//! Core library for liftlog - a workout statistics engine.
//!
//! This library provides:
//! - Domain types for logged sets, sessions, and personal records
//! - A log normalizer for heterogeneous raw row shapes
//! - Pure statistics modules: aggregation, streaks, trends, distributions,
//!   and session comparison
//! - A SQLite store for logged sets and the durable personal-record table
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! The engine is synchronous, stateless computation over in-memory
//! collections. The normalizer runs first; every statistics module consumes
//! its output independently. Storage is a collaborator, not a dependency:
//! the computation modules accept plain slices and never perform IO. Only
//! personal records are durable; every other derived value is recomputed on
//! demand.
//!
//! ## Example
//!
//! ```rust,no_run
//! use liftlog_core::stats::{aggregate_by_exercise, TrendConfig};
//! use liftlog_core::{Config, Database, LogFilter};
//!
//! let config = Config::load().expect("failed to load config");
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let entries = db.fetch_logs("demo", &LogFilter::default()).expect("fetch failed");
//! let stats = aggregate_by_exercise(&entries, &config.analytics.trend_config());
//! for (exercise, stats) in &stats {
//!     println!("{}: {} sessions, trend {}", exercise, stats.total_sessions, stats.trend);
//! }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::{Database, LogFilter};
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod normalize;
pub mod stats;
pub mod types;
