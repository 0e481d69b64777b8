//! Database layer for liftlog
//!
//! SQLite storage for logged sets and the durable personal-record store:
//! - Schema migrations
//! - Repository pattern for queries
//! - Unconditional upsert-by-key for personal records

pub mod repo;
pub mod schema;

pub use repo::{Database, LogFilter};
