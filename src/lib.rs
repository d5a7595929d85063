//! SMS History - last-contact tracking for phone numbers
//!
//! Records, for every phone number an SMS process talks to, the time of the
//! most recent message sent or received. Nothing else about the message is
//! kept.
//!
//! # Features
//!
//! - One record per number, enforced by a unique index and an atomic upsert
//! - Last-write-wins touches, explicit "not found" lookups, idempotent deletes
//! - Pooled SQLite storage with embedded migrations
//! - Configurable logging and metrics

/// Configuration management
pub mod config;
/// Database operations and connection pooling
pub mod db;
/// Error taxonomy
pub mod error;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Repository pattern for data access
pub mod repository;
/// Database schema definitions
pub mod schema;
/// Event ingestion from the SMS process
pub mod service;
/// Input validation and normalisation
pub mod validation;

// Re-export key components for easier access
pub use db::Database;
pub use error::{HistoryError, Result};
pub use models::{Direction, HistoryRecord, SmsEvent};
pub use repository::{HistoryRepository, HistoryStore};
pub use service::HistoryService;
