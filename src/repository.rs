use std::sync::Arc;

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::db::Database;
use crate::error::{HistoryError, Result};
use crate::logging::OperationTimer;
use crate::metrics::{MetricsCollector, StoreOperation};
use crate::models::HistoryRecord;
use crate::validation::InputValidator;

/// Phone number to last-interaction timestamp mapping
///
/// Implementations keep at most one record per number and apply writes
/// last-write-wins: a touch replaces the stored timestamp even when the new
/// value is older. Callers that need monotonic recency must compare first.
#[cfg_attr(test, automock)]
pub trait HistoryStore: Send + Sync {
    /// Create or overwrite the record for `tel`
    fn touch(&self, tel: &str, timestamp: DateTime<Utc>) -> Result<()>;

    /// Stored timestamp for `tel`, or `None` if the number was never touched
    fn lookup(&self, tel: &str) -> Result<Option<DateTime<Utc>>>;

    /// Remove the record for `tel`; returns whether one existed
    fn delete(&self, tel: &str) -> Result<bool>;
}

/// SQLite-backed [`HistoryStore`] with validation, timing and metrics
pub struct HistoryRepository {
    database: Database,
    metrics: Arc<MetricsCollector>,
}

impl HistoryRepository {
    /// Wrap an open database
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self::with_metrics(database, Arc::new(MetricsCollector::new()))
    }

    /// Wrap an open database, reporting to a shared collector
    #[must_use]
    pub const fn with_metrics(database: Database, metrics: Arc<MetricsCollector>) -> Self {
        Self { database, metrics }
    }

    /// Metrics for this repository
    #[must_use]
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Underlying database handle
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Touch `tel` with the current time
    pub fn touch_now(&self, tel: &str) -> Result<()> {
        self.touch(tel, Utc::now())
    }

    /// Full record for `tel`
    pub fn record(&self, tel: &str) -> Result<HistoryRecord> {
        self.instrumented(StoreOperation::Lookup, || {
            InputValidator::validate_tel(tel)?;
            self.database.find(tel)
        })?
        .ok_or_else(|| HistoryError::NotFound(tel.to_string()))
    }

    /// Records ordered by most recent contact first
    pub fn list(&self, limit: Option<usize>) -> Result<Vec<HistoryRecord>> {
        self.instrumented(StoreOperation::Scan, || self.database.list(limit))
    }

    /// Number of numbers with a record
    pub fn count(&self) -> Result<u64> {
        self.instrumented(StoreOperation::Scan, || self.database.count())
    }

    fn instrumented<T>(&self, operation: StoreOperation, run: impl FnOnce() -> Result<T>) -> Result<T> {
        let timer = OperationTimer::new(operation.as_str());
        let result = run();
        let duration = timer.finish();
        self.metrics
            .record_store_operation(operation, duration, result.is_ok());

        if let Err(err) = &result {
            let kind = match err {
                HistoryError::StorageUnavailable(_) => "unavailable",
                HistoryError::Validation(_) => "validation",
                // Absence is mapped to NotFound by `record` after a successful
                // lookup, and migrations only run in `Database::open`.
                HistoryError::NotFound(_)
                | HistoryError::Migration(_)
                | HistoryError::Database(_)
                | HistoryError::Io(_) => "database",
            };
            self.metrics.record_error(kind);
            warn!(operation = operation.as_str(), retryable = err.is_retryable(), error = %err, "History store operation failed");
        }
        result
    }
}

impl HistoryStore for HistoryRepository {
    fn touch(&self, tel: &str, timestamp: DateTime<Utc>) -> Result<()> {
        let timestamp = self.instrumented(StoreOperation::Touch, || {
            InputValidator::validate_tel(tel)?;
            let timestamp = InputValidator::normalize_timestamp(timestamp)?;
            self.database.upsert(tel, timestamp)?;
            Ok(timestamp)
        })?;
        debug!(tel, last_message = %timestamp, "History record touched");
        Ok(())
    }

    fn lookup(&self, tel: &str) -> Result<Option<DateTime<Utc>>> {
        let record = self.instrumented(StoreOperation::Lookup, || {
            InputValidator::validate_tel(tel)?;
            self.database.find(tel)
        })?;
        self.metrics.record_lookup_result(record.is_some());
        Ok(record.map(|r| r.last_message))
    }

    fn delete(&self, tel: &str) -> Result<bool> {
        let removed = self.instrumented(StoreOperation::Delete, || {
            InputValidator::validate_tel(tel)?;
            self.database.remove(tel)
        })?;
        debug!(tel, removed, "History record delete");
        Ok(removed)
    }
}
