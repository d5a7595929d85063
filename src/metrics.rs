use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ::metrics::{counter, histogram};

use crate::models::Direction;

/// Counter of store operations, labelled by operation and status
pub const STORE_OPERATIONS_TOTAL: &str = "sms_history_store_operations_total";
/// Histogram of store operation latency in seconds
pub const STORE_OPERATION_DURATION: &str = "sms_history_store_operation_duration_seconds";
/// Counter of lookups, labelled hit or miss
pub const LOOKUPS_TOTAL: &str = "sms_history_lookups_total";
/// Counter of SMS events recorded, labelled by direction
pub const EVENTS_RECORDED_TOTAL: &str = "sms_history_events_recorded_total";
/// Counter of failed operations, labelled by error kind
pub const ERRORS_TOTAL: &str = "sms_history_errors_total";

/// Store operations tracked by [`MetricsCollector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// Upsert of a record
    Touch,
    /// Point lookup by phone number
    Lookup,
    /// Removal of a record
    Delete,
    /// Listing or counting records
    Scan,
}

impl StoreOperation {
    /// Metric label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Touch => "touch",
            Self::Lookup => "lookup",
            Self::Delete => "delete",
            Self::Scan => "scan",
        }
    }
}

/// Metrics collection and management
///
/// Every recording is forwarded to the `metrics` facade (a no-op until the
/// host installs a recorder) and mirrored in local counters for
/// [`MetricsCollector::snapshot`].
#[derive(Debug, Default)]
pub struct MetricsCollector {
    touches: AtomicU64,
    lookups: AtomicU64,
    lookup_hits: AtomicU64,
    deletes: AtomicU64,
    scans: AtomicU64,
    events_sent: AtomicU64,
    events_received: AtomicU64,
    errors: AtomicU64,
}

/// Point-in-time copy of the local counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Successful touches
    pub touches: u64,
    /// Successful lookups, hit or miss
    pub lookups: u64,
    /// Lookups that found a record
    pub lookup_hits: u64,
    /// Successful deletes, including no-op deletes
    pub deletes: u64,
    /// Successful list/count calls
    pub scans: u64,
    /// Outgoing events recorded
    pub events_sent: u64,
    /// Incoming events recorded
    pub events_received: u64,
    /// Failed operations of any kind
    pub errors: u64,
}

impl MetricsCollector {
    /// Create a collector with zeroed counters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a store operation
    pub fn record_store_operation(&self, operation: StoreOperation, duration: Duration, success: bool) {
        let status = if success { "success" } else { "error" };
        counter!(STORE_OPERATIONS_TOTAL, "operation" => operation.as_str(), "status" => status).increment(1);
        histogram!(STORE_OPERATION_DURATION, "operation" => operation.as_str()).record(duration.as_secs_f64());

        if !success {
            return;
        }
        let local = match operation {
            StoreOperation::Touch => &self.touches,
            StoreOperation::Lookup => &self.lookups,
            StoreOperation::Delete => &self.deletes,
            StoreOperation::Scan => &self.scans,
        };
        local.fetch_add(1, Ordering::Relaxed);
    }

    /// Record whether a lookup found a record
    pub fn record_lookup_result(&self, hit: bool) {
        counter!(LOOKUPS_TOTAL, "result" => if hit { "hit" } else { "miss" }).increment(1);
        if hit {
            self.lookup_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record an SMS event that reached the store
    pub fn record_event(&self, direction: Direction) {
        counter!(EVENTS_RECORDED_TOTAL, "direction" => direction.as_str()).increment(1);
        let local = match direction {
            Direction::Sent => &self.events_sent,
            Direction::Received => &self.events_received,
        };
        local.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failure
    pub fn record_error(&self, kind: &'static str) {
        counter!(ERRORS_TOTAL, "type" => kind).increment(1);
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Current values of the local counters
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            touches: self.touches.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            lookup_hits: self.lookup_hits.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            scans: self.scans.load(Ordering::Relaxed),
            events_sent: self.events_sent.load(Ordering::Relaxed),
            events_received: self.events_received.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}
