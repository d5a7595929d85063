use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::SmsEvent;
use crate::repository::HistoryStore;

/// Feeds SMS send/receive events from the messaging process into a store
pub struct HistoryService<S: HistoryStore> {
    store: S,
    metrics: Arc<MetricsCollector>,
}

impl<S: HistoryStore> HistoryService<S> {
    /// Create a service over `store`
    pub fn new(store: S, metrics: Arc<MetricsCollector>) -> Self {
        Self { store, metrics }
    }

    /// Record that a message was exchanged with `event.tel`
    ///
    /// Only the number and time reach the store. Failures are returned as-is
    /// so the caller can re-queue the event.
    pub fn record_event(&self, event: &SmsEvent) -> Result<()> {
        self.store.touch(&event.tel, event.timestamp)?;
        self.metrics.record_event(event.direction);
        info!(direction = %event.direction, "SMS event recorded");
        Ok(())
    }

    /// Record a message sent to `tel` just now
    pub fn record_sent(&self, tel: &str) -> Result<()> {
        self.record_event(&SmsEvent::sent(tel, Utc::now()))
    }

    /// Record a message received from `tel` at `timestamp`
    pub fn record_received(&self, tel: &str, timestamp: DateTime<Utc>) -> Result<()> {
        self.record_event(&SmsEvent::received(tel, timestamp))
    }

    /// When a message was last exchanged with `tel`
    pub fn last_contact(&self, tel: &str) -> Result<Option<DateTime<Utc>>> {
        self.store.lookup(tel)
    }

    /// Underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }
}
