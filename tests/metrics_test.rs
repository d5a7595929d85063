//! Unit tests for metrics.rs module

use std::time::Duration;

use sms_history::metrics::{MetricsCollector, MetricsSnapshot, StoreOperation};
use sms_history::Direction;

#[test]
fn test_metrics_collector_default() {
    let collector = MetricsCollector::default();
    assert_eq!(collector.snapshot(), MetricsSnapshot::default());
}

#[test]
fn test_record_store_operation_success() {
    let collector = MetricsCollector::new();
    collector.record_store_operation(StoreOperation::Touch, Duration::from_millis(3), true);
    collector.record_store_operation(StoreOperation::Lookup, Duration::from_millis(1), true);
    collector.record_store_operation(StoreOperation::Delete, Duration::from_millis(1), true);
    collector.record_store_operation(StoreOperation::Scan, Duration::from_millis(1), true);

    let snapshot = collector.snapshot();
    assert_eq!(snapshot.touches, 1);
    assert_eq!(snapshot.lookups, 1);
    assert_eq!(snapshot.deletes, 1);
    assert_eq!(snapshot.scans, 1);
}

#[test]
fn test_failed_operation_is_not_counted_as_success() {
    let collector = MetricsCollector::new();
    collector.record_store_operation(StoreOperation::Touch, Duration::from_millis(3), false);
    collector.record_error("unavailable");

    let snapshot = collector.snapshot();
    assert_eq!(snapshot.touches, 0);
    assert_eq!(snapshot.errors, 1);
}

#[test]
fn test_lookup_hits() {
    let collector = MetricsCollector::new();
    collector.record_lookup_result(true);
    collector.record_lookup_result(false);
    collector.record_lookup_result(true);

    assert_eq!(collector.snapshot().lookup_hits, 2);
}

#[test]
fn test_events_by_direction() {
    let collector = MetricsCollector::new();
    collector.record_event(Direction::Sent);
    collector.record_event(Direction::Received);
    collector.record_event(Direction::Received);

    let snapshot = collector.snapshot();
    assert_eq!(snapshot.events_sent, 1);
    assert_eq!(snapshot.events_received, 2);
}

#[test]
fn test_operation_labels() {
    assert_eq!(StoreOperation::Touch.as_str(), "touch");
    assert_eq!(StoreOperation::Scan.as_str(), "scan");
}
