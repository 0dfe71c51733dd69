//! Tests for `ExecutionMetrics` and `MetricsSnapshot`.

use vectool_runtime::{ExecutionMetrics, MetricsSnapshot};

fn zeroed_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        total_calls: 0,
        successful_calls: 0,
        failed_calls: 0,
        timed_out_calls: 0,
        panicked_calls: 0,
    }
}

#[test]
fn default_metrics_are_zero() {
    assert_eq!(ExecutionMetrics::default().snapshot(), zeroed_snapshot());
}

#[test]
fn record_attempt_increments_total() {
    let m = ExecutionMetrics::default();
    m.record_attempt();
    m.record_attempt();
    assert_eq!(m.snapshot().total_calls, 2);
}

#[test]
fn outcomes_are_counted_separately() {
    let m = ExecutionMetrics::default();
    m.record_success();
    m.record_success();
    m.record_failure();
    m.record_timeout();
    m.record_panic();
    let s = m.snapshot();
    assert_eq!(s.successful_calls, 2);
    assert_eq!(s.failed_calls, 1);
    assert_eq!(s.timed_out_calls, 1);
    assert_eq!(s.panicked_calls, 1);
}

#[test]
fn snapshot_serializes_field_names() {
    let m = ExecutionMetrics::new_shared();
    m.record_attempt();
    let v = serde_json::to_value(m.snapshot()).expect("json");
    assert_eq!(v["total_calls"], 1);
    assert_eq!(v["panicked_calls"], 0);
}
