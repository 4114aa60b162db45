use orbit_telemetry::{
    metrics, new_cycle_id, record_fetch_latency_ms, record_store_failure, record_tick,
    TelemetryMetrics,
};

#[test]
fn cycle_ids_are_unique() {
    let first = new_cycle_id();
    let second = new_cycle_id();
    assert!(!first.is_empty());
    assert_ne!(first, second);
}

#[test]
fn fresh_metrics_start_at_zero() {
    let snapshot = TelemetryMetrics::new().snapshot();
    assert_eq!(snapshot, Default::default());
}

#[test]
fn global_counters_only_grow() {
    let before = metrics().snapshot();
    record_tick();
    record_store_failure();
    record_fetch_latency_ms(42);
    let after = metrics().snapshot();
    assert!(after.ticks > before.ticks);
    assert!(after.store_failure > before.store_failure);
    assert!(after.fetch_latency_ms_total >= before.fetch_latency_ms_total + 42);
    assert!(after.fetch_latency_ms_count > before.fetch_latency_ms_count);
}
