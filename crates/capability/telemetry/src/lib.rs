//! 追踪初始化、周期 ID 与轮询计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub ticks: u64,
    pub fetch_success: u64,
    pub fetch_failure: u64,
    pub store_success: u64,
    pub store_failure: u64,
    pub fetch_latency_ms_total: u64,
    pub fetch_latency_ms_count: u64,
}

/// 基础指标。
pub struct TelemetryMetrics {
    ticks: AtomicU64,
    fetch_success: AtomicU64,
    fetch_failure: AtomicU64,
    store_success: AtomicU64,
    store_failure: AtomicU64,
    fetch_latency_ms_total: AtomicU64,
    fetch_latency_ms_count: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
            fetch_success: AtomicU64::new(0),
            fetch_failure: AtomicU64::new(0),
            store_success: AtomicU64::new(0),
            store_failure: AtomicU64::new(0),
            fetch_latency_ms_total: AtomicU64::new(0),
            fetch_latency_ms_count: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            fetch_success: self.fetch_success.load(Ordering::Relaxed),
            fetch_failure: self.fetch_failure.load(Ordering::Relaxed),
            store_success: self.store_success.load(Ordering::Relaxed),
            store_failure: self.store_failure.load(Ordering::Relaxed),
            fetch_latency_ms_total: self.fetch_latency_ms_total.load(Ordering::Relaxed),
            fetch_latency_ms_count: self.fetch_latency_ms_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 cycle_id（每个轮询周期一个）。
pub fn new_cycle_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录定时器触发次数。
pub fn record_tick() {
    metrics().ticks.fetch_add(1, Ordering::Relaxed);
}

/// 记录位置拉取成功次数。
pub fn record_fetch_success() {
    metrics().fetch_success.fetch_add(1, Ordering::Relaxed);
}

/// 记录位置拉取失败次数（网络/解码）。
pub fn record_fetch_failure() {
    metrics().fetch_failure.fetch_add(1, Ordering::Relaxed);
}

/// 记录点位写入成功次数。
pub fn record_store_success() {
    metrics().store_success.fetch_add(1, Ordering::Relaxed);
}

/// 记录点位写入失败次数。
pub fn record_store_failure() {
    metrics().store_failure.fetch_add(1, Ordering::Relaxed);
}

/// 记录拉取耗时（毫秒）。
pub fn record_fetch_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .fetch_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .fetch_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}
