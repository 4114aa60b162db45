//! 轮询转发链路：启动时注册围栏，之后按固定间隔执行
//! `fetch() → set_point()`。
//!
//! 失败隔离策略：
//! - 启动阶段（围栏注册）失败即终止，不重试；
//! - 运行阶段单个 tick 的拉取/写入失败只记录日志，循环继续，下一个 tick 重新拉取。

use domain::{Coordinate, GeofenceSpec, TrackedObject, now_epoch_ms};
use orbit_ingest::{IngestError, PositionFetcher};
use orbit_storage::{GeoStore, StorageError};
use orbit_telemetry::{
    metrics, new_cycle_id, record_fetch_failure, record_fetch_latency_ms, record_fetch_success,
    record_store_failure, record_store_success, record_tick,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, warn};

/// 链路错误（按原因区分，恢复策略由调用方决定）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollError {
    #[error("fetch error: {0}")]
    Fetch(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("store error: {0}")]
    Store(String),
}

impl From<IngestError> for PollError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Fetch(message) => Self::Fetch(message),
            IngestError::Decode(message) => Self::Decode(message),
        }
    }
}

impl From<StorageError> for PollError {
    fn from(err: StorageError) -> Self {
        Self::Store(err.to_string())
    }
}

/// 跟踪器状态。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackerState {
    #[default]
    Init,
    Running,
    Stopped,
}

/// 显式上下文：拉取器、存储与被跟踪对象，启动时构造一次。
#[derive(Clone)]
pub struct TrackerContext {
    pub fetcher: Arc<dyn PositionFetcher>,
    pub store: Arc<dyn GeoStore>,
    pub target: TrackedObject,
}

/// 跟踪器参数。
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub poll_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
        }
    }
}

/// 单个轮询周期的结果，仅在本次迭代内有效。
#[derive(Debug, Clone)]
pub struct PollCycle {
    pub cycle_id: String,
    pub tick: u64,
    pub started_at_ms: i64,
    pub fetch: Result<Coordinate, PollError>,
    /// 拉取失败时为 `None`（本 tick 不写入）
    pub store: Option<Result<(), PollError>>,
}

impl PollCycle {
    /// 本周期是否成功写入点位
    pub fn is_updated(&self) -> bool {
        matches!(self.store, Some(Ok(())))
    }

    /// 本周期的失败原因
    pub fn error(&self) -> Option<&PollError> {
        match (&self.fetch, &self.store) {
            (Err(err), _) => Some(err),
            (Ok(_), Some(Err(err))) => Some(err),
            _ => None,
        }
    }
}

/// 循环停止时的汇总。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub updates: u64,
    pub fetch_failures: u64,
    pub store_failures: u64,
    pub state: TrackerState,
}

impl RunSummary {
    fn record(&mut self, cycle: &PollCycle) {
        self.ticks += 1;
        match (&cycle.fetch, &cycle.store) {
            (Err(_), _) => self.fetch_failures += 1,
            (Ok(_), Some(Ok(()))) => self.updates += 1,
            (Ok(_), Some(Err(_))) => self.store_failures += 1,
            (Ok(_), None) => {}
        }
    }
}

/// 轮询跟踪器。
///
/// 只能通过 [`Tracker::start`] 构造，因此持有的实例一定已完成围栏注册。
pub struct Tracker {
    ctx: TrackerContext,
    config: TrackerConfig,
    state: TrackerState,
}

impl Tracker {
    /// Init → Running：注册围栏。
    ///
    /// 注册失败返回错误（致命，不重试），此时不会发起任何位置拉取。
    pub async fn start(
        ctx: TrackerContext,
        config: TrackerConfig,
        fence: &GeofenceSpec,
    ) -> Result<Self, PollError> {
        info!(
            target: "orbit.pipeline",
            collection = %fence.target.collection,
            center = %fence.center,
            radius_m = %fence.radius_m,
            "geofence_register"
        );
        if let Err(err) = ctx.store.register_geofence(fence).await {
            error!(
                target: "orbit.pipeline",
                error = %err,
                state = ?TrackerState::Stopped,
                "geofence_register_failed"
            );
            return Err(err.into());
        }
        info!(target: "orbit.pipeline", "geofence_registered");
        Ok(Self {
            ctx,
            config,
            state: TrackerState::Running,
        })
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// 执行一个轮询周期：拉取一次，成功则写入一次。
    pub async fn run_cycle(&self, tick: u64) -> PollCycle {
        let cycle_id = new_cycle_id();
        let span = tracing::info_span!("poll_cycle", cycle_id = %cycle_id, tick = tick);
        self.execute_cycle(cycle_id, tick).instrument(span).await
    }

    async fn execute_cycle(&self, cycle_id: String, tick: u64) -> PollCycle {
        record_tick();
        let started_at_ms = now_epoch_ms();

        let fetch_started_at = Instant::now();
        let fetch = self.ctx.fetcher.fetch().await.map_err(PollError::from);
        record_fetch_latency_ms(fetch_started_at.elapsed().as_millis() as u64);

        let store = match &fetch {
            Ok(position) => {
                record_fetch_success();
                info!(
                    target: "orbit.pipeline",
                    latitude = %position.latitude,
                    longitude = %position.longitude,
                    "position_fetched"
                );
                Some(self.update_point(position).await)
            }
            Err(err) => {
                record_fetch_failure();
                warn!(target: "orbit.pipeline", error = %err, "fetch_failed");
                None
            }
        };

        PollCycle {
            cycle_id,
            tick,
            started_at_ms,
            fetch,
            store,
        }
    }

    async fn update_point(&self, position: &Coordinate) -> Result<(), PollError> {
        let target = &self.ctx.target;
        match self
            .ctx
            .store
            .set_point(&target.collection, &target.object_id, position)
            .await
        {
            Ok(()) => {
                record_store_success();
                info!(
                    target: "orbit.pipeline",
                    collection = %target.collection,
                    object_id = %target.object_id,
                    "point_updated"
                );
                Ok(())
            }
            Err(err) => {
                record_store_failure();
                warn!(target: "orbit.pipeline", error = %err, "store_update_failed");
                Err(err.into())
            }
        }
    }

    /// Running → Stopped：按固定间隔执行周期，直到 `cancel` 被触发。
    ///
    /// 第一个 tick 在启动后一个间隔触发。周期内不响应取消，进行中的周期
    /// 总会执行完；周期超过间隔时下一个 tick 顺延，不补发。
    pub async fn run(mut self, cancel: CancellationToken) -> RunSummary {
        // tokio interval 不接受零周期
        let period = self.config.poll_interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            target: "orbit.pipeline",
            interval_ms = period.as_millis() as u64,
            "tracker_running"
        );

        let mut summary = RunSummary::default();
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let cycle = self.run_cycle(summary.ticks + 1).await;
                    summary.record(&cycle);
                }
            }
        }

        self.state = TrackerState::Stopped;
        summary.state = self.state;
        info!(
            target: "orbit.pipeline",
            ticks = summary.ticks,
            updates = summary.updates,
            fetch_failures = summary.fetch_failures,
            store_failures = summary.store_failures,
            metrics = ?metrics().snapshot(),
            "tracker_stopped"
        );
        summary
    }
}
