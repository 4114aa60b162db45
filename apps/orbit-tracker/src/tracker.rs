//! 轮询链路装配模块
//!
//! 负责把配置、Tile38 连接、HTTP 拉取器与轮询跟踪器组装在一起：
//! 先完成所有本地校验，再连接存储并注册围栏，最后进入定时循环，
//! 直到收到终止信号。

use orbit_config::{AppConfig, ConfigError, ConfigInput};
use orbit_ingest::{HttpPositionConfig, HttpPositionFetcher, IngestError};
use orbit_pipeline::{PollError, RunSummary, Tracker, TrackerConfig, TrackerContext};
use orbit_storage::{StorageError, Tile38Store};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// 启动阶段错误（全部致命）。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("geofence registration failed: {0}")]
    Poll(#[from] PollError),
}

/// 启动并运行，直到收到终止信号。
///
/// `cli_input` 中出现的项覆盖环境变量。
pub async fn run(cli_input: ConfigInput) -> Result<RunSummary, AppError> {
    // 1. 本地校验：地址/位置/半径/间隔格式错误时不发起任何网络请求
    let config = AppConfig::from_input(ConfigInput::from_env().merge(cli_input))?;
    info!(
        target: "orbit.app",
        store_address = %config.store_address.authority(),
        collection = %config.geofence.target.collection,
        object_id = %config.geofence.target.object_id,
        center = %config.geofence.center,
        radius_m = %config.geofence.radius_m,
        poll_interval_secs = config.poll_interval.as_secs(),
        position_url = %config.position_url,
        "config_loaded"
    );

    // 2. 单条 Tile38 长连接，进程退出（含启动失败提前返回）时随 drop 释放
    let store = Arc::new(
        Tile38Store::connect(&config.store_address, config.store_timeout).await?,
    );
    info!(target: "orbit.app", "store_connected");

    let fetcher = Arc::new(HttpPositionFetcher::new(HttpPositionConfig {
        url: config.position_url.clone(),
        timeout: config.http_timeout,
    })?);

    // 3. 注册围栏（Init → Running）
    let ctx = TrackerContext {
        fetcher,
        store,
        target: config.geofence.target.clone(),
    };
    let tracker = Tracker::start(
        ctx,
        TrackerConfig {
            poll_interval: config.poll_interval,
        },
        &config.geofence,
    )
    .await?;

    // 4. 定时循环（Running → Stopped 仅由终止信号触发）
    let cancel = CancellationToken::new();
    spawn_shutdown_listener(cancel.clone());
    Ok(tracker.run(cancel).await)
}

fn spawn_shutdown_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!(target: "orbit.app", "shutdown_signal_received");
                cancel.cancel();
            }
            Err(err) => {
                warn!(target: "orbit.app", error = %err, "shutdown_signal_unavailable");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(address: &str, location: &str) -> ConfigInput {
        ConfigInput {
            store_address: Some(address.to_string()),
            geofence_radius_m: Some("5000".to_string()),
            geofence_location: Some(location.to_string()),
            poll_interval_seconds: Some("10".to_string()),
            ..ConfigInput::default()
        }
    }

    #[tokio::test]
    async fn address_without_port_fails_before_network() {
        let err = run(input("localhost", "33.4484,112.0740"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Address(_))));
    }

    #[tokio::test]
    async fn malformed_location_fails_before_connecting() {
        // 地址不可达；若先连接则会得到 Storage 错误
        let err = run(input("127.0.0.1:1", "33.4484 112.0740"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Location(_))));
    }

    #[tokio::test]
    async fn unreachable_store_is_fatal() {
        let err = run(input("127.0.0.1:1", "33.4484,112.0740"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(StorageError::Connect(_))));
    }
}
