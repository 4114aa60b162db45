//! Tile38 地理存储实现（RESP 协议）

use crate::command::GeoCommand;
use crate::connection::connect_multiplexed;
use crate::error::StorageError;
use crate::traits::GeoStore;
use domain::{Coordinate, GeofenceSpec, StoreAddress};
use redis::aio::MultiplexedConnection;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Tile38 地理存储
///
/// 持有进程内唯一的一条连接；围栏注册与点位写入顺序复用该连接，
/// 互斥锁保证同一时刻只有一条命令在途。值被 drop 时连接随之关闭。
pub struct Tile38Store {
    connection: Mutex<MultiplexedConnection>,
    command_timeout: Duration,
}

impl Tile38Store {
    /// 连接 Tile38
    ///
    /// 地址由配置层校验；连接在 `command_timeout` 内未建立返回 `StorageError::Connect`。
    pub async fn connect(
        address: &StoreAddress,
        command_timeout: Duration,
    ) -> Result<Self, StorageError> {
        let connection = connect_multiplexed(address, command_timeout).await?;
        Ok(Self {
            connection: Mutex::new(connection),
            command_timeout,
        })
    }

    /// 执行命令，回复内容仅用于错误判定
    async fn execute(&self, command: GeoCommand) -> Result<(), StorageError> {
        let cmd = command.to_redis_cmd();
        let mut connection = self.connection.lock().await;
        let reply = tokio::time::timeout(
            self.command_timeout,
            cmd.query_async::<_, redis::Value>(&mut *connection),
        )
        .await
        .map_err(|_| {
            StorageError::Timeout(format!("{} after {:?}", command.name(), self.command_timeout))
        })??;
        debug!(
            target: "orbit.storage",
            command = %command,
            reply = ?reply,
            "store_command_ack"
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl GeoStore for Tile38Store {
    async fn register_geofence(&self, fence: &GeofenceSpec) -> Result<(), StorageError> {
        self.execute(GeoCommand::nearby_fence(fence)).await
    }

    async fn set_point(
        &self,
        collection: &str,
        object_id: &str,
        position: &Coordinate,
    ) -> Result<(), StorageError> {
        self.execute(GeoCommand::set_point(collection, object_id, position))
            .await
    }
}
