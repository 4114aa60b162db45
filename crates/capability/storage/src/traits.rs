//! 地理存储接口 Trait 定义
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发（便于用内存实现替换）

use crate::error::StorageError;
use async_trait::async_trait;
use domain::{Coordinate, GeofenceSpec};

/// 地理存储接口
#[async_trait]
pub trait GeoStore: Send + Sync {
    /// 注册圆形 enter 围栏（启动时调用一次）
    async fn register_geofence(&self, fence: &GeofenceSpec) -> Result<(), StorageError>;

    /// 写入/覆盖被跟踪对象的点位（幂等）
    async fn set_point(
        &self,
        collection: &str,
        object_id: &str,
        position: &Coordinate,
    ) -> Result<(), StorageError>;
}
