//! 地理存储内存实现

use crate::command::GeoCommand;
use crate::error::StorageError;
use crate::traits::GeoStore;
use domain::{Coordinate, GeofenceSpec};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
struct GeoState {
    commands: Vec<GeoCommand>,
    fences: Vec<GeofenceSpec>,
    points: HashMap<(String, String), Coordinate>,
    fail_geofence: bool,
    set_point_failures: usize,
}

/// 地理存储内存实现
#[derive(Default)]
pub struct InMemoryGeoStore {
    state: RwLock<GeoState>,
}

impl InMemoryGeoStore {
    /// 创建新的内存存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 之后的围栏注册全部失败
    pub fn fail_geofence(&self) {
        if let Ok(mut state) = self.state.write() {
            state.fail_geofence = true;
        }
    }

    /// 接下来的 `count` 次点位写入失败
    pub fn fail_next_set_points(&self, count: usize) {
        if let Ok(mut state) = self.state.write() {
            state.set_point_failures = count;
        }
    }

    /// 已收到的命令（按到达顺序，包含被拒绝的命令）
    pub fn commands(&self) -> Vec<GeoCommand> {
        self.state
            .read()
            .map(|state| state.commands.clone())
            .unwrap_or_default()
    }

    /// 已注册的围栏
    pub fn fences(&self) -> Vec<GeofenceSpec> {
        self.state
            .read()
            .map(|state| state.fences.clone())
            .unwrap_or_default()
    }

    /// 查询点位
    pub fn point(&self, collection: &str, object_id: &str) -> Option<Coordinate> {
        let state = self.state.read().ok()?;
        state
            .points
            .get(&(collection.to_string(), object_id.to_string()))
            .cloned()
    }

    /// 点位数量（用于测试）
    pub fn len(&self) -> usize {
        self.state.read().map(|state| state.points.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl GeoStore for InMemoryGeoStore {
    async fn register_geofence(&self, fence: &GeofenceSpec) -> Result<(), StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::Command("lock failed".to_string()))?;
        state.commands.push(GeoCommand::nearby_fence(fence));
        if state.fail_geofence {
            return Err(StorageError::Command("geofence rejected".to_string()));
        }
        state.fences.push(fence.clone());
        Ok(())
    }

    async fn set_point(
        &self,
        collection: &str,
        object_id: &str,
        position: &Coordinate,
    ) -> Result<(), StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::Command("lock failed".to_string()))?;
        state
            .commands
            .push(GeoCommand::set_point(collection, object_id, position));
        if state.set_point_failures > 0 {
            state.set_point_failures -= 1;
            return Err(StorageError::Command("set rejected".to_string()));
        }
        state.points.insert(
            (collection.to_string(), object_id.to_string()),
            position.clone(),
        );
        Ok(())
    }
}
