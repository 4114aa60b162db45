//! 地理存储命令构造
//!
//! 两条命令均为纯文本参数序列：
//! - `NEARBY <collection> FENCE DETECT enter POINT <lat> <lon> <radius_m>`
//! - `SET <collection> <objectID> POINT <lat> <lon>`
//!
//! 坐标与半径以文本原样编码，不经过浮点转换。

use domain::{Coordinate, GeofenceSpec};
use std::fmt;

/// 发往地理存储的命令。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoCommand {
    /// 圆形 enter 围栏
    NearbyFence {
        collection: String,
        center: Coordinate,
        radius_m: String,
    },
    /// 写入/覆盖点位
    SetPoint {
        collection: String,
        object_id: String,
        position: Coordinate,
    },
}

impl GeoCommand {
    pub fn nearby_fence(fence: &GeofenceSpec) -> Self {
        Self::NearbyFence {
            collection: fence.target.collection.clone(),
            center: fence.center.clone(),
            radius_m: fence.radius_m.clone(),
        }
    }

    pub fn set_point(collection: &str, object_id: &str, position: &Coordinate) -> Self {
        Self::SetPoint {
            collection: collection.to_string(),
            object_id: object_id.to_string(),
            position: position.clone(),
        }
    }

    /// 命令名
    pub fn name(&self) -> &'static str {
        match self {
            Self::NearbyFence { .. } => "NEARBY",
            Self::SetPoint { .. } => "SET",
        }
    }

    /// 命令参数（不含命令名）
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::NearbyFence {
                collection,
                center,
                radius_m,
            } => vec![
                collection.clone(),
                "FENCE".to_string(),
                "DETECT".to_string(),
                "enter".to_string(),
                "POINT".to_string(),
                center.latitude.clone(),
                center.longitude.clone(),
                radius_m.clone(),
            ],
            Self::SetPoint {
                collection,
                object_id,
                position,
            } => vec![
                collection.clone(),
                object_id.clone(),
                "POINT".to_string(),
                position.latitude.clone(),
                position.longitude.clone(),
            ],
        }
    }

    /// 构造 RESP 命令
    pub fn to_redis_cmd(&self) -> redis::Cmd {
        let mut cmd = redis::cmd(self.name());
        for arg in self.args() {
            cmd.arg(arg);
        }
        cmd
    }
}

impl fmt::Display for GeoCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        for arg in self.args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
