use std::fmt;

/// 地理坐标（十进制度）。
///
/// 经纬度以文本形式端到端传递，避免浮点往返带来的精度损失；
/// 不做范围校验，越界值原样透传给存储。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinate {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// 地理存储地址（已校验的 `host:port`）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAddress {
    pub host: String,
    pub port: u16,
}

impl StoreAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port` 形式。
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 被跟踪对象：集合名 + 对象 ID。
///
/// 同一个集合既是围栏监听的集合，也是移动点位所在的集合。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedObject {
    pub collection: String,
    pub object_id: String,
}

impl TrackedObject {
    pub fn new(collection: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            object_id: object_id.into(),
        }
    }
}

impl Default for TrackedObject {
    /// ISS 在 `earth-orbit` 集合中的默认标识。
    fn default() -> Self {
        Self::new("earth-orbit", "iss")
    }
}

/// 圆形 enter 围栏定义（进程生命周期内只注册一次）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeofenceSpec {
    pub target: TrackedObject,
    pub center: Coordinate,
    /// 半径（米），保持配置中的原始文本。
    pub radius_m: String,
}

impl GeofenceSpec {
    pub fn new(target: TrackedObject, center: Coordinate, radius_m: impl Into<String>) -> Self {
        Self {
            target,
            center,
            radius_m: radius_m.into(),
        }
    }
}
