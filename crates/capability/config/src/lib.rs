//! 进程运行配置加载与校验。
//!
//! 配置来源为环境变量（可由 `.env` 提供）与命令行参数，二者先合并为
//! [`ConfigInput`]，再由 [`AppConfig::from_input`] 统一校验。所有格式错误
//! 都在发起任何网络请求之前返回。

use domain::{Coordinate, GeofenceSpec, TrackedObject};
use std::env;
use std::time::Duration;

pub use domain::StoreAddress;

/// 默认位置接口。
pub const DEFAULT_POSITION_URL: &str = "http://api.open-notify.org/iss-now.json";
/// 默认轮询间隔（秒）。
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 60;
/// 默认 HTTP 超时（秒）。
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;
/// 默认存储命令超时（秒）。
pub const DEFAULT_STORE_TIMEOUT_SECONDS: u64 = 5;

/// 配置加载错误。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
    #[error("tile38 address format incorrect, expected host:port: {0}")]
    Address(String),
    #[error("location format requires a ',' separating lat and lon: {0}")]
    Location(String),
}

/// 未校验的原始配置（环境变量或命令行参数）。
#[derive(Debug, Clone, Default)]
pub struct ConfigInput {
    pub store_address: Option<String>,
    pub geofence_radius_m: Option<String>,
    pub geofence_location: Option<String>,
    pub poll_interval_seconds: Option<String>,
    pub position_url: Option<String>,
    pub http_timeout_seconds: Option<String>,
    pub store_timeout_seconds: Option<String>,
    pub collection: Option<String>,
    pub object_id: Option<String>,
}

impl ConfigInput {
    /// 从环境变量读取原始配置。
    pub fn from_env() -> Self {
        Self {
            store_address: read_optional("ORBIT_TILE38_ADDR"),
            geofence_radius_m: read_optional("ORBIT_GEOFENCE_RADIUS_M"),
            geofence_location: read_optional("ORBIT_GEOFENCE_LOCATION"),
            poll_interval_seconds: read_optional("ORBIT_POLL_INTERVAL_SECONDS"),
            position_url: read_optional("ORBIT_POSITION_URL"),
            http_timeout_seconds: read_optional("ORBIT_HTTP_TIMEOUT_SECONDS"),
            store_timeout_seconds: read_optional("ORBIT_STORE_TIMEOUT_SECONDS"),
            collection: read_optional("ORBIT_COLLECTION"),
            object_id: read_optional("ORBIT_OBJECT_ID"),
        }
    }

    /// 以 `other` 中已设置的字段覆盖当前值（命令行优先于环境变量）。
    pub fn merge(self, other: ConfigInput) -> Self {
        Self {
            store_address: other.store_address.or(self.store_address),
            geofence_radius_m: other.geofence_radius_m.or(self.geofence_radius_m),
            geofence_location: other.geofence_location.or(self.geofence_location),
            poll_interval_seconds: other.poll_interval_seconds.or(self.poll_interval_seconds),
            position_url: other.position_url.or(self.position_url),
            http_timeout_seconds: other.http_timeout_seconds.or(self.http_timeout_seconds),
            store_timeout_seconds: other.store_timeout_seconds.or(self.store_timeout_seconds),
            collection: other.collection.or(self.collection),
            object_id: other.object_id.or(self.object_id),
        }
    }
}

/// 应用运行配置（已校验）。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_address: StoreAddress,
    pub geofence: GeofenceSpec,
    pub poll_interval: Duration,
    pub position_url: String,
    pub http_timeout: Duration,
    pub store_timeout: Duration,
}

impl AppConfig {
    /// 校验原始配置。
    ///
    /// 校验顺序：地址 → 位置 → 半径 → 间隔 → 其余可选项。
    pub fn from_input(input: ConfigInput) -> Result<Self, ConfigError> {
        let address = input
            .store_address
            .ok_or_else(|| ConfigError::Missing("tile38 address".to_string()))?;
        let store_address = parse_store_address(&address)?;

        let location = input
            .geofence_location
            .ok_or_else(|| ConfigError::Missing("geofence location".to_string()))?;
        let center = parse_location(&location)?;

        let radius = input
            .geofence_radius_m
            .ok_or_else(|| ConfigError::Missing("geofence radius".to_string()))?;
        let radius_m = parse_radius(&radius)?;

        let poll_interval = read_positive_seconds(
            "poll interval",
            input.poll_interval_seconds,
            DEFAULT_POLL_INTERVAL_SECONDS,
        )?;
        let http_timeout = read_positive_seconds(
            "http timeout",
            input.http_timeout_seconds,
            DEFAULT_HTTP_TIMEOUT_SECONDS,
        )?;
        let store_timeout = read_positive_seconds(
            "store timeout",
            input.store_timeout_seconds,
            DEFAULT_STORE_TIMEOUT_SECONDS,
        )?;

        let defaults = TrackedObject::default();
        let target = TrackedObject::new(
            input.collection.unwrap_or(defaults.collection),
            input.object_id.unwrap_or(defaults.object_id),
        );
        let position_url = input
            .position_url
            .unwrap_or_else(|| DEFAULT_POSITION_URL.to_string());

        Ok(Self {
            store_address,
            geofence: GeofenceSpec::new(target, center, radius_m),
            poll_interval,
            position_url,
            http_timeout,
            store_timeout,
        })
    }
}

/// 解析 `host:port` 地址。
///
/// 以最后一个 `:` 切分；主机不能为空，端口必须是合法 u16。
pub fn parse_store_address(value: &str) -> Result<StoreAddress, ConfigError> {
    let value = value.trim();
    let (host, port) = value
        .rsplit_once(':')
        .ok_or_else(|| ConfigError::Address(value.to_string()))?;
    if host.is_empty() {
        return Err(ConfigError::Address(value.to_string()));
    }
    let port = port
        .parse::<u16>()
        .map_err(|_| ConfigError::Address(value.to_string()))?;
    Ok(StoreAddress::new(host, port))
}

/// 解析 `lat,lon` 位置。
///
/// 必须恰好包含一个 `,`，两侧去空白后非空；数值原样保留为文本。
pub fn parse_location(value: &str) -> Result<Coordinate, ConfigError> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| ConfigError::Location(value.to_string()))?;
    let (lat, lon) = (lat.trim(), lon.trim());
    if lat.is_empty() || lon.is_empty() || lon.contains(',') {
        return Err(ConfigError::Location(value.to_string()));
    }
    Ok(Coordinate::new(lat, lon))
}

/// 校验围栏半径（非负数值），返回原始文本。
fn parse_radius(value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(radius) if radius.is_finite() && radius >= 0.0 => Ok(value.to_string()),
        _ => Err(ConfigError::Invalid(
            "geofence radius".to_string(),
            value.to_string(),
        )),
    }
}

fn read_positive_seconds(
    key: &str,
    value: Option<String>,
    default: u64,
) -> Result<Duration, ConfigError> {
    let seconds = match value {
        Some(value) => match value.trim().parse::<u64>() {
            Ok(seconds) if seconds > 0 => seconds,
            _ => return Err(ConfigError::Invalid(key.to_string(), value)),
        },
        None => default,
    };
    Ok(Duration::from_secs(seconds))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
