pub mod data;

pub use data::{Coordinate, GeofenceSpec, StoreAddress, TrackedObject};

/// 当前毫秒时间戳（Unix epoch）。
pub fn now_epoch_ms() -> i64 {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as i64
}
