//! # Orbit Storage 模块
//!
//! 本模块提供地理存储抽象层，负责与 Tile38 这类地理 key/command 存储交互。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：`GeoStore` 异步 Trait
//! 2. **命令构造层** (`command.rs`)：`GeoCommand`，命令名与参数的文本编码
//! 3. **错误处理层** (`error.rs`)：`StorageError`（地址/连接/超时/拒绝）
//! 4. **连接管理层** (`connection.rs`)：连接串生成与单条长连接建立
//! 5. **实现层**：
//!    - `tile38.rs`：基于 redis crate 的 RESP 实现（生产环境使用）
//!    - `in_memory/`：内存实现（用于测试，记录命令并支持注入失败）
//!
//! ## 协议
//!
//! - 围栏注册：`NEARBY <collection> FENCE DETECT enter POINT <lat> <lon> <radius_m>`
//! - 点位写入：`SET <collection> <objectID> POINT <lat> <lon>`
//!
//! 回复内容不做解析，仅用于错误判定。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use orbit_storage::{GeoStore, Tile38Store};
//! use domain::{Coordinate, GeofenceSpec, StoreAddress, TrackedObject};
//! use std::time::Duration;
//!
//! let address = StoreAddress::new("127.0.0.1", 9851);
//! let store = Tile38Store::connect(&address, Duration::from_secs(5)).await?;
//! let fence = GeofenceSpec::new(
//!     TrackedObject::default(),
//!     Coordinate::new("33.4484", "112.0740"),
//!     "5000",
//! );
//! store.register_geofence(&fence).await?;
//! store
//!     .set_point("earth-orbit", "iss", &Coordinate::new("10.1", "20.2"))
//!     .await?;
//! ```

pub mod command;
pub mod connection;
pub mod error;
pub mod in_memory;
pub mod tile38;
pub mod traits;

pub use command::GeoCommand;
pub use connection::*;
pub use error::*;
pub use in_memory::InMemoryGeoStore;
pub use tile38::Tile38Store;
pub use traits::*;
