//! 内存存储实现模块
//!
//! 仅用于本地测试和演示：记录每条收到的命令，维护点位表，
//! 并支持注入失败以覆盖围栏注册失败、单次写入失败等场景。

pub mod geo;

pub use geo::*;
