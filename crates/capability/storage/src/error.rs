//! 存储层错误类型
//!
//! 区分以下几类错误：
//! - 连接串无法被客户端接受
//! - 连接/IO 错误
//! - 命令超时
//! - 命令被存储拒绝（RESP 错误回复）

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("invalid store address: {0}")]
    Address(String),
    #[error("connection error: {0}")]
    Connect(String),
    #[error("command timed out: {0}")]
    Timeout(String),
    #[error("command rejected: {0}")]
    Command(String),
}

impl From<redis::RedisError> for StorageError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal()
        {
            Self::Connect(err.to_string())
        } else {
            Self::Command(err.to_string())
        }
    }
}
