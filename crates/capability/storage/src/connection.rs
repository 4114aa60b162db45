//! Tile38 连接管理
//!
//! 提供连接初始化功能：
//! - store_url：由已校验的地址生成 `redis://` 连接串
//! - connect_multiplexed：在超时内建立单条长连接

use crate::error::StorageError;
use domain::StoreAddress;
use redis::aio::MultiplexedConnection;
use std::time::Duration;

/// 生成连接串；IPv6 主机自动加方括号。
pub fn store_url(address: &StoreAddress) -> String {
    let host = &address.host;
    if host.contains(':') && !host.starts_with('[') {
        format!("redis://[{}]:{}/", host, address.port)
    } else {
        format!("redis://{}:{}/", host, address.port)
    }
}

/// 建立单条长连接
///
/// # 参数
/// - `address`：Tile38 地址
/// - `timeout`：连接超时
pub async fn connect_multiplexed(
    address: &StoreAddress,
    timeout: Duration,
) -> Result<MultiplexedConnection, StorageError> {
    let client = redis::Client::open(store_url(address).as_str())
        .map_err(|err| StorageError::Address(err.to_string()))?;
    match tokio::time::timeout(timeout, client.get_multiplexed_tokio_connection()).await {
        Ok(Ok(connection)) => Ok(connection),
        Ok(Err(err)) => Err(StorageError::Connect(err.to_string())),
        Err(_) => Err(StorageError::Connect(format!(
            "connect to {} timed out after {:?}",
            address.authority(),
            timeout
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::store_url;
    use domain::StoreAddress;

    #[test]
    fn store_url_from_address() {
        assert_eq!(
            store_url(&StoreAddress::new("127.0.0.1", 9851)),
            "redis://127.0.0.1:9851/"
        );
        assert_eq!(
            store_url(&StoreAddress::new("::1", 9851)),
            "redis://[::1]:9851/"
        );
        assert_eq!(
            store_url(&StoreAddress::new("[::1]", 9851)),
            "redis://[::1]:9851/"
        );
    }
}
