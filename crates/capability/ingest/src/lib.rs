//! 位置采集能力：从远端 HTTP 接口拉取被跟踪对象的当前坐标。
//!
//! 每个 tick 只发起一次请求，不做重试；失败按 [`IngestError`] 区分为
//! 网络类（`Fetch`）与解码类（`Decode`）。

use async_trait::async_trait;
use domain::Coordinate;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// 采集错误。
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// 请求构造、连接、超时或非 2xx 状态
    #[error("fetch error: {0}")]
    Fetch(String),
    /// 响应体无法解码为坐标
    #[error("decode error: {0}")]
    Decode(String),
}

/// 位置拉取器抽象。
#[async_trait]
pub trait PositionFetcher: Send + Sync {
    async fn fetch(&self) -> Result<Coordinate, IngestError>;
}

/// 位置接口响应体。`message`、`timestamp` 等字段直接忽略。
#[derive(Debug, Deserialize)]
struct PositionResponse {
    iss_position: Option<WirePosition>,
}

/// 响应体中的坐标对象。
///
/// 按键名取值：`latitude` → 纬度，`longitude` → 经度。
#[derive(Debug, Deserialize)]
struct WirePosition {
    latitude: serde_json::Value,
    longitude: serde_json::Value,
}

/// 解码位置接口响应体。
pub fn decode_position(body: &str) -> Result<Coordinate, IngestError> {
    let response: PositionResponse =
        serde_json::from_str(body).map_err(|err| IngestError::Decode(err.to_string()))?;
    let position = response
        .iss_position
        .ok_or_else(|| IngestError::Decode("iss_position missing".to_string()))?;
    let latitude = coordinate_text("latitude", position.latitude)?;
    let longitude = coordinate_text("longitude", position.longitude)?;
    Ok(Coordinate::new(latitude, longitude))
}

/// 上游以字符串下发坐标；兼容数值形式，保留其 JSON 文本。
fn coordinate_text(field: &str, value: serde_json::Value) -> Result<String, IngestError> {
    match value {
        serde_json::Value::String(text) if !text.trim().is_empty() => {
            Ok(text.trim().to_string())
        }
        serde_json::Value::Number(number) => Ok(number.to_string()),
        other => Err(IngestError::Decode(format!(
            "{} is not a coordinate: {}",
            field, other
        ))),
    }
}

/// HTTP 位置拉取器配置。
#[derive(Debug, Clone)]
pub struct HttpPositionConfig {
    pub url: String,
    pub timeout: Duration,
}

/// 基于 reqwest 的位置拉取器。
///
/// 客户端只构建一次，超时作用于整个请求（连接 + 读取响应体）。
#[derive(Debug, Clone)]
pub struct HttpPositionFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpPositionFetcher {
    pub fn new(config: HttpPositionConfig) -> Result<Self, IngestError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| IngestError::Fetch(err.to_string()))?;
        Ok(Self::with_client(client, config.url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl PositionFetcher for HttpPositionFetcher {
    async fn fetch(&self) -> Result<Coordinate, IngestError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| IngestError::Fetch(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Fetch(format!("unexpected status {}", status)));
        }
        let body = response
            .text()
            .await
            .map_err(|err| IngestError::Fetch(err.to_string()))?;
        let position = decode_position(&body)?;
        debug!(
            target: "orbit.ingest",
            latitude = %position.latitude,
            longitude = %position.longitude,
            "position_decoded"
        );
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_upstream_payload() {
        let body = r#"{
            "message": "success",
            "timestamp": 1700000000,
            "iss_position": {"latitude": "-12.3456", "longitude": "98.7654"}
        }"#;
        let position = decode_position(body).unwrap();
        assert_eq!(position.latitude, "-12.3456");
        assert_eq!(position.longitude, "98.7654");
    }

    #[test]
    fn decode_numeric_coordinates() {
        let body = r#"{"iss_position": {"latitude": 10.5, "longitude": -20}}"#;
        let position = decode_position(body).unwrap();
        assert_eq!(position.latitude, "10.5");
        assert_eq!(position.longitude, "-20");
    }

    #[test]
    fn decode_rejects_missing_position() {
        let err = decode_position(r#"{"message": "success"}"#).unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));

        let err = decode_position(r#"{"iss_position": null}"#).unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
    }

    #[test]
    fn decode_rejects_bad_fields() {
        let err =
            decode_position(r#"{"iss_position": {"latitude": "1.0"}}"#).unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));

        let err = decode_position(r#"{"iss_position": {"latitude": true, "longitude": "2"}}"#)
            .unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));

        let err = decode_position(r#"{"iss_position": {"latitude": " ", "longitude": "2"}}"#)
            .unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
    }

    #[test]
    fn decode_rejects_non_json() {
        let err = decode_position("<html>busy</html>").unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
    }
}
