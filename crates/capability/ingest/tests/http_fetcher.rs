use orbit_ingest::{HttpPositionConfig, HttpPositionFetcher, IngestError, PositionFetcher};
use std::time::Duration;

fn fetcher_for(url: String) -> HttpPositionFetcher {
    HttpPositionFetcher::new(HttpPositionConfig {
        url,
        timeout: Duration::from_secs(10),
    })
    .expect("client")
}

#[tokio::test]
async fn fetch_decodes_position() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/iss-now.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"timestamp": 1700000000, "message": "success",
                "iss_position": {"latitude": "33.4484", "longitude": "112.0740"}}"#,
        )
        .create_async()
        .await;

    let fetcher = fetcher_for(format!("{}/iss-now.json", server.url()));
    let position = fetcher.fetch().await.expect("position");
    assert_eq!(position.latitude, "33.4484");
    assert_eq!(position.longitude, "112.0740");
    mock.assert_async().await;
}

#[tokio::test]
async fn fetch_reports_decode_error_for_bad_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/iss-now.json")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let fetcher = fetcher_for(format!("{}/iss-now.json", server.url()));
    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, IngestError::Decode(_)));
}

#[tokio::test]
async fn fetch_reports_fetch_error_for_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/iss-now.json")
        .with_status(503)
        .create_async()
        .await;

    let fetcher = fetcher_for(format!("{}/iss-now.json", server.url()));
    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, IngestError::Fetch(_)));
}

#[tokio::test]
async fn fetch_reports_fetch_error_when_unreachable() {
    let fetcher = fetcher_for("http://127.0.0.1:1/iss-now.json".to_string());
    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, IngestError::Fetch(_)));
}

#[tokio::test]
async fn fetch_reports_fetch_error_for_bad_url() {
    let fetcher = fetcher_for("not a url".to_string());
    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, IngestError::Fetch(_)));
}
