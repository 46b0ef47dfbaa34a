//! Integration tests for the Yahoo price provider

use serde_json::json;
use std::time::Duration;
use strikewise::services::{PriceSeriesProvider, YahooPriceProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> YahooPriceProvider {
    YahooPriceProvider::new(server.uri(), "5m", "1d", Duration::from_secs(5)).expect("build provider")
}

fn chart_body() -> serde_json::Value {
    json!({
        "chart": {
            "result": [{
                "timestamp": [1700000000, 1700000300, 1700000600, 1700000900],
                "indicators": {
                    "quote": [{
                        "open":  [100.0, 101.0, null, 103.0],
                        "high":  [101.5, 102.5, 103.5, 104.5],
                        "low":   [99.5, 100.5, 101.5, 102.5],
                        "close": [101.0, 102.0, 103.0, 104.0]
                    }]
                }
            }],
            "error": null
        }
    })
}

#[tokio::test]
async fn parses_candles_and_skips_gaps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/NIFTY"))
        .and(query_param("interval", "5m"))
        .and(query_param("range", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body()))
        .mount(&server)
        .await;

    let series = provider(&server).fetch_price_series("NIFTY", 100).await;

    assert_eq!(series.len(), 3);
    assert_eq!(series.closes(), vec![101.0, 102.0, 104.0]);
    assert_eq!(series.points()[0].timestamp.timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn keeps_most_recent_lookback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/NIFTY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body()))
        .mount(&server)
        .await;

    let series = provider(&server).fetch_price_series("NIFTY", 2).await;
    assert_eq!(series.closes(), vec![102.0, 104.0]);
}

#[tokio::test]
async fn chart_error_yields_empty_series() {
    let server = MockServer::start().await;
    let body = json!({
        "chart": {"result": null, "error": {"code": "Not Found", "description": "No data found"}}
    });
    Mock::given(method("GET"))
        .and(path("/NIFTY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let provider = provider(&server);
    assert!(provider.fetch_points("NIFTY").await.is_err());
    assert!(provider.fetch_price_series("NIFTY", 100).await.is_empty());
}

#[tokio::test]
async fn http_failure_yields_empty_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(provider(&server).fetch_price_series("NIFTY", 100).await.is_empty());
}
