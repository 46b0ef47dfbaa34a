//! Integration tests for the API Server
//!
//! Tests health, metrics, the JSON signal endpoint and the dashboard.


use serde_json::Value;
use strikewise::compute_signal;
use strikewise::models::chain::ChainSnapshot;
use strikewise::models::indicators::PriceSeries;

use crate::test_utils::{uptrend_series, worked_example_snapshot};
use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "strikewise-signal-engine");
    assert_eq!(body["has_signal"], false);
}

#[tokio::test]
async fn health_endpoint_sees_published_signal() {
    let app = TestApiServer::new().await;
    app.publish(compute_signal(&ChainSnapshot::empty(), &PriceSeries::empty(), false));

    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["has_signal"], true);
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    for metric in [
        "http_requests_total",
        "http_request_duration_seconds",
        "http_requests_in_flight",
        "signal_cycles_total",
        "chain_fetch_failures_total",
    ] {
        assert!(body.contains(metric), "Expected {} metric", metric);
    }
    assert!(body.contains(r#"signal_outcomes_total{signal="strong_buy_call"} 0"#));
}

#[tokio::test]
async fn signal_endpoint_unavailable_before_first_cycle() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/signal").await;
    assert_eq!(response.status_code(), 503);
}

#[tokio::test]
async fn signal_endpoint_returns_latest_record() {
    let app = TestApiServer::new().await;
    let record = compute_signal(&worked_example_snapshot(), &uptrend_series(30), true);
    let published = app.publish(record);

    let response = app.server.get("/api/signal").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["signal"], "BUY_PUT");
    assert_eq!(body["label"], "BUY PUT");
    assert_eq!(body["color"], "#c0392b");
    assert_eq!(body["vote_tally"]["call_count"], 1);
    assert_eq!(body["vote_tally"]["put_count"], 2);
    assert_eq!(body["reported_time"], published.reported_time.as_str());
    assert_eq!(
        body["reasons"].as_array().map(Vec::len),
        Some(published.record.reasons.len())
    );
    assert_eq!(body["reasons"][0], "Underlying: 17482.00 | ATM strike: 17500");
}

#[tokio::test]
async fn signal_endpoint_follows_newer_publication() {
    let app = TestApiServer::new().await;
    app.publish(compute_signal(&worked_example_snapshot(), &uptrend_series(30), true));
    app.publish(compute_signal(&ChainSnapshot::empty(), &PriceSeries::empty(), false));

    let body: Value = app.server.get("/api/signal").await.json();
    assert_eq!(body["signal"], "MARKET_CLOSED");
}

#[tokio::test]
async fn dashboard_waits_for_first_cycle() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/").await;
    assert_eq!(response.status_code(), 200);

    let html = response.text();
    assert!(html.contains("Waiting for the first signal cycle"));
    assert!(html.contains("http-equiv='refresh' content='15'"));
    assert!(html.contains("Auto-refresh every 15 seconds"));
}

#[tokio::test]
async fn dashboard_renders_signal_and_reasons() {
    let app = TestApiServer::new().await;
    let published = app.publish(compute_signal(&worked_example_snapshot(), &uptrend_series(30), true));

    let html = app.server.get("/").await.text();
    assert!(html.contains(&format!("Last updated: {}", published.reported_time)));
    assert!(html.contains("<h1 style='color:#c0392b'>BUY PUT</h1>"));
    assert!(html.contains("<li>PCR: 0.90 -&gt; NEUTRAL</li>"));
    assert!(html.contains("<li>Votes: CALL 1 | PUT 2</li>"));
}

#[tokio::test]
async fn api_server_handles_sequential_requests() {
    let app = TestApiServer::new().await;
    for _ in 0..10 {
        let response = app.server.get("/health").await;
        assert_eq!(response.status_code(), 200);
    }
    assert!(app.metrics.http_requests_total.get() >= 10);
}
