//! Yahoo Finance intraday candles for the underlying
//!
//! Fetches the v8 chart API. Any failure degrades to an empty series; the
//! engine reads an empty series as "no indicator data".

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::indicators::{PricePoint, PriceSeries};
use crate::services::error::FetchError;
use crate::services::market_data::PriceSeriesProvider;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

pub struct YahooPriceProvider {
    http: reqwest::Client,
    base_url: String,
    interval: String,
    range: String,
}

impl YahooPriceProvider {
    pub fn new(
        base_url: impl Into<String>,
        interval: impl Into<String>,
        range: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            interval: interval.into(),
            range: range.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            config.yahoo_chart_url.clone(),
            config.price_interval.clone(),
            config.price_range.clone(),
            config.http_timeout,
        )
    }

    pub async fn fetch_points(&self, symbol: &str) -> Result<Vec<PricePoint>, FetchError> {
        let url = format!("{}/{}", self.base_url, symbol);
        let response = self
            .http
            .get(&url)
            .query(&[("interval", self.interval.as_str()), ("range", self.range.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status, url });
        }

        let body = response.bytes().await?;
        let chart: ChartResponse = serde_json::from_slice(&body)?;
        parse_chart(chart)
    }
}

fn parse_chart(resp: ChartResponse) -> Result<Vec<PricePoint>, FetchError> {
    let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
        Some(err) => FetchError::Shape(format!("{}: {}", err.code, err.description)),
        None => FetchError::Shape("empty result with no error".into()),
    })?;

    let data = result
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Shape("result array is empty".into()))?;

    let timestamps = data.timestamp.unwrap_or_default();
    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Shape("no quote data".into()))?;

    let points = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let timestamp = DateTime::from_timestamp(ts, 0)?;
            // Rows with any missing OHLC value are gaps, not candles
            let open = quote.open.get(i).copied().flatten()?;
            let high = quote.high.get(i).copied().flatten()?;
            let low = quote.low.get(i).copied().flatten()?;
            let close = quote.close.get(i).copied().flatten()?;
            Some(PricePoint::new(open, high, low, close, timestamp))
        })
        .collect();

    Ok(points)
}

#[async_trait]
impl PriceSeriesProvider for YahooPriceProvider {
    async fn fetch_price_series(&self, symbol: &str, lookback: usize) -> PriceSeries {
        match self.fetch_points(symbol).await {
            Ok(points) => {
                debug!(symbol = %symbol, count = points.len(), "YahooPriceProvider: candles fetched");
                PriceSeries::new(points).tail(lookback)
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "YahooPriceProvider: price fetch failed, using empty series");
                PriceSeries::empty()
            }
        }
    }
}
