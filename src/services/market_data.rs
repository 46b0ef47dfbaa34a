//! Market data provider interfaces consumed by the polling loop.
//!
//! Providers absorb their own failures: an unavailable chain is `None` and a
//! failed price fetch is an empty series.

use async_trait::async_trait;

use crate::models::chain::ChainSnapshot;
use crate::models::indicators::PriceSeries;

#[async_trait]
pub trait OptionChainProvider: Send + Sync {
    /// Latest chain snapshot, or `None` when it could not be fetched
    async fn fetch_chain_snapshot(&self) -> Option<ChainSnapshot>;
}

#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// Most recent `lookback` candles of `symbol`, empty on failure
    async fn fetch_price_series(&self, symbol: &str, lookback: usize) -> PriceSeries;
}

/// Fixed in-memory market data
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    snapshot: Option<ChainSnapshot>,
    series: PriceSeries,
}

impl StaticMarketData {
    pub fn new(snapshot: Option<ChainSnapshot>, series: PriceSeries) -> Self {
        Self { snapshot, series }
    }
}

#[async_trait]
impl OptionChainProvider for StaticMarketData {
    async fn fetch_chain_snapshot(&self) -> Option<ChainSnapshot> {
        self.snapshot.clone()
    }
}

#[async_trait]
impl PriceSeriesProvider for StaticMarketData {
    async fn fetch_price_series(&self, _symbol: &str, lookback: usize) -> PriceSeries {
        self.series.clone().tail(lookback)
    }
}
