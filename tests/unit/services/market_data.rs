//! Unit tests for the in-memory market data provider

use crate::fixtures::{atm_chain, neutral_leg, uptrend_series};
use strikewise::services::{OptionChainProvider, PriceSeriesProvider, StaticMarketData};

#[test]
fn test_static_provider_returns_snapshot() {
    let snapshot = atm_chain(17_500.0, neutral_leg(), neutral_leg());
    let data = StaticMarketData::new(Some(snapshot.clone()), uptrend_series(10));

    let fetched = tokio_test::block_on(data.fetch_chain_snapshot());
    assert_eq!(fetched, Some(snapshot));
}

#[test]
fn test_static_provider_trims_to_lookback() {
    let data = StaticMarketData::new(None, uptrend_series(10));

    let series = tokio_test::block_on(data.fetch_price_series("^NSEI", 4));
    assert_eq!(series.len(), 4);
    assert_eq!(series.closes(), uptrend_series(10).closes()[6..].to_vec());
    assert!(tokio_test::block_on(data.fetch_chain_snapshot()).is_none());
}
