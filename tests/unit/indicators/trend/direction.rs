//! Unit tests for the short-term trend

use crate::fixtures::{downtrend_series, series_from_closes, uptrend_series};
use strikewise::indicators::trend::{calculate_trend_default, market_trend};
use strikewise::models::indicators::{PriceSeries, Trend};

#[test]
fn test_trend_direction() {
    assert_eq!(calculate_trend_default(&uptrend_series(10)), Trend::Up);
    assert_eq!(calculate_trend_default(&downtrend_series(10)), Trend::Down);
}

#[test]
fn test_trend_flat_is_neutral() {
    let series = series_from_closes(&[100.0, 101.0, 99.0, 102.0, 100.0]);
    assert_eq!(calculate_trend_default(&series), Trend::Neutral);
}

#[test]
fn test_trend_needs_full_window() {
    assert_eq!(market_trend(&[1.0, 2.0, 3.0, 4.0], 5), Trend::Neutral);
    assert_eq!(calculate_trend_default(&PriceSeries::empty()), Trend::Neutral);
}

#[test]
fn test_trend_only_reads_trailing_window() {
    let closes = [200.0, 100.0, 101.0, 102.0, 103.0, 104.0];
    assert_eq!(market_trend(&closes, 5), Trend::Up);
}
