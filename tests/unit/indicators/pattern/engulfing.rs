//! Unit tests for the bullish engulfing detector

use crate::fixtures::candle;
use strikewise::indicators::pattern::{is_bullish_engulfing, is_bullish_engulfing_pair};
use strikewise::models::indicators::{PricePoint, PriceSeries};

#[test]
fn test_classic_bullish_engulfing() {
    let series = PriceSeries::new(vec![candle(0, 105.0, 100.0), candle(1, 99.0, 106.0)]);
    assert!(is_bullish_engulfing(&series));
}

#[test]
fn test_doji_previous_counts_as_bearish() {
    assert!(is_bullish_engulfing_pair(
        &candle(0, 100.0, 100.0),
        &candle(1, 99.0, 101.0)
    ));
}

#[test]
fn test_must_open_below_previous_close() {
    assert!(!is_bullish_engulfing_pair(
        &candle(0, 105.0, 100.0),
        &candle(1, 101.0, 106.0)
    ));
}

#[test]
fn test_must_close_above_previous_open() {
    assert!(!is_bullish_engulfing_pair(
        &candle(0, 105.0, 100.0),
        &candle(1, 99.0, 104.0)
    ));
}

#[test]
fn test_previous_bullish_is_not_a_match() {
    assert!(!is_bullish_engulfing_pair(
        &candle(0, 100.0, 105.0),
        &candle(1, 99.0, 106.0)
    ));
}

#[test]
fn test_current_bearish_is_not_a_match() {
    assert!(!is_bullish_engulfing_pair(
        &candle(0, 105.0, 100.0),
        &candle(1, 107.0, 98.0)
    ));
}

#[test]
fn test_insufficient_candles() {
    assert!(!is_bullish_engulfing(&PriceSeries::empty()));
    assert!(!is_bullish_engulfing(&PriceSeries::new(vec![candle(0, 99.0, 106.0)])));
}

#[test]
fn test_malformed_candle_is_not_a_match() {
    let broken = PricePoint {
        close: f64::NAN,
        ..candle(1, 99.0, 106.0)
    };
    assert!(!is_bullish_engulfing_pair(&candle(0, 105.0, 100.0), &broken));
}

#[test]
fn test_only_last_two_candles_matter() {
    let series = PriceSeries::new(vec![
        candle(0, 105.0, 100.0),
        candle(1, 99.0, 106.0),
        candle(2, 106.0, 107.0),
    ]);
    assert!(!is_bullish_engulfing(&series));
}
