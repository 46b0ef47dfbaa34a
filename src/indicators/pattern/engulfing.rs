//! Bullish engulfing candle pattern

use crate::models::indicators::{PricePoint, PriceSeries};

/// Check whether `current` is a bullish candle whose body engulfs a bearish `previous`
pub fn is_bullish_engulfing_pair(previous: &PricePoint, current: &PricePoint) -> bool {
    if !previous.is_well_formed() || !current.is_well_formed() {
        return false;
    }

    previous.is_bearish()
        && current.is_bullish()
        && current.open < previous.close
        && current.close > previous.open
}

/// Check the last two candles of the series; fewer than two is never a match
pub fn is_bullish_engulfing(series: &PriceSeries) -> bool {
    series
        .last_two()
        .map(|(previous, current)| is_bullish_engulfing_pair(previous, current))
        .unwrap_or(false)
}
