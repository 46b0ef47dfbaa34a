//! Short-term market direction

use crate::models::indicators::{PriceSeries, Trend};

pub const DEFAULT_TREND_LOOKBACK: usize = 5;

/// Compare the last close against the first close of the trailing window
///
/// Fewer than `lookback` closes, or a lookback under two, reads as neutral.
pub fn market_trend(closes: &[f64], lookback: usize) -> Trend {
    if lookback < 2 || closes.len() < lookback {
        return Trend::Neutral;
    }

    let window = &closes[closes.len() - lookback..];
    let (first, last) = (window[0], window[lookback - 1]);

    if !first.is_finite() || !last.is_finite() {
        Trend::Neutral
    } else if last > first {
        Trend::Up
    } else if last < first {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

/// Calculate the trend of the last five candles
pub fn calculate_trend_default(series: &PriceSeries) -> Trend {
    market_trend(&series.closes(), DEFAULT_TREND_LOOKBACK)
}
