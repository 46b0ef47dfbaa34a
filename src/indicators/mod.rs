//! Indicator library: pure functions over a price series

pub mod momentum;
pub mod pattern;
pub mod structure;
pub mod trend;

use crate::config::DecisionConfig;
use crate::models::indicators::{IndicatorSet, PriceSeries, RsiIndicator};

/// Compute every indicator the decision engine consumes
pub fn compute_indicator_set(series: &PriceSeries, config: &DecisionConfig) -> IndicatorSet {
    let closes = series.closes();

    let rsi = momentum::rsi_series(&closes, config.rsi_period as usize)
        .last()
        .copied()
        .flatten()
        .map(|value| RsiIndicator {
            value,
            period: config.rsi_period,
        });

    IndicatorSet {
        trend: trend::market_trend(&closes, config.trend_lookback),
        rsi,
        levels: structure::find_pivot_levels(&closes, config.pivot_radius),
        bullish_engulfing: pattern::is_bullish_engulfing(series),
    }
}
