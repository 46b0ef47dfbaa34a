//! Support and Resistance levels detection

use crate::models::indicators::{PriceSeries, SupportResistanceLevels};

/// Default half-width of the pivot window (window spans 11 closes)
pub const DEFAULT_PIVOT_RADIUS: usize = 5;

/// Find pivot support and resistance levels
///
/// A close is a support level when it is the minimum of the window of
/// `radius` closes either side of it, and a resistance level when it is the
/// maximum. A flat window registers the same close as both. Only indices with
/// a full window on each side are inspected.
pub fn find_pivot_levels(closes: &[f64], radius: usize) -> SupportResistanceLevels {
    let mut levels = SupportResistanceLevels::default();
    if closes.len() < 2 * radius + 1 {
        return levels;
    }

    for i in radius..closes.len() - radius {
        let close = closes[i];
        if !close.is_finite() {
            continue;
        }

        let window = &closes[i - radius..=i + radius];
        let min = window.iter().copied().fold(f64::INFINITY, f64::min);
        let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if close == min {
            levels.support.push(close);
        }
        if close == max {
            levels.resistance.push(close);
        }
    }

    levels
}

/// Calculate support/resistance over the closes of a series
pub fn calculate_support_resistance(series: &PriceSeries, radius: usize) -> SupportResistanceLevels {
    find_pivot_levels(&series.closes(), radius)
}

/// Calculate support/resistance with default radius (5)
pub fn calculate_support_resistance_default(series: &PriceSeries) -> SupportResistanceLevels {
    calculate_support_resistance(series, DEFAULT_PIVOT_RADIUS)
}
