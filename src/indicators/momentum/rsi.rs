//! RSI (Relative Strength Index) indicator

use crate::models::indicators::{PriceSeries, RsiIndicator};

/// Calculate the rolling RSI for every position of `closes`
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Averages are plain arithmetic means over the last `period` deltas. A
/// position is `None` until `period` deltas exist, so the first value sits at
/// index `period`. A zero average loss yields 100.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut values = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return values;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|pair| {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            }
        })
        .unzip();

    // delta j moves close j into close j + 1
    for end in period..=gains.len() {
        let avg_gain = gains[end - period..end].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[end - period..end].iter().sum::<f64>() / period as f64;
        values[end] = rsi_from_averages(avg_gain, avg_loss);
    }

    values
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return None;
    }
    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// Calculate the RSI at the last candle of the series
pub fn calculate_rsi(series: &PriceSeries, period: u32) -> Option<RsiIndicator> {
    let value = rsi_series(&series.closes(), period as usize)
        .last()
        .copied()
        .flatten()?;

    Some(RsiIndicator { value, period })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(series: &PriceSeries) -> Option<RsiIndicator> {
    calculate_rsi(series, 14)
}
