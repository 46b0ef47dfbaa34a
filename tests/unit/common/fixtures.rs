//! Shared builders for unit tests

use chrono::{DateTime, Duration, Utc};
use strikewise::models::chain::{ChainSnapshot, OptionSide, StrikeRow};
use strikewise::models::indicators::{PricePoint, PriceSeries};

pub fn ts(i: usize) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap() + Duration::minutes(5 * i as i64)
}

/// Candles whose open equals the close, so no engulfing pattern can form
pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(close, close + 0.5, close - 0.5, close, ts(i)))
        .collect()
}

pub fn uptrend_series(count: usize) -> PriceSeries {
    let closes: Vec<f64> = (0..count).map(|i| 17_400.0 + i as f64 * 5.0).collect();
    series_from_closes(&closes)
}

pub fn downtrend_series(count: usize) -> PriceSeries {
    let closes: Vec<f64> = (0..count).map(|i| 17_600.0 - i as f64 * 5.0).collect();
    series_from_closes(&closes)
}

pub fn candle(i: usize, open: f64, close: f64) -> PricePoint {
    PricePoint::new(open, open.max(close) + 1.0, open.min(close) - 1.0, close, ts(i))
}

/// Rising closes ending with a bearish candle engulfed by a bullish one
pub fn engulfing_uptrend_series() -> PriceSeries {
    PriceSeries::new(vec![
        candle(0, 99.0, 100.0),
        candle(1, 100.0, 101.0),
        candle(2, 101.0, 102.0),
        candle(3, 104.0, 103.0),
        candle(4, 102.0, 105.0),
    ])
}

#[derive(Debug, Clone, Copy)]
pub struct Leg {
    pub volume: f64,
    pub oi_change: f64,
    pub oi: f64,
    pub iv: f64,
}

impl Leg {
    pub fn new(volume: f64, oi_change: f64, oi: f64, iv: f64) -> Self {
        Self {
            volume,
            oi_change,
            oi,
            iv,
        }
    }

    pub fn row(&self, side: OptionSide, strike: i64) -> StrikeRow {
        StrikeRow::new(side, strike)
            .with_volume(self.volume)
            .with_open_interest_change(self.oi_change)
            .with_open_interest(self.oi)
            .with_implied_volatility(Some(self.iv))
    }
}

/// Balanced legs: every chain analytic votes neutral
pub fn neutral_leg() -> Leg {
    Leg::new(1_000.0, 100.0, 10_000.0, 15.0)
}

/// Chain with the ATM pair at 17500 plus a neighbouring strike
pub fn atm_chain(underlying: f64, call: Leg, put: Leg) -> ChainSnapshot {
    ChainSnapshot::new(
        vec![
            neutral_leg().row(OptionSide::Call, 17_450),
            neutral_leg().row(OptionSide::Put, 17_450),
            call.row(OptionSide::Call, 17_500),
            put.row(OptionSide::Put, 17_500),
        ],
        Some(underlying),
    )
    .unwrap()
}
