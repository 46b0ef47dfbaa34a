use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One sampled candle of the underlying
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PricePoint {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close <= self.open
    }
}

/// Time-ordered candles of the underlying
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Sorts by timestamp; equal timestamps keep their given order.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The previous and current candle, if there are at least two.
    pub fn last_two(&self) -> Option<(&PricePoint, &PricePoint)> {
        match self.points.as_slice() {
            [.., previous, current] => Some((previous, current)),
            _ => None,
        }
    }

    /// Keep only the most recent `lookback` points.
    pub fn tail(mut self, lookback: usize) -> Self {
        if self.points.len() > lookback {
            self.points.drain(..self.points.len() - lookback);
        }
        self
    }
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Short-term direction of the underlying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "UP"),
            Trend::Down => write!(f, "DOWN"),
            Trend::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: u32,
}

/// Pivot levels in time order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceLevels {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

impl SupportResistanceLevels {
    pub fn recent_support(&self, count: usize) -> &[f64] {
        tail(&self.support, count)
    }

    pub fn recent_resistance(&self, count: usize) -> &[f64] {
        tail(&self.resistance, count)
    }

    pub fn is_empty(&self) -> bool {
        self.support.is_empty() && self.resistance.is_empty()
    }
}

fn tail(levels: &[f64], count: usize) -> &[f64] {
    &levels[levels.len().saturating_sub(count)..]
}

/// Everything the indicator library derives from one price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub trend: Trend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<RsiIndicator>,
    pub levels: SupportResistanceLevels,
    pub bullish_engulfing: bool,
}

impl Default for IndicatorSet {
    fn default() -> Self {
        Self {
            trend: Trend::Neutral,
            rsi: None,
            levels: SupportResistanceLevels::default(),
            bullish_engulfing: false,
        }
    }
}
