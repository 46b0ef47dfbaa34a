//! Decision policy constants

use serde::{Deserialize, Serialize};

/// Thresholds and windows used by the decision engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// ATM strikes are multiples of this step
    pub strike_step: i64,
    /// PCR strictly above this favours calls
    pub pcr_upper: f64,
    /// PCR strictly below this favours puts
    pub pcr_lower: f64,
    /// One side's IV must exceed the other by more than this ratio to vote
    pub iv_skew_ratio: f64,
    /// Minimum votes the leading side needs for a directional signal
    pub min_votes: u32,
    pub rsi_period: u32,
    pub pivot_radius: usize,
    /// Pivot levels quoted in the reasons
    pub level_tail: usize,
    pub trend_lookback: usize,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            strike_step: 50,
            pcr_upper: 1.2,
            pcr_lower: 0.8,
            iv_skew_ratio: 1.1,
            min_votes: 2,
            rsi_period: 14,
            pivot_radius: 5,
            level_tail: 3,
            trend_lookback: 5,
        }
    }
}
