//! Reason lines for the decision record

use crate::analytics::ChainAnalytics;
use crate::models::chain::OptionSide;
use crate::models::indicators::{RsiIndicator, SupportResistanceLevels, Trend};
use crate::models::signal::{Vote, VoteTally};

pub const NOT_AVAILABLE: &str = "N/A";

pub fn market_closed() -> String {
    "Market closed: session gate reports closed".to_string()
}

pub fn empty_chain() -> String {
    "Option chain snapshot is empty".to_string()
}

pub fn no_underlying() -> String {
    "Underlying value unavailable".to_string()
}

pub fn underlying_and_atm(underlying: f64, strike: i64) -> String {
    format!("Underlying: {:.2} | ATM strike: {}", underlying, strike)
}

pub fn atm_missing(strike: i64, side: OptionSide) -> String {
    format!("ATM missing: no {} row at strike {}", side, strike)
}

pub fn volume(analytics: &ChainAnalytics) -> String {
    format!(
        "Volume: CALL {} vs PUT {} -> {}",
        analytics.atm.call.volume, analytics.atm.put.volume, analytics.volume
    )
}

pub fn oi_change(analytics: &ChainAnalytics) -> String {
    format!(
        "OI change: CALL {} vs PUT {} -> {}",
        analytics.atm.call.open_interest_change,
        analytics.atm.put.open_interest_change,
        analytics.oi_change
    )
}

pub fn pcr(analytics: &ChainAnalytics) -> String {
    format!("PCR: {:.2} -> {}", analytics.pcr, analytics.pcr_vote)
}

pub fn trend(trend: Trend, vote: Option<Vote>) -> String {
    match vote {
        Some(vote) => format!("Trend: {} -> {}", trend, vote),
        None => format!("Trend: {} -> no vote", trend),
    }
}

pub fn rsi(rsi: Option<&RsiIndicator>, period: u32) -> String {
    match rsi {
        Some(rsi) => format!("RSI({}): {:.2}", rsi.period, rsi.value),
        None => format!("RSI({}): {}", period, NOT_AVAILABLE),
    }
}

pub fn levels(levels: &SupportResistanceLevels, tail: usize) -> String {
    format!(
        "Support: {} | Resistance: {}",
        join_levels(levels.recent_support(tail)),
        join_levels(levels.recent_resistance(tail))
    )
}

fn join_levels(levels: &[f64]) -> String {
    if levels.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    levels
        .iter()
        .map(|level| format!("{:.2}", level))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn iv(analytics: &ChainAnalytics) -> String {
    let outcome = match analytics.iv_skew {
        Some(vote) => vote.to_string(),
        None => "no skew vote".to_string(),
    };
    format!(
        "IV: CALL {:.2} vs PUT {:.2} -> {}",
        analytics.atm.call.implied_volatility, analytics.atm.put.implied_volatility, outcome
    )
}

pub fn engulfing(bullish_engulfing: bool) -> String {
    format!(
        "Bullish engulfing: {}",
        if bullish_engulfing { "yes" } else { "no" }
    )
}

pub fn tally(tally: &VoteTally) -> String {
    format!("Votes: CALL {} | PUT {}", tally.call_count, tally.put_count)
}
