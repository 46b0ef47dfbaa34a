//! Vote-tally decision ladder

use crate::models::indicators::Trend;
use crate::models::signal::{Signal, Vote, VoteTally};

/// UP votes CALL, DOWN votes PUT, NEUTRAL abstains
pub fn trend_vote(trend: Trend) -> Option<Vote> {
    match trend {
        Trend::Up => Some(Vote::Call),
        Trend::Down => Some(Vote::Put),
        Trend::Neutral => None,
    }
}

/// Turn a tally into a signal, with the rule that fired
///
/// The leading side needs at least `min_votes` votes, so a 1-0 split never
/// produces a directional call. Without a majority, a bullish engulfing
/// candle in an uptrend still calls for a CALL.
pub fn decide(tally: VoteTally, min_votes: u32, bullish_engulfing: bool, trend: Trend) -> (Signal, String) {
    if tally.call_count > tally.put_count && tally.call_count >= min_votes {
        let rule = format!(
            "CALL votes lead {}-{} with at least {} -> {}",
            tally.call_count,
            tally.put_count,
            min_votes,
            Signal::BuyCall
        );
        (Signal::BuyCall, rule)
    } else if tally.put_count > tally.call_count && tally.put_count >= min_votes {
        let rule = format!(
            "PUT votes lead {}-{} with at least {} -> {}",
            tally.put_count,
            tally.call_count,
            min_votes,
            Signal::BuyPut
        );
        (Signal::BuyPut, rule)
    } else if bullish_engulfing && trend == Trend::Up {
        let rule = format!("Bullish engulfing in an UP trend -> {}", Signal::StrongBuyCall);
        (Signal::StrongBuyCall, rule)
    } else {
        let rule = format!(
            "No side leads with at least {} votes -> {}",
            min_votes,
            Signal::NoTrade
        );
        (Signal::NoTrade, rule)
    }
}
