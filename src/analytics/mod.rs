//! Option-chain analytics over the ATM strike

pub mod atm;
pub mod flow;
pub mod pcr;
pub mod skew;

pub use atm::{atm_strike, resolve_atm, AtmPair, AtmResolution};
pub use flow::{compare_sides, oi_change_vote, volume_vote};
pub use pcr::{pcr_vote, put_call_ratio};
pub use skew::iv_skew_vote;

use serde::Serialize;

use crate::config::DecisionConfig;
use crate::models::signal::Vote;

/// Votes and metrics derived from the ATM pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChainAnalytics {
    pub atm: AtmPair,
    pub volume: Vote,
    pub oi_change: Vote,
    pub pcr: f64,
    pub pcr_vote: Vote,
    pub iv_skew: Option<Vote>,
}

impl ChainAnalytics {
    /// Votes in the order they are counted
    pub fn votes(&self) -> impl Iterator<Item = Vote> {
        [self.volume, self.oi_change, self.pcr_vote]
            .into_iter()
            .chain(self.iv_skew)
    }
}

pub fn analyze_chain(atm: AtmPair, config: &DecisionConfig) -> ChainAnalytics {
    let pcr = put_call_ratio(atm.call.open_interest, atm.put.open_interest);

    ChainAnalytics {
        volume: volume_vote(&atm),
        oi_change: oi_change_vote(&atm),
        pcr,
        pcr_vote: pcr_vote(pcr, config.pcr_lower, config.pcr_upper),
        iv_skew: iv_skew_vote(
            atm.call.implied_volatility,
            atm.put.implied_volatility,
            config.iv_skew_ratio,
        ),
        atm,
    }
}
