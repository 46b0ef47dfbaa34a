//! Main signal evaluation engine.
//!
//! The engine is stateless: every call builds a fresh [`DecisionRecord`] from
//! the snapshot, the price series and the session flag it is given.

use crate::analytics::{analyze_chain, resolve_atm, AtmResolution};
use crate::config::DecisionConfig;
use crate::indicators::compute_indicator_set;
use crate::models::chain::ChainSnapshot;
use crate::models::indicators::PriceSeries;
use crate::models::signal::{DecisionRecord, Signal, VoteTally};
use crate::signals::decision::{decide, trend_vote};
use crate::signals::reasons;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalEngine {
    config: DecisionConfig,
}

impl SignalEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Run one decision cycle
    ///
    /// The first matching rule wins: closed session, missing chain data,
    /// missing ATM leg, then the vote ladder.
    pub fn evaluate(&self, snapshot: &ChainSnapshot, series: &PriceSeries, session_open: bool) -> DecisionRecord {
        if !session_open {
            return DecisionRecord::terminal(Signal::MarketClosed, vec![reasons::market_closed()]);
        }
        if snapshot.is_empty() {
            return DecisionRecord::terminal(Signal::NoData, vec![reasons::empty_chain()]);
        }

        let atm = match resolve_atm(snapshot, self.config.strike_step) {
            AtmResolution::Resolved(pair) => pair,
            AtmResolution::NoUnderlying => {
                return DecisionRecord::terminal(Signal::NoData, vec![reasons::no_underlying()]);
            }
            AtmResolution::MissingLeg {
                underlying,
                strike,
                side,
            } => {
                return DecisionRecord::terminal(
                    Signal::NoData,
                    vec![
                        reasons::underlying_and_atm(underlying, strike),
                        reasons::atm_missing(strike, side),
                    ],
                );
            }
        };

        let analytics = analyze_chain(atm, &self.config);
        let indicators = compute_indicator_set(series, &self.config);
        let trend_vote = trend_vote(indicators.trend);

        let tally: VoteTally = analytics.votes().chain(trend_vote).collect();

        let mut lines = vec![
            reasons::underlying_and_atm(atm.underlying, atm.strike),
            reasons::volume(&analytics),
            reasons::oi_change(&analytics),
            reasons::pcr(&analytics),
            reasons::trend(indicators.trend, trend_vote),
            reasons::rsi(indicators.rsi.as_ref(), self.config.rsi_period),
            reasons::levels(&indicators.levels, self.config.level_tail),
            reasons::iv(&analytics),
            reasons::engulfing(indicators.bullish_engulfing),
            reasons::tally(&tally),
        ];

        let (signal, rule) = decide(
            tally,
            self.config.min_votes,
            indicators.bullish_engulfing,
            indicators.trend,
        );
        lines.push(rule);

        DecisionRecord::new(signal, lines, tally)
    }
}

/// Evaluate one cycle with the default decision policy
pub fn compute_signal(snapshot: &ChainSnapshot, series: &PriceSeries, session_open: bool) -> DecisionRecord {
    SignalEngine::default().evaluate(snapshot, series, session_open)
}
