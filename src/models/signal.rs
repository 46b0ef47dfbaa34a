//! Signal, vote and decision record models

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::chain::OptionSide;

/// Outcome of one decision cycle. Every state is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    MarketClosed,
    NoData,
    BuyCall,
    BuyPut,
    StrongBuyCall,
    NoTrade,
}

impl Signal {
    pub const ALL: [Signal; 6] = [
        Signal::MarketClosed,
        Signal::NoData,
        Signal::BuyCall,
        Signal::BuyPut,
        Signal::StrongBuyCall,
        Signal::NoTrade,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Signal::MarketClosed => "MARKET CLOSED",
            Signal::NoData => "NO DATA",
            Signal::BuyCall => "BUY CALL",
            Signal::BuyPut => "BUY PUT",
            Signal::StrongBuyCall => "STRONG BUY CALL (engulfing)",
            Signal::NoTrade => "NO TRADE",
        }
    }

    /// Display colour for front-ends
    pub fn color(&self) -> &'static str {
        match self {
            Signal::MarketClosed => "#f39c12",
            Signal::BuyCall => "#27ae60",
            Signal::BuyPut => "#c0392b",
            Signal::StrongBuyCall => "#2980b9",
            Signal::NoData | Signal::NoTrade => "#7f8c8d",
        }
    }

    pub fn is_directional(&self) -> bool {
        matches!(self, Signal::BuyCall | Signal::BuyPut | Signal::StrongBuyCall)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One analytic's opinion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Vote {
    Call,
    Put,
    Neutral,
}

impl From<OptionSide> for Vote {
    fn from(side: OptionSide) -> Self {
        match side {
            OptionSide::Call => Vote::Call,
            OptionSide::Put => Vote::Put,
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vote::Call => write!(f, "CALL"),
            Vote::Put => write!(f, "PUT"),
            Vote::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub call_count: u32,
    pub put_count: u32,
}

impl VoteTally {
    pub fn record(&mut self, vote: Vote) {
        match vote {
            Vote::Call => self.call_count += 1,
            Vote::Put => self.put_count += 1,
            Vote::Neutral => {}
        }
    }
}

impl FromIterator<Vote> for VoteTally {
    fn from_iter<I: IntoIterator<Item = Vote>>(iter: I) -> Self {
        let mut tally = VoteTally::default();
        for vote in iter {
            tally.record(vote);
        }
        tally
    }
}

/// Result of one decision cycle: the signal and the facts behind it, in evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub signal: Signal,
    pub reasons: Vec<String>,
    pub vote_tally: VoteTally,
}

impl DecisionRecord {
    pub fn new(signal: Signal, reasons: Vec<String>, vote_tally: VoteTally) -> Self {
        Self {
            signal,
            reasons,
            vote_tally,
        }
    }

    /// Outcome reached before any voting
    pub fn terminal(signal: Signal, reasons: Vec<String>) -> Self {
        Self::new(signal, reasons, VoteTally::default())
    }
}

/// A decision record as handed to presentation layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedSignal {
    #[serde(flatten)]
    pub record: DecisionRecord,
    pub generated_at: DateTime<Utc>,
    /// Wall-clock time in the venue's zone, `HH:MM:SS`
    pub reported_time: String,
    pub label: String,
    pub color: String,
}

impl PublishedSignal {
    pub fn new(record: DecisionRecord, generated_at: DateTime<Utc>, venue_offset: FixedOffset) -> Self {
        let reported_time = generated_at
            .with_timezone(&venue_offset)
            .format("%H:%M:%S")
            .to_string();
        Self {
            label: record.signal.label().to_string(),
            color: record.signal.color().to_string(),
            record,
            generated_at,
            reported_time,
        }
    }
}

/// Publication metadata does not take part in equality.
impl PartialEq for PublishedSignal {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}
