//! Shared data models spanning the engine layers.

pub mod chain;
pub mod indicators;
pub mod signal;

pub use chain::{ChainError, ChainSnapshot, OptionSide, StrikeRow};
pub use indicators::{
    IndicatorSet, PricePoint, PriceSeries, RsiIndicator, SupportResistanceLevels, Trend,
};
pub use signal::{DecisionRecord, PublishedSignal, Signal, Vote, VoteTally};
