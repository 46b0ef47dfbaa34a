//! Candle patterns

pub mod engulfing;

pub use engulfing::*;
