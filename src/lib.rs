//! Option-chain signal engine.
//!
//! Turns an option-chain snapshot and a short price history of the underlying
//! into one trading recommendation with an ordered justification trail.

pub mod analytics;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use models::{ChainSnapshot, DecisionRecord, PriceSeries, Signal};
pub use signals::engine::{compute_signal, SignalEngine};
