//! Trend indicators: short-term direction

pub mod direction;

pub use direction::*;
