//! Signal evaluation: vote aggregation and the decision ladder.

pub mod decision;
pub mod engine;
pub mod reasons;

pub use decision::*;
pub use engine::*;
