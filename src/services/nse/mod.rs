//! NSE option-chain collaborator

pub mod client;
pub mod messages;

pub use client::NseClient;
pub use messages::OptionChainResponse;
