//! Core application primitives (polling loop, HTTP front-end)

pub mod http;
pub mod scheduler;

pub use http::*;
pub use scheduler::*;
