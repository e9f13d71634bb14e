// crates/core/src/lib.rs
//! Token and cost estimation for a single LLM API call.
//!
//! Everything in this crate is a pure function of its inputs: no I/O, no
//! shared state. The HTTP layer lives in `tokencost-server`.

pub mod calculator;
pub mod cost;
pub mod error;
pub mod estimator;
pub mod output;
pub mod pricing;

pub use calculator::*;
pub use cost::*;
pub use error::*;
pub use estimator::*;
pub use output::*;
pub use pricing::*;
