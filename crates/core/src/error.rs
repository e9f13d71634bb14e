// crates/core/src/error.rs
use thiserror::Error;

/// Errors that can occur while estimating a request's cost
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    /// Neither text nor any priced file contributed a token.
    #[error("no input provided")]
    NoInput,
}
