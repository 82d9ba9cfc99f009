//! Shared error type for the travel assistant

use thiserror::Error;

/// Top-level error for cross-crate propagation
///
/// Each crate defines its own error enum and converts into this type at
/// crate boundaries. No error of this type crosses the `handle_turn`
/// boundary; the agent converts failures into user-visible responses.
#[derive(Error, Debug)]
pub enum Error {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Weather error: {0}")]
    Weather(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result alias using the shared error type
pub type Result<T> = std::result::Result<T, Error>;
