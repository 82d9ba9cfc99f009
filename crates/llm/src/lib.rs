//! LLM backend for the travel assistant
//!
//! A thin chat-completions client plus the fixed Vietnamese prompts the
//! dialogue core sends through it. The backend implements the
//! [`travel_agent_core::LanguageModel`] trait so the agent never sees
//! transport details.

mod openai;
pub mod prompt;

pub use openai::{OpenAiBackend, OpenAiConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    #[error("LLM network error: {0}")]
    Network(String),

    #[error("LLM API error: {0}")]
    Api(String),

    #[error("invalid LLM response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}

impl From<LlmError> for travel_agent_core::Error {
    fn from(err: LlmError) -> Self {
        travel_agent_core::Error::Llm(err.to_string())
    }
}
