//! Retrieval-augmented answering over the travel knowledge base
//!
//! [`HttpRetriever`] talks to a vector-search service; [`KnowledgeBase`]
//! layers the relevance gate and grounded answer generation on top and
//! implements the [`travel_agent_core::Retriever`] trait. Nothing above the
//! relevance threshold is a defined no-match outcome, not an error.

mod http;
mod knowledge;

pub use http::{HttpRetriever, HttpRetrieverConfig, VectorSearch};
pub use knowledge::{KnowledgeBase, KnowledgeBaseConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagError {
    #[error("retrieval network error: {0}")]
    Network(String),

    #[error("retrieval API error: {0}")]
    Api(String),

    #[error("invalid retrieval response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for RagError {
    fn from(err: reqwest::Error) -> Self {
        RagError::Network(err.to_string())
    }
}

impl From<RagError> for travel_agent_core::Error {
    fn from(err: RagError) -> Self {
        travel_agent_core::Error::Retrieval(err.to_string())
    }
}
