//! HTTP vector-search client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use travel_agent_core::RetrievedDocument;

use crate::RagError;

/// Raw scored search over the document index
#[async_trait]
pub trait VectorSearch: Send + Sync {
    async fn search(&self, query: &str, top_k: usize)
        -> Result<Vec<RetrievedDocument>, RagError>;
}

#[derive(Debug, Clone)]
pub struct HttpRetrieverConfig {
    /// Search endpoint URL
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for HttpRetrieverConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/search".to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for a vector-search service exposing a `{query, top_k}` endpoint
pub struct HttpRetriever {
    config: HttpRetrieverConfig,
    client: Client,
}

impl HttpRetriever {
    pub fn new(config: HttpRetrieverConfig) -> Result<Self, RagError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RagError::Network(e.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl VectorSearch for HttpRetriever {
    async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, RagError> {
        let request = SearchRequest { query, top_k };

        let mut builder = self.client.post(&self.config.endpoint).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RagError::Api(format!("HTTP {status}: {error_text}")));
        }

        let response: SearchResponse = response
            .json()
            .await
            .map_err(|e| RagError::InvalidResponse(e.to_string()))?;

        debug!(query, matches = response.matches.len(), "vector search done");
        Ok(response.matches)
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    top_k: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    matches: Vec<RetrievedDocument>,
}
