//! Collaborator traits
//!
//! The dialogue core consumes four external collaborators through these
//! traits. All are blocking external calls from the core's perspective:
//! implementations must enforce their own request timeouts, and every call
//! site in the agent has a deterministic fallback path so a failed call
//! degrades the turn instead of hanging it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::conversation::TurnRole;
use crate::error::Error;
use crate::records::{CarBooking, HotelBooking, TravelPlan};

/// Language generation collaborator
///
/// A single non-streaming completion call. May fail; callers never retry,
/// they fall back.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, Error>;
}

/// A scored document returned by vector search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub id: String,
    /// Relevance score in 0.0..=1.0
    pub score: f32,
    pub text: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

/// Source reference attached to a grounded answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub id: String,
    /// Content category from source metadata ("attraction", "food", "hotel")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Answer produced by the retrieval collaborator
///
/// `answer == None` together with `no_relevant_info == true` is the defined
/// no-match outcome: nothing above the relevance threshold. It is a success,
/// not an error, and the caller must not fabricate an answer for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalAnswer {
    pub answer: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    #[serde(default)]
    pub no_relevant_info: bool,
}

/// Document retrieval collaborator
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Raw scored search
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedDocument>, Error>;

    /// Grounded question answering over the knowledge base
    async fn query(&self, question: &str) -> Result<RetrievalAnswer, Error>;
}

/// Current weather observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temp_c: f32,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_mps: f32,
}

/// One forecast step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Local time of the forecast step, `HH:MM`
    pub time: String,
    pub temp_c: f32,
    pub description: String,
}

/// Weather data collaborator
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> Result<CurrentWeather, Error>;

    /// Ordered forecast steps for roughly the next 24 hours
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, Error>;
}

/// Persistence collaborator
///
/// Write serialization per record is the collaborator's concern; the core
/// calls it from a single session at a time.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn save_hotel_booking(&self, booking: &HotelBooking) -> Result<(), Error>;

    async fn save_car_booking(&self, booking: &CarBooking) -> Result<(), Error>;

    async fn save_trip_plan(&self, plan: &TravelPlan) -> Result<(), Error>;

    async fn conversation_history(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<(TurnRole, String)>, Error>;
}
