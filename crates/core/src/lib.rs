//! Core types and traits for the travel assistant dialogue engine
//!
//! This crate provides foundational types used across all other crates:
//! - Conversation types (turns, history)
//! - Tool intent enumeration
//! - Collaborator traits for pluggable backends (LLM, retrieval, weather, persistence)
//! - Committed booking/plan record types
//! - Keyword-set matching utility
//! - Error types

pub mod conversation;
pub mod error;
pub mod intent;
pub mod keywords;
pub mod records;
pub mod traits;

pub use conversation::{ChatHistory, ConversationTurn, TurnMetadata, TurnRole};
pub use error::{Error, Result};
pub use intent::ToolIntent;
pub use keywords::KeywordMatcher;
pub use records::{
    BookingStatus, Budget, CarBooking, HotelBooking, Participants, TravelPlan, TripPreferences,
};
pub use traits::{
    BookingStore, CurrentWeather, ForecastEntry, LanguageModel, RetrievalAnswer,
    RetrievedDocument, Retriever, SourceRef, WeatherProvider,
};
