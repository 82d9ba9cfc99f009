//! Tool intent enumeration
//!
//! Exactly one intent is selected per user turn. The classifier is a total
//! function over these six values; any other label coming back from the
//! language model is rejected here and recovered via keyword fallback.

use serde::{Deserialize, Serialize};

/// The six tools a user turn can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolIntent {
    /// Travel knowledge lookup backed by retrieval
    Knowledge,
    /// Current weather or forecast
    Weather,
    /// Hotel room booking
    Hotel,
    /// Car / transport booking
    Car,
    /// Detailed travel plan creation
    TripPlan,
    /// Plain conversation, no tool
    General,
}

impl ToolIntent {
    /// All intents in classifier instruction order
    pub const ALL: [ToolIntent; 6] = [
        ToolIntent::Knowledge,
        ToolIntent::Weather,
        ToolIntent::Hotel,
        ToolIntent::Car,
        ToolIntent::TripPlan,
        ToolIntent::General,
    ];

    /// Canonical upper-case label used in prompts and classifier output
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolIntent::Knowledge => "KNOWLEDGE",
            ToolIntent::Weather => "WEATHER",
            ToolIntent::Hotel => "HOTEL",
            ToolIntent::Car => "CAR",
            ToolIntent::TripPlan => "TRIP_PLAN",
            ToolIntent::General => "GENERAL",
        }
    }

    /// Strict parse of a classifier label
    ///
    /// Returns `None` for anything outside the six-value set; the caller
    /// must fall back to keyword rules, never invent a seventh value.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "KNOWLEDGE" => Some(ToolIntent::Knowledge),
            "WEATHER" => Some(ToolIntent::Weather),
            "HOTEL" => Some(ToolIntent::Hotel),
            "CAR" => Some(ToolIntent::Car),
            "TRIP_PLAN" => Some(ToolIntent::TripPlan),
            "GENERAL" => Some(ToolIntent::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for ToolIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
