//! Structured turn outcomes
//!
//! Every handler reports what actually happened through this tagged union,
//! alongside the user-facing response text. Callers branch on the variant
//! instead of parsing the Vietnamese response string.

use serde::Serialize;

use travel_agent_core::{SourceRef, ToolIntent};

/// What a dispatched tool did with the turn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolOutcome {
    /// A slot-filling tool still needs fields before it can confirm
    Missing {
        tool: ToolIntent,
        known: Vec<&'static str>,
        missing: Vec<&'static str>,
    },
    /// All required fields collected; a confirmation summary was presented
    Confirming { tool: ToolIntent },
    /// The user confirmed and the record was persisted
    Committed { tool: ToolIntent, reference: String },
    /// Grounded answer from the knowledge base
    Answered { sources: Vec<SourceRef> },
    /// Nothing relevant in the knowledge base; general fallback was offered
    NoRelevantInfo { query: String },
    /// Weather data was reported
    WeatherReport { city: String, forecast: bool },
    /// Plain conversational reply, no tool side effects
    Reply,
    /// A collaborator failed; the response carries an apology, not an error
    Failed { tool: ToolIntent, message: String },
}

impl ToolOutcome {
    /// Whether this outcome left a confirmation pending
    pub fn is_confirming(&self) -> bool {
        matches!(self, ToolOutcome::Confirming { .. })
    }
}
