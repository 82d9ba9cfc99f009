//! Contextual follow-up suggestions

mod engine;
mod templates;

pub use engine::{Suggestion, SuggestionContext, SuggestionEngine};
