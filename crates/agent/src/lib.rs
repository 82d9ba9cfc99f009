//! Dialogue orchestration for the travel assistant
//!
//! This crate ties the collaborators together into a turn loop: rolling
//! context summarization, intent classification with keyword fallback,
//! slot-filling state machines for hotel, car, and trip-plan bookings with
//! an explicit confirmation gate, grounded knowledge answers, weather
//! reports, and contextual follow-up suggestions.
//!
//! All state is explicit: callers own a [`SessionState`] and a
//! [`travel_agent_core::ChatHistory`] and pass both into
//! [`TravelAgent::handle_turn`] each turn. The turn loop never returns an
//! error; collaborator failures degrade into apologetic responses with a
//! [`ToolOutcome::Failed`] marker.

mod agent;
mod classifier;
mod confirmation;
mod context;
mod handlers;
mod outcome;
mod session;
mod suggestion;

pub use agent::{TravelAgent, TurnResult};
pub use classifier::IntentClassifier;
pub use confirmation::{detect_reply, ConfirmationReply};
pub use context::ContextSummarizer;
pub use outcome::ToolOutcome;
pub use session::{
    ActiveSlots, CarSlots, HotelSlots, PendingConfirmation, PendingPayload, SessionState,
    TripSlots,
};
pub use suggestion::{Suggestion, SuggestionContext, SuggestionEngine};
