//! Turn orchestration
//!
//! One entry point per user turn: gate on a pending confirmation, then
//! summarize context, classify, dispatch to the intent's handler, and attach
//! follow-up suggestions. Collaborator failures degrade inside the handlers;
//! no error ever crosses [`TravelAgent::handle_turn`].

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

use travel_agent_config::Settings;
use travel_agent_core::{
    BookingStore, ChatHistory, LanguageModel, Retriever, SourceRef, ToolIntent, WeatherProvider,
};
use travel_agent_extract::find_location;
use travel_agent_llm::prompt;

use crate::classifier::IntentClassifier;
use crate::confirmation::{self, ConfirmationReply};
use crate::context::ContextSummarizer;
use crate::handlers;
use crate::outcome::ToolOutcome;
use crate::session::SessionState;
use crate::suggestion::{Suggestion, SuggestionContext, SuggestionEngine};

/// Everything the caller gets back for one turn
#[derive(Debug, Clone, Serialize)]
pub struct TurnResult {
    /// False only when a collaborator failure degraded the turn
    pub success: bool,
    pub response: String,
    pub tool_used: ToolIntent,
    pub suggestions: Vec<Suggestion>,
    pub awaiting_confirmation: bool,
    pub outcome: ToolOutcome,
}

pub struct TravelAgent {
    llm: Arc<dyn LanguageModel>,
    retriever: Arc<dyn Retriever>,
    weather: Arc<dyn WeatherProvider>,
    store: Arc<dyn BookingStore>,
    settings: Settings,
    interests: Vec<String>,
    summarizer: ContextSummarizer,
    classifier: IntentClassifier,
    suggestions: SuggestionEngine,
}

impl TravelAgent {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        retriever: Arc<dyn Retriever>,
        weather: Arc<dyn WeatherProvider>,
        store: Arc<dyn BookingStore>,
        settings: Settings,
    ) -> Self {
        let summarizer = ContextSummarizer::new(llm.clone(), settings.agent.max_context_messages);
        let classifier = IntentClassifier::new(llm.clone());
        let suggestions = SuggestionEngine::new(settings.suggestions.clone());
        let interests = settings.user.active_interests();
        Self {
            llm,
            retriever,
            weather,
            store,
            settings,
            interests,
            summarizer,
            classifier,
            suggestions,
        }
    }

    /// Process one user turn against the session's explicit state
    pub async fn handle_turn(
        &self,
        user_text: &str,
        history: &ChatHistory,
        state: &mut SessionState,
    ) -> TurnResult {
        let input = user_text.trim();

        // 1. pending confirmation gate
        if let Some(pending) = state.pending().cloned() {
            let tool = pending.payload.intent();
            match confirmation::detect_reply(input) {
                Some(ConfirmationReply::Affirmative) => {
                    match confirmation::commit(self.store.as_ref(), &pending.payload).await {
                        Ok(receipt) => {
                            state.clear_pending();
                            state.clear_active();
                            return self.finish(
                                input,
                                tool,
                                receipt.message,
                                ToolOutcome::Committed {
                                    tool,
                                    reference: receipt.reference,
                                },
                                state,
                            );
                        }
                        Err(err) => {
                            // pending stays in place so a retry is one word away
                            error!(error = %err, %tool, "commit failed, keeping confirmation");
                            return self.finish(
                                input,
                                tool,
                                "⚠️ Xin lỗi, tôi chưa lưu được thông tin do lỗi hệ thống. \
                                 Thông tin của bạn vẫn được giữ nguyên, bạn hãy xác nhận lại \
                                 sau ít phút nhé!"
                                    .to_string(),
                                ToolOutcome::Failed {
                                    tool,
                                    message: err.to_string(),
                                },
                                state,
                            );
                        }
                    }
                }
                Some(ConfirmationReply::Negative) => {
                    // back to editing: the rejection destroys the built record
                    // but not the collected slots, so the correction that the
                    // reply invites merges into them instead of starting over
                    // (a commit or a tool switch is what clears the slot set)
                    state.clear_pending();
                    return self.finish(
                        input,
                        tool,
                        "Đã hủy xác nhận. Bạn muốn thay đổi thông tin gì? \
                         Hãy cho tôi biết để tôi cập nhật nhé! ✏️"
                            .to_string(),
                        ToolOutcome::Reply,
                        state,
                    );
                }
                None => {
                    // neither yes nor no: treat as fresh input
                    state.clear_pending();
                }
            }
        }

        // 2. a general-knowledge offer from last turn needs an explicit yes
        if let Some(query) = state.take_general_offer() {
            if confirmation::detect_reply(input) == Some(ConfirmationReply::Affirmative) {
                let response = self.general_knowledge_answer(&query).await;
                return self.finish(input, ToolIntent::Knowledge, response, ToolOutcome::Reply, state);
            }
        }

        // 3. summarize and classify
        let context = self.summarizer.summarize(history, input).await;
        let intent = self.classifier.classify(&context, input).await;
        info!(%intent, "turn classified");

        // 4. dispatch
        let today = Utc::now().date_naive();
        let (response, outcome) = match intent {
            ToolIntent::Hotel => handlers::hotel::handle(state, input, &context, today),
            ToolIntent::Car => handlers::car::handle(state, input, &context),
            ToolIntent::TripPlan => handlers::trip_plan::handle(state, input, &context, today),
            ToolIntent::Knowledge => {
                handlers::knowledge::handle(self.retriever.as_ref(), state, input).await
            }
            ToolIntent::Weather => {
                handlers::weather::handle(self.weather.as_ref(), input, &context).await
            }
            ToolIntent::General => {
                handlers::general::handle(
                    self.llm.as_ref(),
                    &self.settings.agent,
                    &self.interests,
                    &context,
                    input,
                )
                .await
            }
        };

        self.finish(input, intent, response, outcome, state)
    }

    async fn general_knowledge_answer(&self, query: &str) -> String {
        match self.llm.complete(&prompt::general_knowledge(query)).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => "Xin lỗi, hiện tại tôi chưa thể trả lời câu hỏi này. Bạn thử lại sau nhé! 🙏"
                .to_string(),
        }
    }

    fn finish(
        &self,
        input: &str,
        tool: ToolIntent,
        response: String,
        outcome: ToolOutcome,
        state: &SessionState,
    ) -> TurnResult {
        let suggestions = self.suggest(input, tool, &response, &outcome);
        TurnResult {
            success: !matches!(outcome, ToolOutcome::Failed { .. }),
            response,
            tool_used: tool,
            suggestions,
            awaiting_confirmation: state.awaiting_confirmation(),
            outcome,
        }
    }

    fn suggest(
        &self,
        query: &str,
        tool: ToolIntent,
        response: &str,
        outcome: &ToolOutcome,
    ) -> Vec<Suggestion> {
        let empty: &[SourceRef] = &[];
        let sources = match outcome {
            ToolOutcome::Answered { sources } => sources.as_slice(),
            _ => empty,
        };
        let location = match outcome {
            ToolOutcome::WeatherReport { city, .. } => Some(city.clone()),
            _ => find_location(query, "").map(|l| l.name),
        };
        let context = SuggestionContext {
            tool_used: tool,
            user_query: query,
            agent_response: response,
            location,
            sources,
            user_interests: &self.interests,
        };
        self.suggestions.generate(&context)
    }
}
