//! Intent classification
//!
//! Primary path asks the language model for one of the six labels; anything
//! else (an off-list label, an empty reply, a failed call) falls back to
//! keyword rules. The classifier is a total function: it always produces an
//! intent, with [`ToolIntent::General`] as the final fallback.

use std::sync::Arc;

use tracing::{debug, warn};

use travel_agent_core::{KeywordMatcher, LanguageModel, ToolIntent};
use travel_agent_llm::prompt;

/// Fallback keyword table, checked in order; first category wins
fn keyword_table() -> KeywordMatcher<ToolIntent> {
    KeywordMatcher::new(vec![
        (
            ToolIntent::Weather,
            vec!["thời tiết", "weather", "mưa", "nắng", "nhiệt độ", "dự báo"],
        ),
        (
            ToolIntent::TripPlan,
            vec![
                "lên kế hoạch",
                "tạo kế hoạch",
                "kế hoạch du lịch",
                "itinerary",
                "lưu kế hoạch",
            ],
        ),
        (
            ToolIntent::Hotel,
            vec!["đặt phòng", "khách sạn", "hotel", "booking", "phòng"],
        ),
        (
            ToolIntent::Car,
            vec!["đặt xe", "thuê xe", "taxi", "di chuyển", "transport"],
        ),
        (
            ToolIntent::Knowledge,
            vec![
                "địa điểm",
                "danh lam",
                "thắng cảnh",
                "du lịch",
                "gợi ý",
                "tham quan",
                "có gì",
            ],
        ),
    ])
}

pub struct IntentClassifier {
    llm: Arc<dyn LanguageModel>,
    fallback: KeywordMatcher<ToolIntent>,
}

impl IntentClassifier {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            fallback: keyword_table(),
        }
    }

    pub async fn classify(&self, context: &str, user_input: &str) -> ToolIntent {
        let request = prompt::classify_intent(context, user_input);
        match self.llm.complete(&request).await {
            Ok(label) => match ToolIntent::parse(&label) {
                Some(intent) => intent,
                None => {
                    debug!(label = label.trim(), "off-list classifier label, using keywords");
                    self.by_keywords(user_input, context)
                }
            },
            Err(err) => {
                warn!(error = %err, "intent classification call failed, using keywords");
                self.by_keywords(user_input, context)
            }
        }
    }

    /// Keyword rules over the current input first, then the carried context.
    /// The context scan is intentional, not an oversight: a bare follow-up
    /// ("còn ngày mai?") names its topic only in the summarized context.
    fn by_keywords(&self, user_input: &str, context: &str) -> ToolIntent {
        self.fallback
            .match_category(user_input)
            .or_else(|| self.fallback.match_category(context))
            .unwrap_or(ToolIntent::General)
    }
}
