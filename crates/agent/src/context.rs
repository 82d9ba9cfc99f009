//! Rolling context summarization
//!
//! Each turn the recent history window is rewritten into a 1-2 sentence
//! Vietnamese summary with locations called out, so "còn ngày mai?" after a
//! Sapa weather question still classifies and resolves against Sapa.
//!
//! Summarization is total: it never fails the turn. An empty history yields
//! a restatement of the input, and an LLM failure yields the same
//! restatement annotated with the error.

use std::sync::Arc;

use tracing::warn;

use travel_agent_core::{ChatHistory, LanguageModel};
use travel_agent_llm::prompt;

pub struct ContextSummarizer {
    llm: Arc<dyn LanguageModel>,
    /// Number of most recent turns fed into the summary prompt
    window: usize,
}

impl ContextSummarizer {
    pub fn new(llm: Arc<dyn LanguageModel>, window: usize) -> Self {
        Self { llm, window }
    }

    pub async fn summarize(&self, history: &ChatHistory, user_input: &str) -> String {
        if history.is_empty() {
            return format!("Người dùng hỏi: {user_input}");
        }

        let turns = history.last_n(self.window);
        let request = prompt::context_summary(turns, user_input);
        match self.llm.complete(&request).await {
            Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
            Ok(_) => format!("Người dùng hỏi: {user_input}"),
            Err(err) => {
                warn!(error = %err, "context summarization failed, using restatement");
                format!("Người dùng hỏi: {user_input} (Lỗi xử lý ngữ cảnh: {err})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use travel_agent_core::{ConversationTurn, Error};

    struct FailingLlm;

    #[async_trait]
    impl LanguageModel for FailingLlm {
        async fn complete(&self, _prompt: &str) -> Result<String, Error> {
            Err(Error::Llm("connection refused".to_string()))
        }
    }

    struct EchoLlm;

    #[async_trait]
    impl LanguageModel for EchoLlm {
        async fn complete(&self, prompt: &str) -> Result<String, Error> {
            Ok(prompt.to_string())
        }
    }

    #[tokio::test]
    async fn test_empty_history_skips_llm() {
        let summarizer = ContextSummarizer::new(Arc::new(FailingLlm), 5);
        let summary = summarizer.summarize(&ChatHistory::new(), "xin chào").await;
        assert_eq!(summary, "Người dùng hỏi: xin chào");
    }

    #[tokio::test]
    async fn test_llm_failure_degrades_to_annotated_restatement() {
        let mut history = ChatHistory::new();
        history.push(ConversationTurn::user("thời tiết Sapa?"));

        let summarizer = ContextSummarizer::new(Arc::new(FailingLlm), 5);
        let summary = summarizer.summarize(&history, "còn ngày mai?").await;
        assert!(summary.starts_with("Người dùng hỏi: còn ngày mai?"));
        assert!(summary.contains("Lỗi xử lý ngữ cảnh"));
    }

    #[tokio::test]
    async fn test_window_limits_turns() {
        let mut history = ChatHistory::new();
        for i in 0..8 {
            history.push(ConversationTurn::user(format!("câu {i}")));
        }

        let summarizer = ContextSummarizer::new(Arc::new(EchoLlm), 5);
        let summary = summarizer.summarize(&history, "tiếp theo?").await;
        assert!(summary.contains("câu 7"));
        assert!(!summary.contains("câu 2"));
    }
}
