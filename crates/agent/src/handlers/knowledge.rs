//! Knowledge-base lookup turns

use tracing::warn;

use travel_agent_core::{Retriever, SourceRef, ToolIntent};

use crate::outcome::ToolOutcome;
use crate::session::SessionState;

pub(crate) async fn handle(
    retriever: &dyn Retriever,
    state: &mut SessionState,
    input: &str,
) -> (String, ToolOutcome) {
    match retriever.query(input).await {
        Ok(answer) => {
            let grounded = match (&answer.answer, answer.no_relevant_info) {
                (Some(text), false) => Some(text.clone()),
                _ => None,
            };
            match grounded {
                Some(text) => (
                    with_sources(text, &answer.sources),
                    ToolOutcome::Answered {
                        sources: answer.sources,
                    },
                ),
                None => {
                    // offer the general-knowledge fallback; it only runs on
                    // an explicit yes next turn
                    state.offer_general(input);
                    (
                        no_info_message(input),
                        ToolOutcome::NoRelevantInfo {
                            query: input.to_string(),
                        },
                    )
                }
            }
        }
        Err(err) => {
            warn!(error = %err, "knowledge base query failed");
            (
                "Xin lỗi, hệ thống tra cứu đang gặp sự cố. Bạn vui lòng thử lại sau nhé! 🙏"
                    .to_string(),
                ToolOutcome::Failed {
                    tool: ToolIntent::Knowledge,
                    message: err.to_string(),
                },
            )
        }
    }
}

fn no_info_message(query: &str) -> String {
    format!(
        "🔍 Tôi không tìm thấy thông tin cụ thể về \"{query}\" trong cơ sở dữ liệu du lịch của mình.\n\n\
         💡 Bạn có muốn tôi trả lời dựa trên kiến thức chung không? Trả lời \"Có\" để tôi thử giúp bạn nhé!"
    )
}

fn with_sources(answer: String, sources: &[SourceRef]) -> String {
    if sources.is_empty() {
        answer
    } else {
        format!("{answer}\n\n📚 Nguồn: {} tài liệu tham khảo", sources.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use travel_agent_core::{Error, RetrievalAnswer, RetrievedDocument};

    struct FixedRetriever(RetrievalAnswer);

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn search(&self, _q: &str, _k: usize) -> Result<Vec<RetrievedDocument>, Error> {
            Ok(Vec::new())
        }

        async fn query(&self, _q: &str) -> Result<RetrievalAnswer, Error> {
            Ok(self.0.clone())
        }
    }

    struct BrokenRetriever;

    #[async_trait]
    impl Retriever for BrokenRetriever {
        async fn search(&self, _q: &str, _k: usize) -> Result<Vec<RetrievedDocument>, Error> {
            Err(Error::Retrieval("index offline".to_string()))
        }

        async fn query(&self, _q: &str) -> Result<RetrievalAnswer, Error> {
            Err(Error::Retrieval("index offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_grounded_answer_reports_sources() {
        let retriever = FixedRetriever(RetrievalAnswer {
            answer: Some("Hội An nổi tiếng với phố cổ.".to_string()),
            sources: vec![SourceRef {
                id: "doc-1".to_string(),
                category: Some("attraction".to_string()),
                location: Some("Hội An".to_string()),
            }],
            no_relevant_info: false,
        });
        let mut state = SessionState::new();
        let (message, outcome) = handle(&retriever, &mut state, "Hội An có gì?").await;
        assert!(message.contains("phố cổ"));
        assert!(message.contains("📚 Nguồn"));
        assert!(matches!(outcome, ToolOutcome::Answered { ref sources } if sources.len() == 1));
    }

    #[tokio::test]
    async fn test_no_match_offers_general_fallback() {
        let retriever = FixedRetriever(RetrievalAnswer {
            answer: None,
            sources: Vec::new(),
            no_relevant_info: true,
        });
        let mut state = SessionState::new();
        let (message, outcome) = handle(&retriever, &mut state, "ẩm thực sao Hỏa").await;
        assert!(message.contains("không tìm thấy thông tin"));
        assert!(matches!(outcome, ToolOutcome::NoRelevantInfo { .. }));
        assert_eq!(
            state.take_general_offer().as_deref(),
            Some("ẩm thực sao Hỏa")
        );
    }

    #[tokio::test]
    async fn test_retriever_failure_degrades() {
        let mut state = SessionState::new();
        let (message, outcome) = handle(&BrokenRetriever, &mut state, "Huế có gì?").await;
        assert!(message.contains("Xin lỗi"));
        assert!(matches!(outcome, ToolOutcome::Failed { tool: ToolIntent::Knowledge, .. }));
        assert!(state.take_general_offer().is_none());
    }
}
