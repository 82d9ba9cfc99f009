//! Grounded question answering with a relevance gate
//!
//! Retrieved documents below the minimum score never reach the LLM. When no
//! document clears the gate the outcome is `no_relevant_info`, and the
//! caller decides how to degrade. Answers cite chunks as `[CHUNK_n]`; the
//! markers are mapped back to document ids and stripped from the final text.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use travel_agent_core::{
    Error as CoreError, LanguageModel, RetrievalAnswer, RetrievedDocument, Retriever, SourceRef,
};

use crate::http::VectorSearch;

static CHUNK_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[CHUNK_(\d+)\]").unwrap());

/// Sources shown when the model cites no chunk at all
const FALLBACK_SOURCE_COUNT: usize = 3;

#[derive(Debug, Clone)]
pub struct KnowledgeBaseConfig {
    pub top_k: usize,
    /// Documents scoring below this never reach the LLM
    pub min_relevance_score: f32,
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_relevance_score: 0.5,
        }
    }
}

/// Retrieval collaborator: vector search plus grounded answer generation
pub struct KnowledgeBase<S> {
    search: S,
    llm: Arc<dyn LanguageModel>,
    config: KnowledgeBaseConfig,
}

impl<S: VectorSearch> KnowledgeBase<S> {
    pub fn new(search: S, llm: Arc<dyn LanguageModel>, config: KnowledgeBaseConfig) -> Self {
        Self {
            search,
            llm,
            config,
        }
    }

    fn no_match() -> RetrievalAnswer {
        RetrievalAnswer {
            answer: None,
            sources: Vec::new(),
            no_relevant_info: true,
        }
    }

    fn source_ref(doc: &RetrievedDocument) -> SourceRef {
        let field = |key: &str| {
            doc.metadata
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        SourceRef {
            id: doc.id.clone(),
            category: field("category"),
            location: field("location"),
        }
    }

    fn answer_prompt(question: &str, context: &str) -> String {
        format!(
            "Bạn là trợ lý du lịch thông minh chuyên về du lịch Việt Nam.\n\n\
             Dựa vào thông tin sau đây để trả lời câu hỏi của khách hàng:\n\n\
             THÔNG TIN THAM KHẢO:\n{context}\n\n\
             CÂU HỎI: {question}\n\n\
             HƯỚNG DẪN QUAN TRỌNG:\n\
             - Trả lời bằng tiếng Việt\n\
             - BẮT BUỘC: Khi sử dụng thông tin từ chunk nào, PHẢI ghi [CHUNK_X] ngay sau thông tin đó\n\
             - Ví dụ: \"Hà Nội có Hồ Hoàn Kiếm [CHUNK_1] và phố cổ với 36 phố phường [CHUNK_2]\"\n\
             - Nếu thông tin không đủ để trả lời, hãy trả lời \"NO_RELEVANT_INFO\"\n\
             - Chỉ sử dụng thông tin từ các chunk được cung cấp\n\
             - Trả lời chi tiết và hữu ích\n\n\
             Hãy trả lời và nhớ ghi rõ [CHUNK_X] cho mỗi thông tin sử dụng:"
        )
    }

    /// Map `[CHUNK_n]` citations back to documents; dedupe, keep chunk order
    fn cited_sources<'a>(
        answer: &str,
        relevant: &'a [RetrievedDocument],
    ) -> Vec<&'a RetrievedDocument> {
        let mut seen = HashSet::new();
        let mut cited = Vec::new();
        for caps in CHUNK_REF.captures_iter(answer) {
            if let Some(index) = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
            {
                if let Some(doc) = relevant.get(index) {
                    if seen.insert(doc.id.clone()) {
                        cited.push(doc);
                    }
                }
            }
        }
        cited
    }
}

#[async_trait]
impl<S: VectorSearch> Retriever for KnowledgeBase<S> {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedDocument>, CoreError> {
        Ok(self.search.search(query, top_k).await?)
    }

    async fn query(&self, question: &str) -> Result<RetrievalAnswer, CoreError> {
        let documents = self.search.search(question, self.config.top_k).await?;

        let relevant: Vec<RetrievedDocument> = documents
            .into_iter()
            .filter(|doc| doc.score >= self.config.min_relevance_score)
            .collect();

        info!(
            relevant = relevant.len(),
            threshold = self.config.min_relevance_score,
            "retrieval relevance gate"
        );

        if relevant.is_empty() {
            return Ok(Self::no_match());
        }

        let context = relevant
            .iter()
            .enumerate()
            .map(|(i, doc)| format!("[CHUNK_{}] {}", i + 1, doc.text))
            .collect::<Vec<_>>()
            .join("\n");

        let answer = self
            .llm
            .complete(&Self::answer_prompt(question, &context))
            .await?;

        if answer.contains("NO_RELEVANT_INFO") {
            debug!("model declined to answer from provided chunks");
            return Ok(Self::no_match());
        }

        let mut sources: Vec<SourceRef> = Self::cited_sources(&answer, &relevant)
            .into_iter()
            .map(Self::source_ref)
            .collect();
        if sources.is_empty() {
            sources = relevant
                .iter()
                .take(FALLBACK_SOURCE_COUNT)
                .map(Self::source_ref)
                .collect();
        }

        let clean = CHUNK_REF.replace_all(&answer, "").trim().to_string();

        Ok(RetrievalAnswer {
            answer: Some(clean),
            sources,
            no_relevant_info: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use travel_agent_core::Error;

    struct FixedSearch(Vec<RetrievedDocument>);

    #[async_trait]
    impl VectorSearch for FixedSearch {
        async fn search(
            &self,
            _query: &str,
            _top_k: usize,
        ) -> Result<Vec<RetrievedDocument>, crate::RagError> {
            Ok(self.0.clone())
        }
    }

    struct FixedLlm(String);

    #[async_trait]
    impl LanguageModel for FixedLlm {
        async fn complete(&self, _prompt: &str) -> Result<String, Error> {
            Ok(self.0.clone())
        }
    }

    fn doc(id: &str, score: f32, text: &str) -> RetrievedDocument {
        RetrievedDocument {
            id: id.to_string(),
            score,
            text: text.to_string(),
            metadata: HashMap::new(),
        }
    }

    fn kb(docs: Vec<RetrievedDocument>, answer: &str) -> KnowledgeBase<FixedSearch> {
        KnowledgeBase::new(
            FixedSearch(docs),
            Arc::new(FixedLlm(answer.to_string())),
            KnowledgeBaseConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_no_relevant_info_below_threshold() {
        let kb = kb(vec![doc("a", 0.2, "x"), doc("b", 0.49, "y")], "unused");
        let result = kb.query("có gì ở Mộc Châu?").await.unwrap();
        assert!(result.no_relevant_info);
        assert!(result.answer.is_none());
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn test_cited_sources_mapped_and_markers_stripped() {
        let kb = kb(
            vec![doc("doc-1", 0.9, "Hồ Hoàn Kiếm"), doc("doc-2", 0.8, "phố cổ")],
            "Hà Nội có Hồ Hoàn Kiếm [CHUNK_1] và phố cổ [CHUNK_2].",
        );
        let result = kb.query("Hà Nội có gì?").await.unwrap();
        assert!(!result.no_relevant_info);
        let answer = result.answer.unwrap();
        assert!(!answer.contains("CHUNK"));
        let ids: Vec<_> = result.sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["doc-1", "doc-2"]);
    }

    #[tokio::test]
    async fn test_uncited_answer_falls_back_to_top_sources() {
        let kb = kb(
            vec![
                doc("a", 0.9, "1"),
                doc("b", 0.8, "2"),
                doc("c", 0.7, "3"),
                doc("d", 0.6, "4"),
            ],
            "Một câu trả lời không trích dẫn.",
        );
        let result = kb.query("?").await.unwrap();
        assert_eq!(result.sources.len(), 3);
    }

    #[tokio::test]
    async fn test_model_declines_yields_no_match() {
        let kb = kb(vec![doc("a", 0.9, "x")], "NO_RELEVANT_INFO");
        let result = kb.query("?").await.unwrap();
        assert!(result.no_relevant_info);
    }
}
