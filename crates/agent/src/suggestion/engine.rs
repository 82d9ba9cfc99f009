//! Suggestion scoring pipeline
//!
//! Candidates from four generators (tool table, cross-tool flow, curated
//! locations, retrieval categories) are deduplicated by text, filtered by a
//! minimum combined score, ranked, and then diversity-selected so one
//! category or target tool cannot crowd out the rest.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use travel_agent_config::SuggestionConfig;
use travel_agent_core::keywords::contains_any;
use travel_agent_core::{SourceRef, ToolIntent};
use travel_agent_extract::find_location;

use crate::suggestion::templates::{self, Template};

const LOCATION_FILL_FALLBACK: &str = "địa điểm này";
/// Always keep at least this many before the diversity cut applies
const DIVERSITY_FLOOR: usize = 3;

/// A ranked follow-up suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub category: String,
    pub target: ToolIntent,
    pub priority: f32,
    pub context_relevance: f32,
}

impl Suggestion {
    /// Combined rank: priority-weighted with context relevance
    pub fn score(&self) -> f32 {
        self.priority * 0.6 + self.context_relevance * 0.4
    }
}

/// Everything the engine looks at for one turn
pub struct SuggestionContext<'a> {
    pub tool_used: ToolIntent,
    pub user_query: &'a str,
    pub agent_response: &'a str,
    pub location: Option<String>,
    pub sources: &'a [SourceRef],
    pub user_interests: &'a [String],
}

pub struct SuggestionEngine {
    config: SuggestionConfig,
}

impl SuggestionEngine {
    pub fn new(config: SuggestionConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, ctx: &SuggestionContext<'_>) -> Vec<Suggestion> {
        if !self.config.enabled {
            return Vec::new();
        }

        let fill_location = ctx
            .location
            .clone()
            .or_else(|| find_location(ctx.user_query, "").map(|l| l.name));

        let mut candidates = self.tool_candidates(ctx, fill_location.as_deref());
        if self.config.cross_tool {
            candidates.extend(self.cross_tool_candidates(ctx, fill_location.as_deref()));
        }
        if self.config.location_specific {
            if let Some(location) = &ctx.location {
                candidates.extend(self.location_candidates(ctx, location));
            }
        }
        if self.config.retrieval_based && !ctx.sources.is_empty() {
            candidates.extend(self.retrieval_candidates(ctx));
        }

        let ranked = self.filter_and_rank(candidates);
        self.diverse_select(ranked)
    }

    fn tool_candidates(
        &self,
        ctx: &SuggestionContext<'_>,
        location: Option<&str>,
    ) -> Vec<Suggestion> {
        let travel_intent = contains_any(ctx.user_query, &templates::TRAVEL_INTENT_KEYWORDS);
        templates::by_tool(ctx.tool_used, travel_intent)
            .iter()
            .map(|template| self.candidate(template, ctx, location, template.priority, 0.0))
            .collect()
    }

    fn cross_tool_candidates(
        &self,
        ctx: &SuggestionContext<'_>,
        location: Option<&str>,
    ) -> Vec<Suggestion> {
        templates::flow_targets(ctx.tool_used)
            .into_iter()
            .filter_map(templates::cross_tool)
            .map(|template| {
                // flow suggestions rank below the tool's own table
                let priority = template.priority * 0.8;
                self.candidate(&template, ctx, location, priority, 0.0)
            })
            .collect()
    }

    fn location_candidates(&self, ctx: &SuggestionContext<'_>, location: &str) -> Vec<Suggestion> {
        let location_lower = location.to_lowercase();
        templates::LOCATION_SPECIFIC
            .iter()
            .find(|(city, _)| {
                let city_lower = city.to_lowercase();
                location_lower.contains(&city_lower) || city_lower.contains(&location_lower)
            })
            .map(|(_, city_templates)| {
                city_templates
                    .iter()
                    .map(|template| {
                        self.candidate(template, ctx, Some(location), template.priority, 0.2)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn retrieval_candidates(&self, ctx: &SuggestionContext<'_>) -> Vec<Suggestion> {
        let categories: HashSet<&str> = ctx
            .sources
            .iter()
            .filter_map(|source| source.category.as_deref())
            .collect();
        let source_location = ctx
            .sources
            .iter()
            .find_map(|source| source.location.as_deref());
        let location = ctx.location.as_deref().or(source_location);

        templates::RETRIEVAL_BASED
            .iter()
            .filter(|(category, _)| categories.contains(category))
            .flat_map(|(_, category_templates)| category_templates.iter())
            .map(|template| self.candidate(template, ctx, location, template.priority, 0.3))
            .collect()
    }

    fn candidate(
        &self,
        template: &Template,
        ctx: &SuggestionContext<'_>,
        location: Option<&str>,
        priority: f32,
        relevance_boost: f32,
    ) -> Suggestion {
        Suggestion {
            text: template
                .text
                .replace("{location}", location.unwrap_or(LOCATION_FILL_FALLBACK)),
            category: template.category.to_string(),
            target: template.target,
            priority,
            context_relevance: context_relevance(template, ctx) + relevance_boost,
        }
    }

    fn filter_and_rank(&self, candidates: Vec<Suggestion>) -> Vec<Suggestion> {
        let mut seen = HashSet::new();
        let mut ranked: Vec<Suggestion> = candidates
            .into_iter()
            .filter(|suggestion| seen.insert(suggestion.text.clone()))
            .filter(|suggestion| suggestion.score() >= self.config.min_relevance_score)
            .collect();
        ranked.sort_by(|a, b| {
            b.score()
                .partial_cmp(&a.score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    fn diverse_select(&self, ranked: Vec<Suggestion>) -> Vec<Suggestion> {
        let mut selected = Vec::new();
        let mut category_counts: HashMap<String, usize> = HashMap::new();
        let mut target_counts: HashMap<ToolIntent, usize> = HashMap::new();

        for suggestion in ranked {
            let category_count = *category_counts.get(&suggestion.category).unwrap_or(&0);
            let target_count = *target_counts.get(&suggestion.target).unwrap_or(&0);
            let penalty = category_count as f32 * 0.1 + target_count as f32 * 0.15;
            let adjusted = suggestion.score() - penalty;

            let cut = self.config.min_relevance_score * self.config.diversity_factor;
            if adjusted >= cut || selected.len() < DIVERSITY_FLOOR {
                *category_counts.entry(suggestion.category.clone()).or_insert(0) += 1;
                *target_counts.entry(suggestion.target).or_insert(0) += 1;
                selected.push(suggestion);
                if selected.len() >= self.config.max_suggestions {
                    break;
                }
            }
        }
        selected
    }
}

/// Base 0.5, plus keyword overlap with the turn text (up to 0.3), interest
/// overlap (up to 0.2), and a location bonus (0.1); capped at 1.0 before any
/// generator boost.
fn context_relevance(template: &Template, ctx: &SuggestionContext<'_>) -> f32 {
    let mut relevance = 0.5;

    if !template.keywords.is_empty() {
        let haystack = format!("{} {}", ctx.user_query, ctx.agent_response).to_lowercase();
        let matches = template
            .keywords
            .iter()
            .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
            .count();
        relevance += matches as f32 / template.keywords.len() as f32 * 0.3;
    }

    if !ctx.user_interests.is_empty() && !template.interests.is_empty() {
        let matches = template
            .interests
            .iter()
            .filter(|interest| ctx.user_interests.iter().any(|user| user == *interest))
            .count();
        relevance += matches as f32 / template.interests.len() as f32 * 0.2;
    }

    if ctx.location.is_some() {
        relevance += 0.1;
    }

    relevance.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(tool: ToolIntent, query: &'a str, location: Option<String>) -> SuggestionContext<'a> {
        SuggestionContext {
            tool_used: tool,
            user_query: query,
            agent_response: "",
            location,
            sources: &[],
            user_interests: &[],
        }
    }

    #[test]
    fn test_cap_and_ordering() {
        let engine = SuggestionEngine::new(SuggestionConfig::default());
        let suggestions = engine.generate(&ctx(
            ToolIntent::Weather,
            "thời tiết Sapa",
            Some("Sapa".to_string()),
        ));

        assert!(!suggestions.is_empty());
        assert!(suggestions.len() <= 5);
        for pair in suggestions.windows(2) {
            assert!(pair[0].score() >= pair[1].score() - 1e-6);
        }
    }

    #[test]
    fn test_location_fills_placeholder() {
        let engine = SuggestionEngine::new(SuggestionConfig::default());
        let suggestions = engine.generate(&ctx(
            ToolIntent::Weather,
            "thời tiết",
            Some("Sapa".to_string()),
        ));
        assert!(suggestions.iter().any(|s| s.text.contains("Sapa")));
        assert!(!suggestions.iter().any(|s| s.text.contains("{location}")));
    }

    #[test]
    fn test_no_duplicate_texts() {
        let engine = SuggestionEngine::new(SuggestionConfig::default());
        // knowledge table and cross-tool both propose a trip plan for the city
        let suggestions = engine.generate(&ctx(
            ToolIntent::Knowledge,
            "Đà Lạt có gì?",
            Some("Đà Lạt".to_string()),
        ));
        let mut texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), suggestions.len());
    }

    #[test]
    fn test_curated_city_suggestions_included() {
        let engine = SuggestionEngine::new(SuggestionConfig::default());
        let suggestions = engine.generate(&ctx(
            ToolIntent::Knowledge,
            "Hà Nội có gì chơi?",
            Some("Hà Nội".to_string()),
        ));
        assert!(suggestions
            .iter()
            .any(|s| s.category == "location_specific"));
    }

    #[test]
    fn test_retrieval_categories_drive_followups() {
        let engine = SuggestionEngine::new(SuggestionConfig::default());
        let sources = vec![SourceRef {
            id: "doc-1".to_string(),
            category: Some("food".to_string()),
            location: Some("Huế".to_string()),
        }];
        let context = SuggestionContext {
            tool_used: ToolIntent::Knowledge,
            user_query: "ẩm thực Huế",
            agent_response: "",
            location: None,
            sources: &sources,
            user_interests: &[],
        };
        let suggestions = engine.generate(&context);
        assert!(suggestions.iter().any(|s| s.category == "rag_food"));
        assert!(suggestions.iter().any(|s| s.text.contains("Huế")));
    }

    #[test]
    fn test_disabled_engine_returns_nothing() {
        let config = SuggestionConfig {
            enabled: false,
            ..Default::default()
        };
        let engine = SuggestionEngine::new(config);
        assert!(engine
            .generate(&ctx(ToolIntent::Weather, "thời tiết", None))
            .is_empty());
    }

    #[test]
    fn test_min_score_threshold_filters() {
        let config = SuggestionConfig {
            min_relevance_score: 0.99,
            ..Default::default()
        };
        let engine = SuggestionEngine::new(config);
        assert!(engine
            .generate(&ctx(ToolIntent::General, "xin chào", None))
            .is_empty());
    }
}
