//! Keyword-set matcher
//!
//! A single table-driven matcher used everywhere a natural-language category
//! decision is needed: classifier fallback, forecast-vs-current detection,
//! confirmation yes/no detection, travel-intent detection. Categories are
//! checked in insertion order; the first category with a matching keyword
//! wins.

/// Table of category → keyword list, matched against lower-cased text
#[derive(Debug, Clone)]
pub struct KeywordMatcher<C: Copy> {
    table: Vec<(C, Vec<&'static str>)>,
}

impl<C: Copy> KeywordMatcher<C> {
    pub fn new(table: Vec<(C, Vec<&'static str>)>) -> Self {
        Self { table }
    }

    /// First category whose keyword list matches the text, in table order
    pub fn match_category(&self, text: &str) -> Option<C> {
        let lower = text.to_lowercase();
        self.table
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(category, _)| *category)
    }

    /// Whether any keyword of any category matches
    pub fn matches_any(&self, text: &str) -> bool {
        self.match_category(text).is_some()
    }
}

/// Standalone check against a single keyword list
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}
