//! User preference configuration
//!
//! Interests and budget levels feed personalization: the general-chat prompt,
//! trip-plan defaults, and suggestion relevance scoring.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Interest flags keyed by interest id ("food", "beach", "culture", ...)
    #[serde(default)]
    pub interests: BTreeMap<String, bool>,

    /// Preferred budget level per category ("accommodation" → "budget"/"mid"/"luxury")
    #[serde(default)]
    pub budget_levels: BTreeMap<String, String>,

    /// Dietary restrictions ("vegetarian", "halal")
    #[serde(default)]
    pub dietary: Vec<String>,
}

impl UserPreferences {
    /// Ids of interests that are switched on
    pub fn active_interests(&self) -> Vec<String> {
        self.interests
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn budget_level(&self, category: &str) -> Option<&str> {
        self.budget_levels.get(category).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_interests() {
        let yaml = r#"
interests:
  food: true
  beach: false
  culture: true
budget_levels:
  accommodation: mid
"#;
        let prefs: UserPreferences = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(prefs.active_interests(), vec!["culture", "food"]);
        assert_eq!(prefs.budget_level("accommodation"), Some("mid"));
        assert_eq!(prefs.budget_level("transport"), None);
    }
}
