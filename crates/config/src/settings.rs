//! Main settings module

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::user::UserPreferences;
use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Agent persona configuration
    #[serde(default)]
    pub agent: AgentConfig,

    /// Suggestion engine configuration
    #[serde(default)]
    pub suggestions: SuggestionConfig,

    /// Retrieval configuration
    #[serde(default)]
    pub rag: RagConfig,

    /// Language model configuration
    #[serde(default)]
    pub llm: LlmSettings,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherSettings,

    /// User preferences used for personalization
    #[serde(default)]
    pub user: UserPreferences,
}

/// Agent persona and conversation-shaping options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Display name of the assistant
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Personality descriptor injected into general-chat prompts
    #[serde(default = "default_personality")]
    pub personality: String,

    /// Number of recent turns summarized into rolling context (1..=10)
    #[serde(default = "default_max_context_messages")]
    pub max_context_messages: usize,

    /// Sampling temperature for generation calls
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_agent_name() -> String {
    "Mai".to_string()
}

fn default_personality() -> String {
    "thân thiện và chuyên nghiệp".to_string()
}

fn default_max_context_messages() -> usize {
    5
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            personality: default_personality(),
            max_context_messages: default_max_context_messages(),
            temperature: default_temperature(),
        }
    }
}

/// Suggestion engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Master switch
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum suggestions returned per turn
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Minimum combined score for a candidate to survive filtering
    #[serde(default = "default_min_relevance_score")]
    pub min_relevance_score: f32,

    /// Diversity factor: higher keeps the selection stricter, more diverse
    #[serde(default = "default_diversity_factor")]
    pub diversity_factor: f32,

    /// Include cross-tool flow suggestions
    #[serde(default = "default_true")]
    pub cross_tool: bool,

    /// Include curated location-specific suggestions
    #[serde(default = "default_true")]
    pub location_specific: bool,

    /// Include suggestions derived from retrieval source categories
    #[serde(default = "default_true")]
    pub retrieval_based: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_suggestions() -> usize {
    5
}

fn default_min_relevance_score() -> f32 {
    0.3
}

fn default_diversity_factor() -> f32 {
    0.7
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_suggestions: default_max_suggestions(),
            min_relevance_score: default_min_relevance_score(),
            diversity_factor: default_diversity_factor(),
            cross_tool: true,
            location_specific: true,
            retrieval_based: true,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Documents fetched per search
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Single source of truth for the relevance threshold below which
    /// documents are discarded and the no-relevant-info outcome is produced
    #[serde(default = "default_rag_min_score")]
    pub min_relevance_score: f32,
}

fn default_top_k() -> usize {
    5
}

fn default_rag_min_score() -> f32 {
    0.5
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            min_relevance_score: default_rag_min_score(),
        }
    }
}

/// Language model backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// OpenAI-compatible chat completions endpoint
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_llm_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds (recommended range 10..=30)
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_llm_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_llm_timeout_secs() -> u64 {
    20
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key_env: default_llm_api_key_env(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSettings {
    #[serde(default = "default_weather_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_weather_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_weather_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_weather_endpoint() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_api_key_env() -> String {
    "WEATHER_API_KEY".to_string()
}

fn default_weather_timeout_secs() -> u64 {
    10
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            endpoint: default_weather_endpoint(),
            api_key_env: default_weather_api_key_env(),
            timeout_secs: default_weather_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Settings = serde_yaml::from_str(&raw)?;
        settings.validate()?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Validate value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=10).contains(&self.agent.max_context_messages) {
            return Err(ConfigError::InvalidValue {
                field: "agent.max_context_messages".to_string(),
                reason: "must be within 1..=10".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.agent.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "agent.temperature".to_string(),
                reason: "must be within 0.0..=2.0".to_string(),
            });
        }
        if self.suggestions.max_suggestions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "suggestions.max_suggestions".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        for (field, value) in [
            (
                "suggestions.min_relevance_score",
                self.suggestions.min_relevance_score,
            ),
            (
                "suggestions.diversity_factor",
                self.suggestions.diversity_factor,
            ),
            ("rag.min_relevance_score", self.rag.min_relevance_score),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be within 0.0..=1.0".to_string(),
                });
            }
        }
        if self.rag.top_k == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rag.top_k".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.agent.max_context_messages, 5);
        assert_eq!(settings.suggestions.max_suggestions, 5);
        assert!((settings.rag.min_relevance_score - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_context_window_bounds() {
        let mut settings = Settings::default();
        settings.agent.max_context_messages = 0;
        assert!(settings.validate().is_err());

        settings.agent.max_context_messages = 11;
        assert!(settings.validate().is_err());

        settings.agent.max_context_messages = 10;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
agent:
  name: "Lan"
suggestions:
  max_suggestions: 3
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.agent.name, "Lan");
        assert_eq!(settings.agent.max_context_messages, 5);
        assert_eq!(settings.suggestions.max_suggestions, 3);
        assert!((settings.suggestions.diversity_factor - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("travel-agent-settings-test.yaml");
        std::fs::write(&path, "agent:\n  name: \"Lan\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.agent.name, "Lan");
        assert_eq!(settings.agent.max_context_messages, 5);
        std::fs::remove_file(&path).ok();

        let missing = std::env::temp_dir().join("travel-agent-settings-missing.yaml");
        assert!(Settings::load(missing).is_err());
    }

    #[test]
    fn test_score_range_validation() {
        let mut settings = Settings::default();
        settings.rag.min_relevance_score = 1.5;
        assert!(settings.validate().is_err());
    }
}
