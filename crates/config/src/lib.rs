//! Configuration for the travel assistant
//!
//! Settings are plain serde structs with defaulted fields, loadable from a
//! YAML file with environment-variable overrides for secrets. Validation is
//! explicit via [`Settings::validate`], not implicit at deserialization.

mod settings;
mod user;

pub use settings::{
    AgentConfig, LlmSettings, RagConfig, Settings, SuggestionConfig, WeatherSettings,
};
pub use user::UserPreferences;

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
