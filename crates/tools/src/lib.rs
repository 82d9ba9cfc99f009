//! External tool integrations
//!
//! Currently a single collaborator: the OpenWeatherMap client behind the
//! [`travel_agent_core::WeatherProvider`] trait.

mod weather;

pub use weather::{OpenWeatherClient, OpenWeatherConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("weather configuration error: {0}")]
    Configuration(String),

    #[error("weather network error: {0}")]
    Network(String),

    #[error("weather API error: {0}")]
    Api(String),

    #[error("invalid weather response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ToolError {
    fn from(err: reqwest::Error) -> Self {
        ToolError::Network(err.to_string())
    }
}

impl From<ToolError> for travel_agent_core::Error {
    fn from(err: ToolError) -> Self {
        travel_agent_core::Error::Weather(err.to_string())
    }
}
