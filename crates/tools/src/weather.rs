//! OpenWeatherMap client
//!
//! Uses the data/2.5 current-weather and 3-hour-step forecast endpoints with
//! metric units and Vietnamese descriptions. The forecast is trimmed to the
//! next 24 hours (8 steps).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use travel_agent_core::{CurrentWeather, Error as CoreError, ForecastEntry, WeatherProvider};

use crate::ToolError;

const FORECAST_STEPS: usize = 8;

#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    pub api_key: String,
    /// Base URL up to `/data/2.5`
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("WEATHER_API_KEY").unwrap_or_default(),
            endpoint: "https://api.openweathermap.org/data/2.5".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

pub struct OpenWeatherClient {
    config: OpenWeatherConfig,
    client: Client,
}

impl OpenWeatherClient {
    pub fn new(config: OpenWeatherConfig) -> Result<Self, ToolError> {
        if config.api_key.is_empty() {
            return Err(ToolError::Configuration(
                "weather API key not set".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ToolError::Network(e.to_string()))?;
        Ok(Self { config, client })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        city: &str,
    ) -> Result<T, ToolError> {
        let response = self
            .client
            .get(format!("{}/{path}", self.config.endpoint))
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
                ("lang", "vi"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ToolError::Api(format!("HTTP {status}: {error_text}")));
        }

        response
            .json()
            .await
            .map_err(|e| ToolError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<CurrentWeather, CoreError> {
        let data: CurrentResponse = self.get_json("weather", city).await?;
        let condition = data
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ToolError::InvalidResponse("missing weather block".to_string()))?;

        debug!(city, temp = data.main.temp, "current weather fetched");
        Ok(CurrentWeather {
            temp_c: data.main.temp,
            description: condition.description,
            humidity_pct: data.main.humidity,
            wind_mps: data.wind.speed,
        })
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, CoreError> {
        let data: ForecastResponse = self.get_json("forecast", city).await?;
        let entries = data
            .list
            .into_iter()
            .take(FORECAST_STEPS)
            .filter_map(|step| {
                let description = step.weather.into_iter().next()?.description;
                Some(ForecastEntry {
                    time: time_of(&step.dt_txt),
                    temp_c: step.main.temp,
                    description,
                })
            })
            .collect();
        Ok(entries)
    }
}

/// `HH:MM` from an OpenWeatherMap `YYYY-MM-DD HH:MM:SS` timestamp
fn time_of(dt_txt: &str) -> String {
    dt_txt
        .split_whitespace()
        .nth(1)
        .map(|t| t.chars().take(5).collect())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: MainBlock,
    weather: Vec<ConditionBlock>,
    wind: WindBlock,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f32,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f32,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastStep>,
}

#[derive(Debug, Deserialize)]
struct ForecastStep {
    main: MainBlock,
    weather: Vec<ConditionBlock>,
    dt_txt: String,
}
