//! Weather report turns
//!
//! The city comes from the query first, then the carried context, then the
//! default. Forecast keywords in the current input switch from the current
//! conditions endpoint to the 24-hour forecast.

use tracing::warn;

use travel_agent_core::keywords::contains_any;
use travel_agent_core::{CurrentWeather, ForecastEntry, ToolIntent, WeatherProvider};
use travel_agent_extract::resolve_location;

use crate::outcome::ToolOutcome;

const FORECAST_KEYWORDS: [&str; 7] = [
    "ngày mai", "mai", "tuần sau", "dự báo", "dự đoán", "tương lai", "sắp tới",
];

pub(crate) async fn handle(
    provider: &dyn WeatherProvider,
    input: &str,
    context: &str,
) -> (String, ToolOutcome) {
    let city = resolve_location(input, context).name;
    let wants_forecast = contains_any(input, &FORECAST_KEYWORDS);

    let report = if wants_forecast {
        provider
            .forecast(&city)
            .await
            .map(|entries| format_forecast(&city, &entries))
    } else {
        provider
            .current(&city)
            .await
            .map(|weather| format_current(&city, &weather))
    };

    match report {
        Ok(message) => (
            message,
            ToolOutcome::WeatherReport {
                city,
                forecast: wants_forecast,
            },
        ),
        Err(err) => {
            warn!(%city, error = %err, "weather lookup failed");
            (
                format!(
                    "Xin lỗi, tôi không lấy được thông tin thời tiết cho {city} lúc này. \
                     Bạn thử lại sau nhé! 🙏"
                ),
                ToolOutcome::Failed {
                    tool: ToolIntent::Weather,
                    message: err.to_string(),
                },
            )
        }
    }
}

fn format_current(city: &str, weather: &CurrentWeather) -> String {
    format!(
        "🌤️ **Thời tiết hiện tại tại {city}:**\n\n\
         🌡️ Nhiệt độ: {temp:.0}°C\n\
         ☁️ Trời: {description}\n\
         💧 Độ ẩm: {humidity}%\n\
         💨 Gió: {wind:.1} m/s",
        temp = weather.temp_c,
        description = weather.description,
        humidity = weather.humidity_pct,
        wind = weather.wind_mps,
    )
}

fn format_forecast(city: &str, entries: &[ForecastEntry]) -> String {
    if entries.is_empty() {
        return format!("Hiện chưa có dữ liệu dự báo cho {city}.");
    }
    let mut message = format!("🔮 **Dự báo thời tiết {city} (24h tới):**\n\n");
    for entry in entries {
        message.push_str(&format!(
            "⏰ {}: {:.0}°C - {}\n",
            entry.time, entry.temp_c, entry.description
        ));
    }
    message.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use travel_agent_core::Error;

    struct FixedWeather;

    #[async_trait]
    impl WeatherProvider for FixedWeather {
        async fn current(&self, _city: &str) -> Result<CurrentWeather, Error> {
            Ok(CurrentWeather {
                temp_c: 18.4,
                description: "mây rải rác".to_string(),
                humidity_pct: 84,
                wind_mps: 2.3,
            })
        }

        async fn forecast(&self, _city: &str) -> Result<Vec<ForecastEntry>, Error> {
            Ok(vec![
                ForecastEntry {
                    time: "09:00".to_string(),
                    temp_c: 17.0,
                    description: "mưa nhẹ".to_string(),
                },
                ForecastEntry {
                    time: "12:00".to_string(),
                    temp_c: 19.5,
                    description: "có mây".to_string(),
                },
            ])
        }
    }

    struct BrokenWeather;

    #[async_trait]
    impl WeatherProvider for BrokenWeather {
        async fn current(&self, _city: &str) -> Result<CurrentWeather, Error> {
            Err(Error::Weather("HTTP 503".to_string()))
        }

        async fn forecast(&self, _city: &str) -> Result<Vec<ForecastEntry>, Error> {
            Err(Error::Weather("HTTP 503".to_string()))
        }
    }

    #[tokio::test]
    async fn test_current_weather_with_query_city() {
        let (message, outcome) = handle(&FixedWeather, "thời tiết Sapa thế nào?", "").await;
        assert!(message.contains("Thời tiết hiện tại tại Sapa"));
        assert!(message.contains("18°C"));
        assert_eq!(
            outcome,
            ToolOutcome::WeatherReport {
                city: "Sapa".to_string(),
                forecast: false
            }
        );
    }

    #[tokio::test]
    async fn test_forecast_with_city_from_context() {
        let (message, outcome) =
            handle(&FixedWeather, "còn ngày mai thì sao?", "đang hỏi thời tiết ở Sapa").await;
        assert!(message.contains("Dự báo thời tiết Sapa"));
        assert!(message.contains("⏰ 09:00"));
        assert_eq!(
            outcome,
            ToolOutcome::WeatherReport {
                city: "Sapa".to_string(),
                forecast: true
            }
        );
    }

    #[tokio::test]
    async fn test_default_city_when_none_mentioned() {
        let (message, _) = handle(&FixedWeather, "thời tiết thế nào?", "").await;
        assert!(message.contains("Hà Nội"));
    }

    #[tokio::test]
    async fn test_provider_failure_degrades() {
        let (message, outcome) = handle(&BrokenWeather, "thời tiết Huế", "").await;
        assert!(message.contains("Xin lỗi"));
        assert!(matches!(outcome, ToolOutcome::Failed { tool: ToolIntent::Weather, .. }));
    }
}
