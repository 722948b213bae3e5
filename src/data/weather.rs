//! OpenWeatherMap current weather client
//!
//! This module fetches current conditions for a city and parses them into a
//! `WeatherReport`. Without an API key the client fails fast without touching
//! the network, and callers fall back to `synthetic_report`.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::WeatherReport;
use crate::random::RandomSource;

/// Base URL for the OpenWeatherMap API
pub const OPEN_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Descriptions used for synthetic reports
pub const SYNTHETIC_DESCRIPTIONS: [&str; 4] = ["Sunny", "Cloudy", "Rainy", "Partly Cloudy"];

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API key configured
    #[error("No weather API key configured")]
    MissingApiKey,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),
}

/// OpenWeatherMap response structure
#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    main: MainReadings,
    weather: Vec<Condition>,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

/// Client for fetching weather from OpenWeatherMap
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    /// Fetch current weather for `city` in metric units
    ///
    /// # Returns
    /// * `Ok(WeatherReport)` - Weather data for the city
    /// * `Err(WeatherError)` - If no key is configured, or the request or parsing fails
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        parse_report(city, &text)
    }
}

fn parse_report(city: &str, body: &str) -> Result<WeatherReport, WeatherError> {
    let response: OpenWeatherResponse = serde_json::from_str(body)?;

    let description = response
        .weather
        .into_iter()
        .next()
        .map(|c| capitalize(&c.description))
        .ok_or_else(|| WeatherError::MissingField("weather".to_string()))?;

    Ok(WeatherReport {
        city: city.to_string(),
        temperature: response.main.temp,
        humidity: response.main.humidity.clamp(0.0, 100.0).round() as u8,
        description,
        wind_speed: response.wind.speed,
        pressure: response.main.pressure.max(0.0).round() as u32,
    })
}

/// Uppercases the first letter ("light rain" -> "Light rain")
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generates a fallback report for `city`
///
/// Ranges: temperature 10-30 °C, humidity 40-80 %, wind 0-20, pressure 1000-1050 hPa.
pub fn synthetic_report(city: &str, rng: &RandomSource) -> WeatherReport {
    WeatherReport {
        city: city.to_string(),
        temperature: rng.float(10.0..30.0, 1),
        humidity: rng.int(40..=80) as u8,
        description: rng.pick(&SYNTHETIC_DESCRIPTIONS).to_string(),
        wind_speed: rng.float(0.0..20.0, 1),
        pressure: rng.int(1000..=1050),
    }
}
