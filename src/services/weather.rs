use crate::error::ProviderError;
use crate::services::retry::{with_retry, RetryPolicy};
use crate::services::{WeatherProvider, WeatherReport};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

pub const WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// OpenWeatherMap current-weather lookup in metric units.
#[derive(Clone)]
pub struct OpenWeatherMap {
    client: Client,
    api_key: Option<String>,
    policy: RetryPolicy,
}

impl OpenWeatherMap {
    pub fn new(client: Client, api_key: Option<String>, policy: RetryPolicy) -> Self {
        Self {
            client,
            api_key,
            policy,
        }
    }

    async fn fetch(&self, city: &str, key: &str) -> Result<WeatherReport, ProviderError> {
        debug!("Weather lookup for '{}'", city);
        let response = self
            .client
            .get(WEATHER_URL)
            .query(&[("q", city), ("appid", key), ("units", "metric")])
            .send()
            .await?;
        let status = response.status().as_u16();
        let body: Value = response.json().await?;
        parse_weather(status, &body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMap {
    async fn lookup(&self, city: &str) -> Result<WeatherReport, ProviderError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(ProviderError::Unavailable(
                "no weather API key configured".to_string(),
            ));
        };
        if city.is_empty() {
            return Err(ProviderError::NotFound(String::new()));
        }
        with_retry(self.policy, "weather lookup", || self.fetch(city, key)).await
    }
}

/// Interprets an OpenWeatherMap response. A body without `main` means the city is unknown.
pub fn parse_weather(status: u16, body: &Value) -> Result<WeatherReport, ProviderError> {
    if status == 401 {
        return Err(ProviderError::Unavailable(
            "the weather API key was rejected".to_string(),
        ));
    }
    if status >= 500 {
        return Err(ProviderError::Transient(format!(
            "weather service returned {}",
            status
        )));
    }

    let main = match body.get("main") {
        Some(main) if !main.is_null() => main,
        _ => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Err(ProviderError::NotFound(message.to_string()));
        }
    };

    let temperature_celsius = main
        .get("temp")
        .and_then(Value::as_f64)
        .ok_or_else(|| ProviderError::Transient("weather response has no temperature".into()))?;
    let description = body["weather"][0]["description"]
        .as_str()
        .ok_or_else(|| ProviderError::Transient("weather response has no description".into()))?;

    Ok(WeatherReport {
        temperature_celsius,
        description: description.to_string(),
    })
}
