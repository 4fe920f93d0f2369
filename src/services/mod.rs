//! Provider adapters.
//!
//! Each adapter wraps one external service behind a one-argument async call and
//! reports failure through [`ProviderError`]. The dispatcher never looks further in.

pub mod encyclopedia;
pub mod http;
pub mod llm;
pub mod news;
pub mod retry;
pub mod weather;

use crate::config::AssistantConfig;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature_celsius: f64,
    pub description: String,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn lookup(&self, city: &str) -> Result<WeatherReport, ProviderError>;
}

#[async_trait]
pub trait EncyclopediaProvider: Send + Sync {
    /// Roughly two sentences about `topic`.
    async fn summarize(&self, topic: &str) -> Result<String, ProviderError>;
}

#[async_trait]
pub trait GenerativeAiProvider: Send + Sync {
    async fn ask(&self, prompt: &str) -> Result<String, ProviderError>;
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Headlines of the first `n` top stories, in ranking order.
    async fn top_stories(&self, n: usize) -> Result<Vec<String>, ProviderError>;
}

/// The full set of adapters a dispatcher talks to.
pub struct Providers {
    pub weather: Box<dyn WeatherProvider>,
    pub encyclopedia: Box<dyn EncyclopediaProvider>,
    pub ai: Box<dyn GenerativeAiProvider>,
    pub news: Box<dyn NewsProvider>,
}

impl Providers {
    /// Real HTTP adapters sharing one client.
    pub fn from_config(config: &AssistantConfig) -> Self {
        let client = http::build_client(config.request_timeout());
        let policy = retry::RetryPolicy::from_config(config);
        Self {
            weather: Box::new(weather::OpenWeatherMap::new(
                client.clone(),
                config.weather_api_key.clone(),
                policy,
            )),
            encyclopedia: Box::new(encyclopedia::WikipediaSummary::new(client.clone(), policy)),
            ai: Box::new(llm::GeminiService::new(
                client.clone(),
                config.ai_api_key.clone(),
                config.ai_model.clone(),
                policy,
            )),
            news: Box::new(news::HackerNews::new(client, policy)),
        }
    }
}
