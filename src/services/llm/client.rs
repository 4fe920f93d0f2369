use crate::error::ProviderError;
use crate::services::retry::{with_retry, RetryPolicy};
use crate::services::GenerativeAiProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// One-shot prompts against Gemini's `generateContent`.
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: Option<String>,
    model: String,
    policy: RetryPolicy,
}

#[derive(Serialize)]
pub struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl GeminiService {
    pub fn new(
        client: Client,
        api_key: Option<String>,
        model: String,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            client,
            api_key,
            model,
            policy,
        }
    }

    async fn generate(&self, prompt: &str, key: &str) -> Result<String, ProviderError> {
        debug!("Gemini request to model {}", self.model);
        let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, self.model);
        let response = self
            .client
            .post(url)
            .query(&[("key", key)])
            .json(&GenerateRequest::new(prompt))
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ProviderError::Transient(format!("Gemini returned {}", status)));
        }
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!("Gemini returned {}", status)));
        }

        let body: GenerateResponse = response.json().await?;
        body.text()
            .ok_or_else(|| ProviderError::Unavailable("Gemini sent an empty answer".to_string()))
    }
}

#[async_trait]
impl GenerativeAiProvider for GeminiService {
    async fn ask(&self, prompt: &str) -> Result<String, ProviderError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(ProviderError::Unavailable("no AI API key configured".to_string()));
        };
        // Whatever went wrong, the user sees a setup hint.
        with_retry(self.policy, "gemini request", || self.generate(prompt, key))
            .await
            .map_err(|e| match e {
                ProviderError::Transient(reason) => ProviderError::Unavailable(reason),
                other => other,
            })
    }
}
