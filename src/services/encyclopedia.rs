use crate::error::ProviderError;
use crate::services::retry::{with_retry, RetryPolicy};
use crate::services::EncyclopediaProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const SUMMARY_SENTENCES: usize = 2;

/// Wikipedia intro extracts via the MediaWiki action API.
///
/// The server cuts the extract to [`SUMMARY_SENTENCES`], so abbreviations
/// like "Dr." are handled by its sentence splitter, not ours.
#[derive(Clone)]
pub struct WikipediaSummary {
    client: Client,
    policy: RetryPolicy,
}

impl WikipediaSummary {
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    async fn fetch(&self, topic: &str) -> Result<String, ProviderError> {
        debug!("Encyclopedia lookup for '{}'", topic);
        let sentences = SUMMARY_SENTENCES.to_string();
        let response = self
            .client
            .get(WIKIPEDIA_API_URL)
            .query(&summary_query(topic, &sentences))
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ProviderError::Transient(format!("wikipedia returned {}", status)));
        }
        let body: Value = response.json().await?;
        parse_summary(topic, &body)
    }
}

#[async_trait]
impl EncyclopediaProvider for WikipediaSummary {
    async fn summarize(&self, topic: &str) -> Result<String, ProviderError> {
        if topic.is_empty() {
            return Err(ProviderError::NotFound(String::new()));
        }
        with_retry(self.policy, "encyclopedia lookup", || self.fetch(topic)).await
    }
}

/// Query string for a plain-text intro of `topic`, following redirects.
pub fn summary_query<'a>(topic: &'a str, sentences: &'a str) -> [(&'static str, &'a str); 9] {
    [
        ("action", "query"),
        ("format", "json"),
        ("formatversion", "2"),
        ("prop", "extracts|pageprops"),
        ("ppprop", "disambiguation"),
        ("explaintext", "1"),
        ("redirects", "1"),
        ("exsentences", sentences),
        ("titles", topic),
    ]
}

/// Reads the first page of a `formatversion=2` query response.
///
/// Missing pages and disambiguation pages count as nothing found.
pub fn parse_summary(topic: &str, body: &Value) -> Result<String, ProviderError> {
    let not_found = || ProviderError::NotFound(topic.to_string());
    let page = body["query"]["pages"].get(0).ok_or_else(not_found)?;

    if page.get("missing").is_some() || page.get("invalid").is_some() {
        return Err(not_found());
    }
    if page["pageprops"].get("disambiguation").is_some() {
        return Err(not_found());
    }

    page.get("extract")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(not_found)
}
