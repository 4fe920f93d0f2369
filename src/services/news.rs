use crate::error::ProviderError;
use crate::services::retry::{with_retry, RetryPolicy};
use crate::services::NewsProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const HN_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";
pub const UNTITLED: &str = "No title";

/// Hacker News top stories: one call for the id list, one per item.
#[derive(Clone)]
pub struct HackerNews {
    client: Client,
    policy: RetryPolicy,
}

#[derive(Debug, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub title: Option<String>,
}

impl Item {
    pub fn headline(&self) -> String {
        self.title.clone().unwrap_or_else(|| UNTITLED.to_string())
    }
}

impl HackerNews {
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    async fn fetch_ids(&self) -> Result<Vec<u64>, ProviderError> {
        let ids: Vec<u64> = self
            .client
            .get(format!("{}/topstories.json", HN_BASE_URL))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(ids)
    }

    async fn fetch_item(&self, id: u64) -> Result<Item, ProviderError> {
        // The API answers `null` for deleted items.
        let item: Option<Item> = self
            .client
            .get(format!("{}/item/{}.json", HN_BASE_URL, id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(item.unwrap_or(Item { title: None }))
    }

    async fn fetch(&self, n: usize) -> Result<Vec<String>, ProviderError> {
        let ids = self.fetch_ids().await?;
        debug!("Hacker News returned {} ids, taking {}", ids.len(), n);
        let mut headlines = Vec::with_capacity(n);
        for id in ids.into_iter().take(n) {
            headlines.push(self.fetch_item(id).await?.headline());
        }
        Ok(headlines)
    }
}

#[async_trait]
impl NewsProvider for HackerNews {
    async fn top_stories(&self, n: usize) -> Result<Vec<String>, ProviderError> {
        with_retry(self.policy, "news fetch", || self.fetch(n)).await
    }
}
