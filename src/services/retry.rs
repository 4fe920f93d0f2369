use crate::config::AssistantConfig;
use crate::error::ProviderError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

const RETRY_DELAY: Duration = Duration::from_millis(500);

/// How many extra attempts a transient failure earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const NONE: RetryPolicy = RetryPolicy {
        max_retries: 0,
        delay: RETRY_DELAY,
    };

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: RETRY_DELAY,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::NONE
    }
}

/// Runs `op`, repeating it only after [`ProviderError::Transient`].
pub async fn with_retry<T, F, Fut>(
    policy: RetryPolicy,
    label: &str,
    mut op: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(e) if e.is_transient() && attempt < policy.max_retries => {
                attempt += 1;
                warn!("{} failed ({}), retry {}/{}", label, e, attempt, policy.max_retries);
                tokio::time::sleep(policy.delay).await;
            }
            result => return result,
        }
    }
}
