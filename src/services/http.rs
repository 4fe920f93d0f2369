use reqwest::Client;
use std::time::Duration;
use tracing::warn;

const USER_AGENT: &str = concat!("buddy/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client. `None` leaves requests without a deadline.
pub fn build_client(timeout: Option<Duration>) -> Client {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|e| {
        warn!("HTTP client setup failed ({}), using defaults", e);
        Client::new()
    })
}
