use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout belongs to the conversation; logs go to stderr, quiet unless RUST_LOG says otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = buddy::config::load_config().context("Failed to load configuration")?;
    tracing::info!(
        "Buddy booting (timeout {:?}, retries {})",
        config.request_timeout(),
        config.max_retries
    );

    buddy::run_assistant(config)
        .await
        .context("Assistant stopped")?;
    Ok(())
}
