use crate::config::AssistantConfig;
use crate::error::AssistantError;
use crate::kernel::dispatcher::Dispatcher;
use crate::kernel::input::{LineSource, StdinSource};
use crate::memory::identity::IdentityStore;
use crate::memory::notes::NoteLog;
use crate::outputs::console::Console;
use crate::outputs::speech;
use crate::services::Providers;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Interactive session on the real terminal with the real providers.
pub async fn run_assistant(config: AssistantConfig) -> Result<(), AssistantError> {
    let console = Console::stdout(speech::from_mode(config.speech));
    let providers = Providers::from_config(&config);
    let mut input = StdinSource::new();
    run_session(&config, providers, console, &mut input).await
}

/// Resolves the identity, greets, then runs the dispatch loop to completion.
pub async fn run_session(
    config: &AssistantConfig,
    providers: Providers,
    mut console: Console,
    input: &mut (dyn LineSource + Send),
) -> Result<(), AssistantError> {
    let span = info_span!("session", id = %Uuid::new_v4());
    async move {
        info!("Session starting, storage root {}", config.storage_root.display());

        let mut identities = IdentityStore::new(config.identity_path());
        let identity = identities.resolve(input, &mut console).await?;

        let notes = NoteLog::new(config.notes_path());
        let mut dispatcher =
            Dispatcher::new(identity, providers, notes, console).with_news_count(config.news_count);
        dispatcher.greet().await;
        dispatcher.run(input).await?;

        info!("Session finished");
        Ok(())
    }
    .instrument(span)
    .await
}
