use crate::config::DEFAULT_NEWS_COUNT;
use crate::error::AssistantError;
use crate::kernel::command::{classify, Command, CommandKind};
use crate::kernel::input::{LineSource, USER_PROMPT};
use crate::memory::identity::UserIdentity;
use crate::memory::notes::{NoteDump, NoteLog};
use crate::outputs::console::Console;
use crate::outputs::help::help_text;
use crate::outputs::realizer;
use crate::services::Providers;
use tracing::{debug, info, warn};

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The control loop: one line in, one handler out.
///
/// Commands are handled strictly one at a time. A handler always finishes,
/// including its provider call, before the next line is read, and no handler
/// outcome other than an exit word ends the loop.
pub struct Dispatcher {
    identity: UserIdentity,
    providers: Providers,
    notes: NoteLog,
    console: Console,
    news_count: usize,
}

impl Dispatcher {
    pub fn new(
        identity: UserIdentity,
        providers: Providers,
        notes: NoteLog,
        console: Console,
    ) -> Self {
        Self {
            identity,
            providers,
            notes,
            console,
            news_count: DEFAULT_NEWS_COUNT,
        }
    }

    pub fn with_news_count(mut self, news_count: usize) -> Self {
        self.news_count = news_count;
        self
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub async fn greet(&mut self) {
        let msg = realizer::greeting(&self.identity);
        self.say(&msg).await;
    }

    /// Reads and handles lines until an exit word or end of input.
    pub async fn run(&mut self, input: &mut (dyn LineSource + Send)) -> Result<(), AssistantError> {
        loop {
            let Some(line) = input.read_line(USER_PROMPT).await? else {
                info!("Input closed, leaving the loop");
                return Ok(());
            };
            if self.handle_line(&line).await == Flow::Exit {
                info!("Exit requested");
                return Ok(());
            }
        }
    }

    pub async fn handle_line(&mut self, line: &str) -> Flow {
        let command = classify(line);
        debug!("Classified as {:?}", command.kind);
        self.handle(&command).await
    }

    pub async fn handle(&mut self, command: &Command) -> Flow {
        let arg = command.argument.as_str();
        match command.kind {
            CommandKind::Weather => self.weather(arg).await,
            CommandKind::Wikipedia => self.wikipedia(arg).await,
            CommandKind::Ai => self.ai(arg).await,
            CommandKind::News => self.news().await,
            CommandKind::Note => self.note(arg).await,
            CommandKind::ShowNotes => self.show_notes().await,
            CommandKind::WhoAmI => {
                let msg = realizer::whoami(&self.identity);
                self.say(&msg).await;
            }
            CommandKind::Help => {
                let text = help_text(&self.identity.assistant_name);
                self.console.print(&text);
            }
            CommandKind::Exit => {
                self.say(realizer::farewell()).await;
                return Flow::Exit;
            }
            CommandKind::Unknown => self.say(realizer::unknown_command()).await,
        }
        Flow::Continue
    }

    async fn say(&mut self, msg: &str) {
        self.console.say(&self.identity.assistant_name, msg).await;
    }

    async fn weather(&mut self, city: &str) {
        let outcome = self.providers.weather.lookup(city).await;
        if let Err(e) = &outcome {
            warn!("Weather lookup failed: {}", e);
        }
        let msg = realizer::weather(city, &outcome);
        self.say(&msg).await;
    }

    async fn wikipedia(&mut self, topic: &str) {
        let outcome = self.providers.encyclopedia.summarize(topic).await;
        if let Err(e) = &outcome {
            warn!("Encyclopedia lookup failed: {}", e);
        }
        let msg = realizer::encyclopedia(&outcome);
        self.say(&msg).await;
    }

    async fn ai(&mut self, prompt: &str) {
        if prompt.is_empty() {
            self.say(realizer::ai_needs_question()).await;
            return;
        }
        let outcome = self.providers.ai.ask(prompt).await;
        if let Err(e) = &outcome {
            warn!("AI request failed: {}", e);
        }
        let msg = realizer::ai(&outcome);
        self.say(&msg).await;
    }

    async fn news(&mut self) {
        match self.providers.news.top_stories(self.news_count).await {
            Ok(headlines) => {
                self.say(realizer::news_intro()).await;
                for title in &headlines {
                    self.console.print(&realizer::headline(title));
                }
            }
            Err(e) => {
                warn!("News fetch failed: {}", e);
                self.say(realizer::news_failed()).await;
            }
        }
    }

    async fn note(&mut self, text: &str) {
        if text.is_empty() {
            self.say(realizer::note_empty()).await;
            return;
        }
        let msg = match self.notes.append(text) {
            Ok(_) => realizer::note_saved().to_string(),
            Err(e) => {
                warn!("Note not saved: {}", e);
                realizer::storage_failed("save your note", &e)
            }
        };
        self.say(&msg).await;
    }

    async fn show_notes(&mut self) {
        match self.notes.dump_all() {
            Ok(NoteDump::Contents(text)) => {
                self.say(realizer::notes_header()).await;
                self.console.print(&text);
            }
            Ok(NoteDump::Missing) => self.say(realizer::notes_missing()).await,
            Err(e) => {
                warn!("Notes unreadable: {}", e);
                let msg = realizer::storage_failed("read your notes", &e);
                self.say(&msg).await;
            }
        }
    }
}
