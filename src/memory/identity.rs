use crate::error::{AssistantError, StorageError};
use crate::kernel::input::LineSource;
use crate::outputs::console::Console;
use crate::outputs::realizer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name used for the assistant until the user has picked one.
pub const FALLBACK_ASSISTANT_NAME: &str = "Buddy";
/// Name used for the user if they skip the first-run question.
pub const FALLBACK_HUMAN_NAME: &str = "friend";

pub const NAME_PROMPT: &str = "👤 What's your name, friend? ";
pub const ASSISTANT_PROMPT: &str = "🛠️ What would you like to call me? (Give me a cute name!): ";

fn fallback_assistant_name() -> String {
    FALLBACK_ASSISTANT_NAME.to_string()
}

/// The persisted pair of display names.
///
/// On disk this is `{"name": ..., "assistant": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(rename = "name")]
    pub human_name: String,
    #[serde(rename = "assistant", default = "fallback_assistant_name")]
    pub assistant_name: String,
}

impl UserIdentity {
    pub fn new(human_name: impl Into<String>, assistant_name: impl Into<String>) -> Self {
        Self {
            human_name: human_name.into(),
            assistant_name: assistant_name.into(),
        }
    }
}

/// File-backed store for the single identity record.
///
/// The record is read once per process; after [`IdentityStore::resolve`] the
/// cached value is returned without touching the disk again.
#[derive(Debug)]
pub struct IdentityStore {
    path: PathBuf,
    resolved: Option<UserIdentity>,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            resolved: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record. `Ok(None)` when it has never been written.
    pub fn load(&self) -> Result<Option<UserIdentity>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let identity = serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(Some(identity))
    }

    pub fn save(&self, identity: &UserIdentity) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        }
        // serde_json cannot fail on two plain strings.
        let json = serde_json::to_string(identity).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, json).map_err(|e| StorageError::io(&self.path, e))
    }

    /// Assistant display name. Never fails.
    pub fn assistant_name(&self) -> String {
        if let Some(identity) = &self.resolved {
            return identity.assistant_name.clone();
        }
        match self.load() {
            Ok(Some(identity)) => identity.assistant_name,
            Ok(None) => fallback_assistant_name(),
            Err(e) => {
                debug!("Identity unreadable, using fallback name: {}", e);
                fallback_assistant_name()
            }
        }
    }

    /// Returns the stored identity, creating it interactively on first run.
    pub async fn resolve(
        &mut self,
        input: &mut (dyn LineSource + Send),
        console: &mut Console,
    ) -> Result<UserIdentity, AssistantError> {
        if let Some(identity) = &self.resolved {
            return Ok(identity.clone());
        }

        if let Some(identity) = self.load()? {
            info!("Identity loaded from {}", self.path.display());
            self.resolved = Some(identity.clone());
            return Ok(identity);
        }

        info!("No identity at {}, asking the user", self.path.display());
        let human = ask(input, NAME_PROMPT)
            .await?
            .unwrap_or_else(|| FALLBACK_HUMAN_NAME.to_string());
        let assistant = ask(input, ASSISTANT_PROMPT)
            .await?
            .unwrap_or_else(fallback_assistant_name);

        let identity = UserIdentity::new(human, assistant);
        self.save(&identity)?;
        console
            .say(&identity.assistant_name, &realizer::welcome(&identity))
            .await;

        self.resolved = Some(identity.clone());
        Ok(identity)
    }
}

/// One trimmed answer; `None` for a blank line.
async fn ask(
    input: &mut (dyn LineSource + Send),
    prompt: &str,
) -> Result<Option<String>, AssistantError> {
    let line = input
        .read_line(prompt)
        .await?
        .ok_or(AssistantError::InputClosed)?;
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}
