use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory (under the storage root) holding the identity record and config file.
pub const CONFIG_DIR_NAME: &str = ".Assistant-cli";
/// Directory (under the storage root) holding the note log.
pub const LAB_DIR_NAME: &str = "Assistant-lab";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_NEWS_COUNT: usize = 5;
const DEFAULT_AI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechMode {
    /// Platform voice synthesis (`say`, PowerShell, `espeak`).
    System,
    /// Print only.
    Mute,
}

/// Runtime configuration injected at process start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub weather_api_key: Option<String>,
    pub ai_api_key: Option<String>,
    pub ai_model: String,
    pub storage_root: PathBuf,
    pub speech: SpeechMode,
    /// Per-request provider timeout. `0` means wait forever.
    pub request_timeout_secs: u64,
    /// Extra attempts after a transient provider failure.
    pub max_retries: u32,
    pub news_count: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            ai_api_key: None,
            ai_model: DEFAULT_AI_MODEL.to_string(),
            storage_root: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            speech: SpeechMode::System,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: 0,
            news_count: DEFAULT_NEWS_COUNT,
        }
    }
}

impl AssistantConfig {
    /// Builds the config for a given storage root with every other option at its default.
    pub fn with_storage_root(root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: root.into(),
            ..Self::default()
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.storage_root.join(CONFIG_DIR_NAME)
    }

    pub fn lab_dir(&self) -> PathBuf {
        self.storage_root.join(LAB_DIR_NAME)
    }

    pub fn identity_path(&self) -> PathBuf {
        self.config_dir().join("user.json")
    }

    pub fn notes_path(&self) -> PathBuf {
        self.lab_dir().join("notes.txt")
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Loads configuration from the process environment.
///
/// Order: defaults, then `<storage_root>/.Assistant-cli/config.toml`, then
/// `BUDDY_*` environment variables.
pub fn load_config() -> Result<AssistantConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    load_config_from(&env)
}

/// Same as [`load_config`] with an explicit environment map.
pub fn load_config_from(env: &HashMap<String, String>) -> Result<AssistantConfig> {
    let root = env
        .get("BUDDY_STORAGE_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|| AssistantConfig::default().storage_root);

    let file = root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
    let mut config = if file.exists() {
        read_config_file(&file)?
    } else {
        AssistantConfig::default()
    };
    // The file cannot move the root it was found under.
    config.storage_root = root;

    apply_env(&mut config, env)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<AssistantConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn apply_env(config: &mut AssistantConfig, env: &HashMap<String, String>) -> Result<()> {
    let lookup = |keys: &[&str]| {
        keys.iter()
            .filter_map(|k| env.get(*k))
            .find(|v| !v.trim().is_empty())
            .map(|v| v.trim().to_string())
    };

    if let Some(key) = lookup(&["BUDDY_WEATHER_API_KEY", "OPENWEATHER_API_KEY"]) {
        config.weather_api_key = Some(key);
    }
    if let Some(key) = lookup(&["BUDDY_AI_API_KEY", "GEMINI_API_KEY"]) {
        config.ai_api_key = Some(key);
    }
    if let Some(model) = lookup(&["BUDDY_AI_MODEL"]) {
        config.ai_model = model;
    }
    if let Some(mode) = lookup(&["BUDDY_SPEECH"]) {
        config.speech = match mode.to_lowercase().as_str() {
            "system" => SpeechMode::System,
            "mute" | "off" => SpeechMode::Mute,
            other => anyhow::bail!("BUDDY_SPEECH must be 'system' or 'mute', got '{}'", other),
        };
    }
    if let Some(secs) = lookup(&["BUDDY_REQUEST_TIMEOUT_SECS"]) {
        config.request_timeout_secs = secs
            .parse()
            .with_context(|| format!("BUDDY_REQUEST_TIMEOUT_SECS is not a number: {}", secs))?;
    }
    if let Some(retries) = lookup(&["BUDDY_MAX_RETRIES"]) {
        config.max_retries = retries
            .parse()
            .with_context(|| format!("BUDDY_MAX_RETRIES is not a number: {}", retries))?;
    }

    // Blank values in the file mean "not configured".
    config.weather_api_key = config.weather_api_key.take().filter(|k| !k.trim().is_empty());
    config.ai_api_key = config.ai_api_key.take().filter(|k| !k.trim().is_empty());
    Ok(())
}
