//! Templated replies.
//!
//! PURE FUNCTIONS: outcome in, sentence out. Handlers decide *what happened*,
//! this module decides *what to say about it*.

use crate::error::{ProviderError, StorageError};
use crate::memory::identity::UserIdentity;
use crate::services::WeatherReport;

pub fn welcome(identity: &UserIdentity) -> String {
    format!(
        "Hello {}! It's nice to meet you. I'm {}, your little helper! 💫",
        identity.human_name, identity.assistant_name
    )
}

pub fn greeting(identity: &UserIdentity) -> String {
    format!(
        "Hey {}, great to see you again! What can I do for you today? 😊",
        identity.human_name
    )
}

pub fn whoami(identity: &UserIdentity) -> String {
    format!("You’re my buddy, {} 💖", identity.human_name)
}

pub fn farewell() -> &'static str {
    "Aww, you're leaving? Okay, talk to you soon! 👋"
}

pub fn unknown_command() -> &'static str {
    "Hmm, I didn’t get that. Try saying 'help' to see what I can do!"
}

/// `paris` -> `Paris`, `NEW YORK` -> `New york`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn weather(city: &str, outcome: &Result<WeatherReport, ProviderError>) -> String {
    match outcome {
        Ok(report) => format!(
            "{} is {}, {}°C. Don’t forget your jacket if you're heading out! 🧥",
            capitalize(city),
            report.description,
            report.temperature_celsius
        ),
        Err(ProviderError::NotFound(_)) => {
            "Hmm... I couldn’t find that city. Want to try another one?".to_string()
        }
        Err(ProviderError::Unavailable(reason)) => format!(
            "I can't check the weather yet: {}. Set BUDDY_WEATHER_API_KEY and try again.",
            reason
        ),
        Err(ProviderError::Transient(_)) => {
            "Oops! I had trouble checking the weather. Maybe try again in a bit?".to_string()
        }
    }
}

pub fn encyclopedia(outcome: &Result<String, ProviderError>) -> String {
    match outcome {
        Ok(summary) => summary.clone(),
        Err(ProviderError::NotFound(_)) | Err(ProviderError::Unavailable(_)) => {
            "I looked around, but couldn’t find much on that. Got another topic?".to_string()
        }
        Err(ProviderError::Transient(_)) => {
            "I couldn’t reach Wikipedia just now. Try again in a moment?".to_string()
        }
    }
}

pub fn ai_needs_question() -> &'static str {
    "Ask me something after 'ai', like 'ai why is the sky blue'."
}

pub fn ai(outcome: &Result<String, ProviderError>) -> String {
    match outcome {
        Ok(answer) => answer.clone(),
        Err(_) => {
            "Uh-oh! I couldn’t connect to Gemini. Make sure BUDDY_AI_API_KEY is set and valid!"
                .to_string()
        }
    }
}

pub fn news_intro() -> &'static str {
    "Here are some top tech stories today:"
}

pub fn headline(title: &str) -> String {
    format!("📰 {}", title)
}

pub fn news_failed() -> &'static str {
    "Couldn’t fetch the news right now. Internet gremlins maybe? 🐛"
}

pub fn note_saved() -> &'static str {
    "Got it! I saved your note. 📝"
}

pub fn note_empty() -> &'static str {
    "There's nothing to write down. Try 'note <text>'."
}

pub fn storage_failed(action: &str, err: &StorageError) -> String {
    format!(
        "I couldn't {} ({}). Check that {} is writable and try again.",
        action,
        err,
        err.path().display()
    )
}

pub fn notes_header() -> &'static str {
    "Here are your notes:"
}

pub fn notes_missing() -> &'static str {
    "Hmm... no notes yet. You can start one with 'note <text>'"
}
