//! Best-effort text-to-speech.
//!
//! Speech is a side channel: every failure is logged and dropped here.

use crate::config::SpeechMode;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

#[async_trait]
pub trait SpeechOutput: Send + Sync {
    /// Speaks `text`. Must not fail or panic.
    async fn say(&self, text: &str);
}

/// Prints only.
#[derive(Debug, Default, Clone, Copy)]
pub struct MuteSpeech;

#[async_trait]
impl SpeechOutput for MuteSpeech {
    async fn say(&self, _text: &str) {}
}

/// Platform voice: `say` on macOS, PowerShell `System.Speech` on Windows, `espeak` elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpeech;

impl SystemSpeech {
    fn command(text: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("say");
            cmd.arg(text);
            cmd
        } else if cfg!(target_os = "windows") {
            // Single quotes are the only thing that can break out of a PowerShell literal.
            let literal = text.replace('\'', "''");
            let mut cmd = Command::new("powershell");
            cmd.arg("-Command").arg(format!(
                "Add-Type -AssemblyName System.Speech; \
                 $synth = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
                 $synth.Speak('{}')",
                literal
            ));
            cmd
        } else {
            let mut cmd = Command::new("espeak");
            cmd.arg(text);
            cmd
        }
    }
}

#[async_trait]
impl SpeechOutput for SystemSpeech {
    async fn say(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        match Self::command(text).kill_on_drop(true).output().await {
            Ok(out) if !out.status.success() => {
                debug!("Speech exited with {}", out.status);
            }
            Ok(_) => {}
            Err(e) => debug!("Speech unavailable: {}", e),
        }
    }
}

pub fn from_mode(mode: SpeechMode) -> Box<dyn SpeechOutput> {
    match mode {
        SpeechMode::System => Box::new(SystemSpeech),
        SpeechMode::Mute => Box::new(MuteSpeech),
    }
}
