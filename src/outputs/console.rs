use crate::outputs::speech::SpeechOutput;
use std::io::Write;
use tracing::warn;

/// Where the assistant's replies go: a text sink plus a voice.
pub struct Console {
    out: Box<dyn Write + Send>,
    speech: Box<dyn SpeechOutput>,
}

impl Console {
    pub fn new(out: Box<dyn Write + Send>, speech: Box<dyn SpeechOutput>) -> Self {
        Self { out, speech }
    }

    pub fn stdout(speech: Box<dyn SpeechOutput>) -> Self {
        Self::new(Box::new(std::io::stdout()), speech)
    }

    /// Prints `🤖 <assistant>: <msg>` and speaks `msg`.
    pub async fn say(&mut self, assistant: &str, msg: &str) {
        self.write_line(&format!("🤖 {}: {}", assistant, msg));
        self.speech.say(msg).await;
    }

    /// Prints without speaking (listings, dumps).
    pub fn print(&mut self, text: &str) {
        self.write_line(text);
    }

    fn write_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("Failed to write to console: {}", e);
        }
    }
}
