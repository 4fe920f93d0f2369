#![allow(dead_code)]

use async_trait::async_trait;
use buddy::memory::identity::UserIdentity;
use buddy::memory::notes::NoteLog;
use buddy::outputs::console::Console;
use buddy::outputs::speech::MuteSpeech;
use buddy::services::{
    EncyclopediaProvider, GenerativeAiProvider, NewsProvider, Providers, WeatherProvider,
    WeatherReport,
};
use buddy::{Dispatcher, ProviderError};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Console sink the test can read back.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.contents().matches(needle).count()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub fn console(out: &SharedBuffer) -> Console {
    Console::new(Box::new(out.clone()), Box::new(MuteSpeech))
}

/// Records every argument it was called with and answers with a canned result.
#[derive(Clone)]
pub struct Stub<T> {
    pub answer: Result<T, ProviderError>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl<T: Clone> Stub<T> {
    pub fn new(answer: Result<T, ProviderError>) -> Self {
        Self {
            answer,
            calls: Arc::default(),
        }
    }

    fn record(&self, arg: &str) -> Result<T, ProviderError> {
        self.calls.lock().unwrap().push(arg.to_string());
        self.answer.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for Stub<WeatherReport> {
    async fn lookup(&self, city: &str) -> Result<WeatherReport, ProviderError> {
        self.record(city)
    }
}

#[async_trait]
impl EncyclopediaProvider for Stub<String> {
    async fn summarize(&self, topic: &str) -> Result<String, ProviderError> {
        self.record(topic)
    }
}

#[async_trait]
impl GenerativeAiProvider for Stub<String> {
    async fn ask(&self, prompt: &str) -> Result<String, ProviderError> {
        self.record(prompt)
    }
}

#[async_trait]
impl NewsProvider for Stub<Vec<String>> {
    async fn top_stories(&self, n: usize) -> Result<Vec<String>, ProviderError> {
        self.record(&n.to_string())
    }
}

pub struct Stubs {
    pub weather: Stub<WeatherReport>,
    pub encyclopedia: Stub<String>,
    pub ai: Stub<String>,
    pub news: Stub<Vec<String>>,
}

impl Default for Stubs {
    fn default() -> Self {
        Self {
            weather: Stub::new(Ok(WeatherReport {
                temperature_celsius: 18.0,
                description: "clear sky".to_string(),
            })),
            encyclopedia: Stub::new(Ok("Rust is a language. It is fast.".to_string())),
            ai: Stub::new(Ok("42".to_string())),
            news: Stub::new(Ok(vec!["First".to_string(), "Second".to_string()])),
        }
    }
}

impl Stubs {
    pub fn providers(&self) -> Providers {
        Providers {
            weather: Box::new(self.weather.clone()),
            encyclopedia: Box::new(self.encyclopedia.clone()),
            ai: Box::new(self.ai.clone()),
            news: Box::new(self.news.clone()),
        }
    }
}

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub out: SharedBuffer,
    pub notes: NoteLog,
    pub dir: TempDir,
}

pub fn identity() -> UserIdentity {
    UserIdentity::new("Ada", "Pip")
}

pub fn harness(stubs: &Stubs) -> Harness {
    let dir = TempDir::new().unwrap();
    let notes = NoteLog::new(dir.path().join("Assistant-lab").join("notes.txt"));
    harness_with_notes(stubs, notes, dir)
}

pub fn harness_with_notes(stubs: &Stubs, notes: NoteLog, dir: TempDir) -> Harness {
    let out = SharedBuffer::default();
    let dispatcher = Dispatcher::new(identity(), stubs.providers(), notes.clone(), console(&out));
    Harness {
        dispatcher,
        out,
        notes,
        dir,
    }
}
