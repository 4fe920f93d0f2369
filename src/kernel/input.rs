use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

pub const USER_PROMPT: &str = "👤 You: ";

/// A source of user lines. `Ok(None)` means the input is closed.
#[async_trait]
pub trait LineSource: Send {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>>;
}

/// Lines from any buffered reader.
///
/// Bytes are decoded lossily, so a badly encoded line reaches the dispatcher
/// as text instead of ending the session.
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin + Send> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> LineSource for ReaderSource<R> {
    async fn read_line(&mut self, _prompt: &str) -> std::io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
            return Ok(None);
        }
        Ok(Some(decode_line(&self.buf)))
    }
}

/// Drops the line terminator and replaces invalid UTF-8 with U+FFFD.
pub fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Interactive terminal input.
pub struct StdinSource {
    inner: ReaderSource<BufReader<Stdin>>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            inner: ReaderSource::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineSource for StdinSource {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;
        self.inner.read_line(prompt).await
    }
}

/// Pre-recorded lines, for scripted sessions and tests.
#[derive(Debug, Default, Clone)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Every prompt shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[async_trait]
impl LineSource for ScriptedLines {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
