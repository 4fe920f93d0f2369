use crate::error::StorageError;
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One line of the note log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub timestamp: String,
    pub text: String,
}

impl NoteEntry {
    pub fn new(at: DateTime<Local>, text: impl Into<String>) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            text: text.into(),
        }
    }

    pub fn to_line(&self) -> String {
        format!("{}: {}", self.timestamp, self.text)
    }

    /// Splits `<timestamp>: <text>`. The timestamp itself contains colons but never ": ".
    pub fn parse_line(line: &str) -> Option<Self> {
        let (timestamp, text) = line.split_once(": ")?;
        Some(Self {
            timestamp: timestamp.to_string(),
            text: text.to_string(),
        })
    }
}

/// Result of dumping the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteDump {
    /// No log file has been created yet.
    Missing,
    /// Raw log text, insertion order.
    Contents(String),
}

/// Append-only note log backed by a plain text file.
#[derive(Debug, Clone)]
pub struct NoteLog {
    path: PathBuf,
}

impl NoteLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `text` stamped with the current local time.
    pub fn append(&self, text: &str) -> Result<NoteEntry, StorageError> {
        self.append_at(Local::now(), text)
    }

    pub fn append_at(&self, at: DateTime<Local>, text: &str) -> Result<NoteEntry, StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        }
        let entry = NoteEntry::new(at, text);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::io(&self.path, e))?;
        writeln!(file, "{}", entry.to_line()).map_err(|e| StorageError::io(&self.path, e))?;
        debug!("Note appended to {}", self.path.display());
        Ok(entry)
    }

    pub fn dump_all(&self) -> Result<NoteDump, StorageError> {
        if !self.path.exists() {
            return Ok(NoteDump::Missing);
        }
        fs::read_to_string(&self.path)
            .map(NoteDump::Contents)
            .map_err(|e| StorageError::io(&self.path, e))
    }

    /// Parsed entries in insertion order. Lines that do not look like entries are skipped.
    pub fn entries(&self) -> Result<Vec<NoteEntry>, StorageError> {
        match self.dump_all()? {
            NoteDump::Missing => Ok(Vec::new()),
            NoteDump::Contents(text) => {
                Ok(text.lines().filter_map(NoteEntry::parse_line).collect())
            }
        }
    }
}
