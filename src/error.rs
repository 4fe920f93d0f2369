use std::path::PathBuf;
use thiserror::Error;

/// Failure of a provider adapter call.
///
/// Handlers turn every variant into a user-facing message; none of them ever
/// reaches the dispatch loop as a fault.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    /// The provider answered but had nothing for the argument. User-correctable.
    #[error("nothing found for '{0}'")]
    NotFound(String),
    /// Network, HTTP status or decoding error. Worth trying again later.
    #[error("transient provider failure: {0}")]
    Transient(String),
    /// A credential or the service itself is not usable in this setup.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Transient(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Transient(e.to_string())
    }
}

/// Local persistence failure (identity record or note log).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a valid identity record: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io { path: path.into(), source }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            StorageError::Io { path, .. } | StorageError::Corrupt { path, .. } => path,
        }
    }
}

/// Errors that stop a session before or during the loop.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),
    #[error("input closed before setup finished")]
    InputClosed,
}
