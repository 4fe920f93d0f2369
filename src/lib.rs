//! Buddy: a small command-line assistant.
//!
//! A line of input is classified into one of a fixed set of commands
//! (`weather`, `wikipedia`, `ai`, `news`, `note`, `show notes`, `whoami`,
//! `help`, `exit`) and handed to a handler that calls at most one provider
//! adapter or the local note log, then prints and speaks the reply.

pub mod config;
pub mod error;
pub mod kernel;
pub mod memory;
pub mod outputs;
pub mod services;

pub use config::AssistantConfig;
pub use error::{AssistantError, ProviderError, StorageError};
pub use kernel::dispatcher::Dispatcher;
pub use kernel::session::{run_assistant, run_session};
