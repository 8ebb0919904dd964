//! Error handling for the console core.
//!
//! Three classes of failure surface to users: an invalid or drifted session
//! (handled by navigating away), a transport failure against the remote
//! authority (handled by leaving cached state untouched and posting an
//! error alert), and an internal logic error (handled by aborting the
//! operation without mutating state). None of them are fatal to the
//! running console.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Main error type for the console core.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// The session failed validation or drifted from its bootstrapped
    /// identity. The caller is expected to navigate away, never retry.
    #[error("session is not valid")]
    SessionInvalid,

    /// The remote authority was unreachable or answered with a
    /// non-success status.
    #[error("transport error: {0}")]
    Transport(String),

    /// Internal invariant violation, e.g. an unknown view reaching the
    /// dispatcher.
    #[error("logic error: {0}")]
    Logic(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl ConsoleError {
    pub fn transport(message: impl Into<String>) -> Self {
        ConsoleError::Transport(message.into())
    }

    pub fn logic(message: impl Into<String>) -> Self {
        ConsoleError::Logic(message.into())
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        ConsoleError::Transport(err.to_string())
    }
}
