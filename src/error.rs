//! Caller-facing error types

use thiserror::Error;

/// Errors surfaced to protocol callers
///
/// Conversation data states ("goal not set", "no key points") are never
/// errors; only malformed requests are rejected, before any state is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

impl TrackerError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
