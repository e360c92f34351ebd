//! LLM client error types

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while requesting a completion
#[derive(Error, Debug)]
pub enum LlmError {
    /// The endpoint answered with a non-success status
    #[error("completion endpoint error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network/HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion did not finish within the caller's budget
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with something that is not a completion
    #[error("invalid response from model endpoint: {0}")]
    InvalidResponse(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl LlmError {
    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

pub type LlmResult<T> = Result<T, LlmError>;
