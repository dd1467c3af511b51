//! Exchange-specific error types
//!
//! Every public operation returns a tagged result: validation failures are
//! raised before any network call, API failures carry the raw exchange
//! response for caller inspection. Nothing is retried or swallowed.

use thiserror::Error;

/// Result type for exchange operations
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Exchange operation errors
#[derive(Error, Debug, Clone)]
pub enum ExchangeError {
    /// Order parameter violated a client-side constraint; raised before any
    /// network call.
    #[error("Parameter validation error: {0}")]
    ParameterValidation(String),

    /// The exchange rejected the request: non-2xx status, a failure `code`,
    /// or `success: false`. Carries the raw response body.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// The response body could not be parsed as JSON. Carries the raw text.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Logic defect, not a recoverable condition.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Signing error: {0}")]
    SigningError(String),
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<url::ParseError> for ExchangeError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<peregrine_core::fixed::FixedError> for ExchangeError {
    fn from(err: peregrine_core::fixed::FixedError) -> Self {
        Self::Internal(format!("fixed-point error: {err}"))
    }
}
