use thiserror::Error;

use crate::event_log::EventLogError;

/// Error types that can occur when talking to a completion endpoint.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid request parameters or format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Errors returned by the provider (non-2xx responses)
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
    /// Retry attempts exceeded
    #[error("Retry attempts exceeded after {attempts} tries: {last_error}")]
    RetryExceeded { attempts: usize, last_error: String },
}

impl LLMError {
    /// Connection failures and provider-side errors that may pass on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, LLMError::HttpError(_) | LLMError::ProviderError(_))
    }
}

/// Converts reqwest HTTP errors into LLMErrors
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}

/// Fatal errors that end a debate run without a final decision.
///
/// Validation failures never show up here: the turn executor resolves them
/// into accepted or fallback outputs.
#[derive(Debug, Error)]
pub enum DebateError {
    /// The completion client failed; the run cannot continue.
    #[error("completion failed during {role} turn of round {round}: {source}")]
    Completion {
        role: crate::turn::Role,
        round: u32,
        #[source]
        source: LLMError,
    },
    /// An event could not be durably recorded.
    #[error("event log error: {0}")]
    EventLog(#[from] EventLogError),
    /// The typed configuration violates a constraint of the engine.
    #[error("invalid debate configuration: {0}")]
    InvalidConfig(String),
}
