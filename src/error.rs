//! Error types for rowmine

use thiserror::Error;

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while preparing or submitting rows
#[derive(Debug, Error)]
pub enum Error {
    /// A configured source field is missing from the input schema.
    ///
    /// Raised by `prepare` before any row is processed; aborts the run.
    #[error("field `{0}` not found in the input schema")]
    FieldNotFound(String),

    /// The configured project key does not exist on the tracker
    #[error("project `{0}` not found on the tracker")]
    ProjectNotFound(String),

    /// The tracker rejected a request (non-2xx response)
    #[error("tracker API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the tracker
        status: u16,
        /// Error detail, folded from the tracker's error body when present
        message: String,
    },

    /// Transport-level HTTP failure (connect, timeout, decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No usable API key, or the tracker rejected the key
    #[error("authentication error: {0}")]
    Auth(String),

    /// The service URL could not be parsed
    #[error("invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A session method was called in the wrong lifecycle state
    #[error("invalid session state: expected {expected}, was {actual}")]
    InvalidState {
        /// State the operation requires
        expected: &'static str,
        /// State the session was actually in
        actual: &'static str,
    },

    /// The row feed produced a malformed record
    #[error("row feed error: {0}")]
    Feed(#[from] csv::Error),

    /// Filesystem error while opening the row feed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable numeric classification for host-side error accounting.
    ///
    /// Codes are part of the reporting contract and must not be renumbered.
    pub const fn classification(&self) -> i32 {
        match self {
            Self::FieldNotFound(_) => 1,
            Self::ProjectNotFound(_) => 2,
            Self::Api { .. } => 3,
            Self::Http(_) => 4,
            Self::Auth(_) => 5,
            Self::InvalidUrl(_) => 6,
            Self::InvalidState { .. } => 7,
            Self::Feed(_) => 8,
            Self::Io(_) => 9,
        }
    }

    /// Whether a retry could plausibly succeed.
    ///
    /// Transient: network/timeout failures and HTTP 429/5xx. Everything else
    /// (auth, validation, not-found) is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
