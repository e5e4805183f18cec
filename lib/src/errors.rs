// lib/src/errors.rs

use thiserror::Error;

pub use mediverse_models::ValidationError;

/// Message shown when the SOS request itself could not be delivered.
pub const DISPATCH_FAILED_MESSAGE: &str =
    "Emergency Dispatch Failed. Please call emergency services directly.";

/// Failures of a single HTTP exchange with the MediVerse API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `error` is the server's own
    /// message when the body carried one.
    #[error("HTTP {status}: {}", .error.as_deref().unwrap_or("request failed"))]
    Http { status: u16, error: Option<String> },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The message the server put in the `error` field, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum MediverseError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A user action the server refused, carrying the message to show.
    #[error("{0}")]
    Rejected(String),
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("Local storage error: {0}")]
    Storage(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Add at least one family contact before triggering an emergency")]
    NoFamilyContact,
    #[error("{}", DISPATCH_FAILED_MESSAGE)]
    DispatchFailed(#[source] ApiError),
}

/// A type alias for a `Result` that returns a `MediverseError` on failure.
pub type MediverseResult<T> = Result<T, MediverseError>;
