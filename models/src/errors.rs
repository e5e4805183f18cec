// models/src/errors.rs

pub use thiserror::Error;

/// A validation error raised on client-side input before anything is sent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A field required for the given role was left empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },
    /// A field was present but malformed.
    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    /// A role string other than `patient` or `doctor`.
    #[error("unknown role '{0}', expected 'patient' or 'doctor'")]
    UnknownRole(String),
    /// A coordinate outside the valid latitude/longitude ranges.
    #[error("coordinate ({lat}, {lng}) is out of range")]
    CoordinateOutOfRange { lat: f64, lng: f64 },
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        ValidationError::MissingField { field }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField { field, reason: reason.into() }
    }
}

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Returns `MissingField` when `value` is empty after trimming.
pub(crate) fn require(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::missing(field))
    } else {
        Ok(())
    }
}
