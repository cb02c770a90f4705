//! Form error type

use thiserror::Error;

use crate::payload::PayloadError;
use crate::schema::SchemaError;

/// Failure to validate a submission at all
///
/// A failed check is not an error; it is reported in `ValidationResult`.
#[derive(Debug, Error)]
pub enum FormError {
    /// Schema cannot be used
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Submission is self-contradictory
    #[error("{0}")]
    Payload(#[from] PayloadError),
}

impl FormError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            FormError::Schema(err) => err.code().code(),
            FormError::Payload(err) => err.code(),
        }
    }
}

/// Result type for form processing
pub type FormResult<T> = Result<T, FormError>;
