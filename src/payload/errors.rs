//! Payload error types

use thiserror::Error;

/// Result type for payload reconstruction
pub type PayloadResult<T> = Result<T, PayloadError>;

/// Self-contradictory flat submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// One key uses a path as a leaf while another nests below it
    #[error("Conflicting field \"{key}\": \"{prefix}\" is both a value and a group")]
    PathConflict { key: String, prefix: String },
}

impl PayloadError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            PayloadError::PathConflict { .. } => "FORM_PAYLOAD_PATH_CONFLICT",
        }
    }
}
