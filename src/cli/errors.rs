//! CLI error types
//!
//! Every CLI error ends the command with a non-zero exit status after an
//! error envelope has been written.

use std::fmt;
use std::io;

use crate::payload::PayloadError;
use crate::schema::SchemaError;
use crate::validate::FormError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file missing or invalid
    ConfigError,
    /// stdin/stdout failure or unparseable JSON
    IoError,
    /// Input is JSON but not the expected shape
    InvalidInput,
    /// Schema cannot be used
    InvalidSchema,
    /// Submission keys conflict
    InvalidSubmission,
    /// HTTP server could not start or stopped with an error
    ServeFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FORM_CLI_CONFIG_ERROR",
            Self::IoError => "FORM_CLI_IO_ERROR",
            Self::InvalidInput => "FORM_CLI_INVALID_INPUT",
            Self::InvalidSchema => "FORM_CLI_INVALID_SCHEMA",
            Self::InvalidSubmission => "FORM_CLI_INVALID_SUBMISSION",
            Self::ServeFailed => "FORM_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::new(
            CliErrorCode::InvalidSchema,
            format!("{} ({})", e.message(), e.code()),
        )
    }
}

impl From<PayloadError> for CliError {
    fn from(e: PayloadError) -> Self {
        Self::new(
            CliErrorCode::InvalidSubmission,
            format!("{} ({})", e, e.code()),
        )
    }
}

impl From<FormError> for CliError {
    fn from(e: FormError) -> Self {
        match e {
            FormError::Schema(e) => e.into(),
            FormError::Payload(e) => e.into(),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
