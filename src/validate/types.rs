//! Validation result types

use serde::Serialize;
use serde_json::Value;

/// One failed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted instance path; `[i]` marks array elements, empty for the root
    pub path: String,
    /// Schema keyword that failed (`required`, `type`, `enum`, ...)
    pub keyword: &'static str,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, keyword: &'static str, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            keyword,
            message: message.into(),
        }
    }
}

/// Outcome of validating one payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    /// All issues in document order; empty when valid
    pub errors: Vec<ValidationIssue>,
    /// Payload after type coercion
    pub coerced_output: Value,
}

impl ValidationResult {
    pub fn new(coerced_output: Value, errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            coerced_output,
        }
    }

    /// Issues reported for one path
    pub fn errors_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.errors.iter().filter(move |issue| issue.path == path)
    }
}
