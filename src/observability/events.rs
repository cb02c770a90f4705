//! Observable events
//!
//! Events are explicit and typed; the string form is the `event` key of a
//! log line.

use std::fmt;

use super::logger::Severity;

/// Observable events of the CLI and HTTP layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Startup
    ConfigLoaded,
    SchemasLoaded,
    SchemaCompiled,
    ServerStart,
    Serving,
    ServerFailed,

    // Forms
    FormRendered,
    FormNotFound,

    // Submissions
    SubmissionReceived,
    /// Submission keys conflict
    SubmissionRejected,
    ValidationPassed,
    ValidationFailed,

    // CLI
    CommandFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::SchemaCompiled => "SCHEMA_COMPILED",
            Event::ServerStart => "SERVER_START",
            Event::Serving => "SERVING",
            Event::ServerFailed => "SERVER_FAILED",
            Event::FormRendered => "FORM_RENDERED",
            Event::FormNotFound => "FORM_NOT_FOUND",
            Event::SubmissionReceived => "SUBMISSION_RECEIVED",
            Event::SubmissionRejected => "SUBMISSION_REJECTED",
            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ServerFailed | Event::CommandFailed => Severity::Error,
            Event::SubmissionRejected | Event::FormNotFound => Severity::Warn,
            Event::SubmissionReceived | Event::SchemaCompiled => Severity::Debug,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::SubmissionRejected.as_str(), "SUBMISSION_REJECTED");
        assert_eq!(Event::Serving.to_string(), "SERVING");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::CommandFailed.severity(), Severity::Error);
        assert_eq!(Event::SubmissionRejected.severity(), Severity::Warn);
        assert_eq!(Event::ValidationFailed.severity(), Severity::Info);
    }
}
