//! Observability
//!
//! Structured JSON-lines logging, typed events and counters for the CLI and
//! HTTP layers. The codec core never logs.
//!
//! ```ignore
//! use formcodec::observability::{log_event, Event, MetricsRegistry};
//!
//! log_event(Event::FormRendered, &[("form", "signup")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_forms_rendered();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Logs an event at its own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Only checks that logging does not panic
        log_event(Event::ConfigLoaded, &[("schema_dir", "./schemas")]);
        log_event(Event::Serving, &[]);
    }
}
