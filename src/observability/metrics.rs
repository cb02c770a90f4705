//! Metrics registry
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Atomic, no locks

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters of a form host
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    forms_rendered: AtomicU64,
    submissions_received: AtomicU64,
    /// Submissions whose keys conflict
    submissions_rejected: AtomicU64,
    validations_passed: AtomicU64,
    validations_failed: AtomicU64,
    schema_compilations: AtomicU64,
    cache_hits: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_forms_rendered(&self) {
        self.forms_rendered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_submissions_received(&self) {
        self.submissions_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_submissions_rejected(&self) {
        self.submissions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Records the outcome of one validation
    pub fn record_validation(&self, valid: bool) {
        let counter = if valid {
            &self.validations_passed
        } else {
            &self.validations_failed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one validator cache lookup
    pub fn record_cache_lookup(&self, hit: bool) {
        let counter = if hit {
            &self.cache_hits
        } else {
            &self.schema_compilations
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            forms_rendered: self.forms_rendered.load(Ordering::Relaxed),
            submissions_received: self.submissions_received.load(Ordering::Relaxed),
            submissions_rejected: self.submissions_rejected.load(Ordering::Relaxed),
            validations_passed: self.validations_passed.load(Ordering::Relaxed),
            validations_failed: self.validations_failed.load(Ordering::Relaxed),
            schema_compilations: self.schema_compilations.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or_default()
    }
}

/// Point-in-time copy of all counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub forms_rendered: u64,
    pub submissions_received: u64,
    pub submissions_rejected: u64,
    pub validations_passed: u64,
    pub validations_failed: u64,
    pub schema_compilations: u64,
    pub cache_hits: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_at_zero() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.forms_rendered, 0);
        assert_eq!(snapshot.validations_failed, 0);
    }

    #[test]
    fn test_validation_outcomes() {
        let metrics = MetricsRegistry::new();
        metrics.record_validation(true);
        metrics.record_validation(false);
        metrics.record_validation(false);
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.validations_passed, 1);
        assert_eq!(snapshot.validations_failed, 2);
    }

    #[test]
    fn test_cache_lookups() {
        let metrics = MetricsRegistry::new();
        metrics.record_cache_lookup(false);
        metrics.record_cache_lookup(true);
        metrics.record_cache_lookup(true);
        let json = metrics.to_json();
        assert_eq!(json["schema_compilations"], 1);
        assert_eq!(json["cache_hits"], 2);
    }

    #[test]
    fn test_concurrent_increments() {
        let metrics = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.increment_submissions_received();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(metrics.snapshot().submissions_received, 800);
    }
}
