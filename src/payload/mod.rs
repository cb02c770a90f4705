//! Submission aggregator
//!
//! Inverse of the control naming scheme: turns an ordered multi-map of flat
//! keys into a nested payload. Schema-agnostic; works from key shape only.

mod aggregator;
mod errors;
mod types;

pub use aggregator::{flatten, normalize};
pub use errors::{PayloadError, PayloadResult};
pub use types::{FileHandle, FlatEntry, FlatValue, NormalizedPayload, PayloadNode};
