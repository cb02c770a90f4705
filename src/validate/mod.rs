//! Validation adapter
//!
//! Coerces a normalized payload toward its schema and checks it. Schema
//! problems fail compilation; payload problems are reported as issues in a
//! `ValidationResult`, never as errors.

mod cache;
mod coerce;
mod compiled;
mod errors;
mod types;

pub use cache::{CacheLookup, ValidatorCache};
pub use coerce::coerce;
pub use compiled::CompiledSchema;
pub use errors::{FormError, FormResult};
pub use types::{ValidationIssue, ValidationResult};

use serde_json::Value;

use crate::payload::{normalize, FlatEntry, NormalizedPayload, PayloadResult};
use crate::schema::SchemaResult;

/// Compiles `schema` and validates `value` against it.
pub fn validate_json(schema: &Value, value: &Value) -> SchemaResult<ValidationResult> {
    Ok(CompiledSchema::compile(schema)?.validate(value))
}

/// Validates an already aggregated payload.
pub fn validate_payload(schema: &CompiledSchema, payload: &NormalizedPayload) -> ValidationResult {
    schema.validate(&payload.to_json())
}

/// Aggregates a flat submission and validates it.
///
/// # Errors
///
/// Returns `PayloadError` when the submission keys conflict; the submission
/// is rejected without validation.
pub fn validate_form_data<I, E>(schema: &CompiledSchema, entries: I) -> PayloadResult<ValidationResult>
where
    I: IntoIterator<Item = E>,
    E: Into<FlatEntry>,
{
    let payload = normalize(entries)?;
    Ok(validate_payload(schema, &payload))
}

/// Compiles `schema`, then aggregates and validates a flat submission.
pub fn validate_submission<I, E>(schema: &Value, entries: I) -> FormResult<ValidationResult>
where
    I: IntoIterator<Item = E>,
    E: Into<FlatEntry>,
{
    let compiled = CompiledSchema::compile(schema)?;
    Ok(validate_form_data(&compiled, entries)?)
}
