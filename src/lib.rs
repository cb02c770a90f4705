//! formcodec - JSON Schema to flat HTML forms and back
//!
//! - `path`: dotted field paths, the submission keys of nested fields
//! - `schema`: typed schema model and loading
//! - `mapper`: schema to control descriptions
//! - `render`: control descriptions to HTML
//! - `payload`: flat submissions to nested payloads
//! - `validate`: coercion and checking of payloads

pub mod cli;
pub mod http_server;
pub mod mapper;
pub mod observability;
pub mod path;
pub mod payload;
pub mod render;
pub mod schema;
pub mod validate;

pub use mapper::{map_schema, ControlDescription, WidgetKind};
pub use path::FieldPath;
pub use payload::{flatten, normalize, FlatEntry, FlatValue, NormalizedPayload, PayloadError};
pub use render::{render_form, FormAttributes, HtmlRenderer, RenderBackend, RenderContext};
pub use schema::{SchemaError, SchemaResult};
pub use validate::{
    validate_form_data, validate_json, validate_submission, CompiledSchema, ValidationIssue,
    ValidationResult,
};
