//! Schema model for formcodec
//!
//! Schemas are the JSON Schema subset a form can represent: an object root
//! with ordered properties of kind string, number, integer, boolean,
//! array (of enum leaves) or object.
//!
//! # Design Principles
//!
//! - Property order is declaration order, never alphabetical
//! - A malformed schema fails loudly and immediately
//! - The typed model is immutable once parsed

mod errors;
mod loader;
mod parser;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::{SchemaDocument, SchemaLoader};
pub use parser::{parse_node, parse_root};
pub use types::{
    Constraints, ItemKind, ItemSchema, Items, ObjectSchema, ScalarKind, SchemaKind, SchemaNode,
    StringFormat, UiHint, WidgetHint,
};
