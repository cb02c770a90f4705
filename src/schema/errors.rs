//! Schema error types
//!
//! Error codes:
//! - FORM_SCHEMA_INVALID_ROOT
//! - FORM_SCHEMA_MISSING_PROPERTIES
//! - FORM_SCHEMA_MISSING_TYPE
//! - FORM_SCHEMA_UNSUPPORTED_TYPE
//! - FORM_SCHEMA_INVALID_ITEMS
//! - FORM_SCHEMA_UNSUPPORTED_ITEMS
//! - FORM_SCHEMA_ITEMS_ENUM_REQUIRED
//! - FORM_SCHEMA_INVALID_PATTERN
//! - FORM_SCHEMA_MALFORMED
//! - FORM_SCHEMA_DUPLICATE
//!
//! A schema error is a configuration problem. It aborts the current walk
//! and is never retried.

use std::fmt;

/// Schema error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Root schema is not `type: object`
    InvalidRoot,
    /// Object schema has no `properties` mapping
    MissingProperties,
    /// Property schema has no `type`
    MissingType,
    /// Property `type` is not one of the supported kinds
    UnsupportedType,
    /// Array `items` is not a single schema object
    InvalidItems,
    /// Array of object or array of array
    UnsupportedItems,
    /// Array items have no `enum`
    ItemsEnumRequired,
    /// `pattern` is not a valid regular expression
    InvalidPattern,
    /// Schema file could not be read or parsed
    Malformed,
    /// A schema with the same name is already registered
    Duplicate,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::InvalidRoot => "FORM_SCHEMA_INVALID_ROOT",
            SchemaErrorCode::MissingProperties => "FORM_SCHEMA_MISSING_PROPERTIES",
            SchemaErrorCode::MissingType => "FORM_SCHEMA_MISSING_TYPE",
            SchemaErrorCode::UnsupportedType => "FORM_SCHEMA_UNSUPPORTED_TYPE",
            SchemaErrorCode::InvalidItems => "FORM_SCHEMA_INVALID_ITEMS",
            SchemaErrorCode::UnsupportedItems => "FORM_SCHEMA_UNSUPPORTED_ITEMS",
            SchemaErrorCode::ItemsEnumRequired => "FORM_SCHEMA_ITEMS_ENUM_REQUIRED",
            SchemaErrorCode::InvalidPattern => "FORM_SCHEMA_INVALID_PATTERN",
            SchemaErrorCode::Malformed => "FORM_SCHEMA_MALFORMED",
            SchemaErrorCode::Duplicate => "FORM_SCHEMA_DUPLICATE",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Malformed or unsupported schema shape
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    /// Flat path of the offending field, if any
    field: Option<String>,
}

impl SchemaError {
    /// Root schema is not an object
    pub fn invalid_root() -> Self {
        Self {
            code: SchemaErrorCode::InvalidRoot,
            message: "Root schema must be of type object".into(),
            field: None,
        }
    }

    /// Object schema lacks `properties`
    pub fn missing_properties(field: Option<&str>) -> Self {
        let message = match field {
            None => "Root schema must have properties".to_string(),
            Some(field) => format!(
                "Unsupported schema type for field \"{}\", object must have properties",
                field
            ),
        };
        Self {
            code: SchemaErrorCode::MissingProperties,
            message,
            field: field.map(str::to_string),
        }
    }

    /// Property schema has no `type`
    pub fn missing_type(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: SchemaErrorCode::MissingType,
            message: format!("Unsupported schema type for field \"{}\", missing type", field),
            field: Some(field),
        }
    }

    /// Property `type` is not supported
    pub fn unsupported_type(field: impl Into<String>, kind: impl AsRef<str>) -> Self {
        let field = field.into();
        Self {
            code: SchemaErrorCode::UnsupportedType,
            message: format!(
                "Unsupported schema type for field \"{}\", got \"{}\"",
                field,
                kind.as_ref()
            ),
            field: Some(field),
        }
    }

    /// Array `items` is not a schema object
    pub fn invalid_items(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: SchemaErrorCode::InvalidItems,
            message: format!(
                "Unsupported schema type for field \"{}\", array items schema is invalid",
                field
            ),
            field: Some(field),
        }
    }

    /// Array of a container kind
    pub fn unsupported_items(field: impl Into<String>, item_kind: &str) -> Self {
        let field = field.into();
        Self {
            code: SchemaErrorCode::UnsupportedItems,
            message: format!(
                "Unsupported schema type for field \"{}\", array of {} is not supported",
                field, item_kind
            ),
            field: Some(field),
        }
    }

    /// Array items lack `enum`
    pub fn items_enum_required(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: SchemaErrorCode::ItemsEnumRequired,
            message: format!(
                "Unsupported schema type for field \"{}\", array items must have enum",
                field
            ),
            field: Some(field),
        }
    }

    /// `pattern` failed to compile
    pub fn invalid_pattern(field: impl Into<String>, reason: impl fmt::Display) -> Self {
        let field = field.into();
        Self {
            code: SchemaErrorCode::InvalidPattern,
            message: format!("Invalid pattern for field \"{}\": {}", field, reason),
            field: Some(field),
        }
    }

    /// Schema file could not be loaded
    pub fn malformed(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::Malformed,
            message: format!("Malformed schema '{}': {}", source.into(), reason.into()),
            field: None,
        }
    }

    /// Schema name already registered
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::Duplicate,
            message: format!("Schema '{}' is already registered", name.into()),
            field: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending field path, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
