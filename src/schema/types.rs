//! Schema type definitions
//!
//! Supported property kinds:
//! - string: text, optionally constrained by enum/format/length/pattern
//! - number: floating point, optional minimum/maximum
//! - integer: whole number, optional minimum/maximum
//! - boolean: checkbox
//! - array: multi-choice over a leaf item schema with enum
//! - object: nested properties (rendered as a fieldset)

use indexmap::IndexMap;
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};

/// Closed set of property kinds
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    /// Array with its item schema
    Array {
        items: Items,
    },
    /// Nested object
    Object(ObjectSchema),
}

impl SchemaKind {
    /// Returns the JSON Schema type name
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Array { .. } => "array",
            SchemaKind::Object(_) => "object",
        }
    }
}

/// Leaf kinds an array item may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Number,
    Integer,
    Boolean,
}

impl ScalarKind {
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ScalarKind::String),
            "number" => Some(ScalarKind::Number),
            "integer" => Some(ScalarKind::Integer),
            "boolean" => Some(ScalarKind::Boolean),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Number => "number",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
        }
    }
}

/// Declared type of an array item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// Leaf type
    Scalar(ScalarKind),
    /// No `type`; enum literals decide
    Untyped,
    /// Container or unknown type name
    Unsupported(String),
}

/// Item schema of an array property
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSchema {
    pub kind: ItemKind,
    pub enum_values: Option<Vec<Value>>,
}

/// `items` of an array property as written in the schema
#[derive(Debug, Clone, PartialEq)]
pub enum Items {
    /// A single schema object
    Schema(ItemSchema),
    /// Missing, a tuple list, or a boolean schema
    Invalid,
}

impl Items {
    /// Returns the item enum, enforcing the array rules.
    ///
    /// # Errors
    ///
    /// - items not a single schema object
    /// - items of a container (or unknown) kind
    /// - items without `enum`
    pub fn enum_values(&self, field: &str) -> SchemaResult<&[Value]> {
        let item = match self {
            Items::Schema(item) => item,
            Items::Invalid => return Err(SchemaError::invalid_items(field)),
        };

        if let ItemKind::Unsupported(kind) = &item.kind {
            return Err(SchemaError::unsupported_items(field, kind));
        }

        item.enum_values
            .as_deref()
            .ok_or_else(|| SchemaError::items_enum_required(field))
    }

    /// Returns the leaf kind of the items, if declared
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Items::Schema(ItemSchema {
                kind: ItemKind::Scalar(kind),
                ..
            }) => Some(*kind),
            _ => None,
        }
    }
}

/// String formats that select a dedicated input variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringFormat {
    Uri,
    Email,
    DateTimeLocal,
    TimeLocal,
    /// Any other format; no effect on widget or validation
    Other(String),
}

impl StringFormat {
    pub fn parse(format: &str) -> Self {
        match format {
            "uri" => StringFormat::Uri,
            "email" => StringFormat::Email,
            "date-time-local" => StringFormat::DateTimeLocal,
            "time-local" => StringFormat::TimeLocal,
            other => StringFormat::Other(other.to_string()),
        }
    }
}

/// Kind-specific constraints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    pub format: Option<StringFormat>,
}

/// Preferred widget named by `uiWidget`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetHint {
    Select,
    Radio,
    Checkbox,
    Textarea,
    Range,
    Number,
    File,
    Input,
    Other(String),
}

impl WidgetHint {
    pub fn parse(widget: &str) -> Self {
        match widget {
            "select" => WidgetHint::Select,
            "radio" => WidgetHint::Radio,
            "checkbox" => WidgetHint::Checkbox,
            "textarea" => WidgetHint::Textarea,
            "range" => WidgetHint::Range,
            "number" => WidgetHint::Number,
            "file" => WidgetHint::File,
            "input" => WidgetHint::Input,
            other => WidgetHint::Other(other.to_string()),
        }
    }
}

/// UI metadata carried as schema vendor extensions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiHint {
    /// `uiWidget`
    pub widget: Option<WidgetHint>,
    /// `uiName`: display label override
    pub name: Option<String>,
    /// `uiMultiple` (or `multiple`)
    pub multiple: bool,
}

impl UiHint {
    pub fn prefers(&self, hint: &WidgetHint) -> bool {
        self.widget.as_ref() == Some(hint)
    }
}

/// One typed property description
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub enum_values: Option<Vec<Value>>,
    pub constraints: Constraints,
    pub default: Option<Value>,
    pub description: Option<String>,
    pub ui: UiHint,
}

impl SchemaNode {
    /// Creates a node of the given kind with no metadata
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            enum_values: None,
            constraints: Constraints::default(),
            default: None,
            description: None,
            ui: UiHint::default(),
        }
    }

    /// Display label: `uiName` or the property key
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.ui.name.as_deref().unwrap_or(key)
    }

    /// String enum rendered as a multi-select; submits a list of choices
    pub fn is_multi_choice(&self) -> bool {
        matches!(self.kind, SchemaKind::String) && self.ui.multiple && self.enum_values.is_some()
    }
}

/// Object schema: ordered properties plus the required key set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    /// `None` when the schema declares no `properties`
    pub properties: Option<IndexMap<String, SchemaNode>>,
    pub required: Vec<String>,
}

impl ObjectSchema {
    pub fn new(properties: IndexMap<String, SchemaNode>, required: Vec<String>) -> Self {
        Self {
            properties: Some(properties),
            required,
        }
    }

    /// Returns the properties, failing when the schema declares none.
    ///
    /// `field` is the flat path of this object, `None` for the root.
    pub fn properties(&self, field: Option<&str>) -> SchemaResult<&IndexMap<String, SchemaNode>> {
        self.properties
            .as_ref()
            .ok_or_else(|| SchemaError::missing_properties(field))
    }

    pub fn is_required(&self, key: &str) -> bool {
        self.required.iter().any(|k| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn enum_items(kind: ItemKind, values: Option<Vec<Value>>) -> Items {
        Items::Schema(ItemSchema {
            kind,
            enum_values: values,
        })
    }

    #[test]
    fn test_kind_type_names() {
        assert_eq!(SchemaKind::String.type_name(), "string");
        assert_eq!(SchemaKind::Integer.type_name(), "integer");
        assert_eq!(
            SchemaKind::Array {
                items: Items::Invalid
            }
            .type_name(),
            "array"
        );
        assert_eq!(
            SchemaKind::Object(ObjectSchema::default()).type_name(),
            "object"
        );
    }

    #[test]
    fn test_items_enum_values() {
        let items = enum_items(
            ItemKind::Scalar(ScalarKind::String),
            Some(vec![json!("red"), json!("green")]),
        );
        assert_eq!(items.enum_values("colors").unwrap().len(), 2);
        assert_eq!(items.scalar_kind(), Some(ScalarKind::String));
    }

    #[test]
    fn test_items_rules() {
        let err = Items::Invalid.enum_values("tags").unwrap_err();
        assert!(err.message().contains("array items schema is invalid"));

        let err = enum_items(ItemKind::Unsupported("object".into()), None)
            .enum_values("tags")
            .unwrap_err();
        assert!(err.message().contains("array of object is not supported"));

        let err = enum_items(ItemKind::Scalar(ScalarKind::String), None)
            .enum_values("tags")
            .unwrap_err();
        assert!(err.message().contains("array items must have enum"));
    }

    #[test]
    fn test_untyped_items_with_enum_are_accepted() {
        let items = enum_items(ItemKind::Untyped, Some(vec![json!(1), json!(2)]));
        assert!(items.enum_values("n").is_ok());
        assert_eq!(items.scalar_kind(), None);
    }

    #[test]
    fn test_widget_hint_parse() {
        assert_eq!(WidgetHint::parse("select"), WidgetHint::Select);
        assert_eq!(WidgetHint::parse("textarea"), WidgetHint::Textarea);
        assert_eq!(
            WidgetHint::parse("color"),
            WidgetHint::Other("color".into())
        );
    }

    #[test]
    fn test_string_format_parse() {
        assert_eq!(StringFormat::parse("uri"), StringFormat::Uri);
        assert_eq!(StringFormat::parse("time-local"), StringFormat::TimeLocal);
        assert_eq!(
            StringFormat::parse("date"),
            StringFormat::Other("date".into())
        );
    }

    #[test]
    fn test_label_prefers_ui_name() {
        let mut node = SchemaNode::new(SchemaKind::String);
        assert_eq!(node.label("bio"), "bio");
        node.ui.name = Some("Biography".into());
        assert_eq!(node.label("bio"), "Biography");
    }

    #[test]
    fn test_object_properties_required() {
        let object = ObjectSchema::default();
        assert!(object.properties(None).is_err());

        let mut props = IndexMap::new();
        props.insert("a".to_string(), SchemaNode::new(SchemaKind::String));
        let object = ObjectSchema::new(props, vec!["a".into()]);
        assert!(object.properties(None).is_ok());
        assert!(object.is_required("a"));
        assert!(!object.is_required("b"));
    }
}
