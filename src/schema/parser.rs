//! JSON Schema parser
//!
//! Turns a JSON-Schema-shaped `serde_json::Value` into the typed model.
//! Parsing fails on the first property without a usable `type`; shape rules
//! that depend on how a node is consumed (object properties, array items)
//! are checked by the consumer.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::path::FieldPath;

use super::errors::{SchemaError, SchemaResult};
use super::types::{
    Constraints, ItemKind, ItemSchema, Items, ObjectSchema, ScalarKind, SchemaKind, SchemaNode,
    StringFormat, UiHint, WidgetHint,
};

/// Parses a root schema, which must be `type: object`.
pub fn parse_root(schema: &Value) -> SchemaResult<ObjectSchema> {
    let map = schema.as_object().ok_or_else(SchemaError::invalid_root)?;
    if map.get("type").and_then(Value::as_str) != Some("object") {
        return Err(SchemaError::invalid_root());
    }
    parse_object(map, None)
}

/// Parses the properties and required set of an object schema.
fn parse_object(map: &Map<String, Value>, parent: Option<&FieldPath>) -> SchemaResult<ObjectSchema> {
    let properties = match map.get("properties").and_then(Value::as_object) {
        Some(props) => {
            let mut parsed = IndexMap::with_capacity(props.len());
            for (key, value) in props {
                let path = FieldPath::under(parent, key.as_str());
                parsed.insert(key.clone(), parse_node(value, &path)?);
            }
            Some(parsed)
        }
        None => None,
    };

    let required = map
        .get("required")
        .and_then(Value::as_array)
        .map(|keys| {
            keys.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(ObjectSchema {
        properties,
        required,
    })
}

/// Parses one property schema at `path`.
pub fn parse_node(value: &Value, path: &FieldPath) -> SchemaResult<SchemaNode> {
    // Boolean schemas (`true`/`false`) carry no type
    let map = value
        .as_object()
        .ok_or_else(|| SchemaError::missing_type(path.encode()))?;

    let kind = match map.get("type") {
        None | Some(Value::Null) => return Err(SchemaError::missing_type(path.encode())),
        Some(Value::String(name)) => match name.as_str() {
            "string" => SchemaKind::String,
            "number" => SchemaKind::Number,
            "integer" => SchemaKind::Integer,
            "boolean" => SchemaKind::Boolean,
            "array" => SchemaKind::Array {
                items: parse_items(map.get("items")),
            },
            "object" => SchemaKind::Object(parse_object(map, Some(path))?),
            other => return Err(SchemaError::unsupported_type(path.encode(), other)),
        },
        Some(other) => return Err(SchemaError::unsupported_type(path.encode(), other.to_string())),
    };

    Ok(SchemaNode {
        kind,
        enum_values: map.get("enum").and_then(Value::as_array).cloned(),
        constraints: parse_constraints(map),
        default: map.get("default").filter(|v| !v.is_null()).cloned(),
        description: map
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        ui: parse_ui_hint(map),
    })
}

fn parse_items(items: Option<&Value>) -> Items {
    let map = match items {
        Some(Value::Object(map)) => map,
        _ => return Items::Invalid,
    };

    let kind = match map.get("type") {
        None | Some(Value::Null) => ItemKind::Untyped,
        Some(Value::String(name)) => match ScalarKind::from_type_name(name) {
            Some(scalar) => ItemKind::Scalar(scalar),
            None => ItemKind::Unsupported(name.clone()),
        },
        Some(other) => ItemKind::Unsupported(other.to_string()),
    };

    Items::Schema(ItemSchema {
        kind,
        enum_values: map.get("enum").and_then(Value::as_array).cloned(),
    })
}

fn parse_constraints(map: &Map<String, Value>) -> Constraints {
    Constraints {
        minimum: map.get("minimum").and_then(Value::as_f64),
        maximum: map.get("maximum").and_then(Value::as_f64),
        min_length: map.get("minLength").and_then(Value::as_u64),
        max_length: map.get("maxLength").and_then(Value::as_u64),
        pattern: map.get("pattern").and_then(Value::as_str).map(str::to_string),
        format: map.get("format").and_then(Value::as_str).map(StringFormat::parse),
    }
}

fn parse_ui_hint(map: &Map<String, Value>) -> UiHint {
    let multiple = map
        .get("uiMultiple")
        .or_else(|| map.get("multiple"))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    UiHint {
        widget: map.get("uiWidget").and_then(Value::as_str).map(WidgetHint::parse),
        name: map.get("uiName").and_then(Value::as_str).map(str::to_string),
        multiple,
    }
}
