//! Schema-driven type coercion
//!
//! Submitted values are text and their arity comes from repetition. Before
//! any check runs, each declared property is converted toward its schema
//! kind. A value that cannot be converted is left as submitted so the type
//! check reports it. Undeclared properties pass through untouched.

use serde_json::{Map, Number, Value};

use crate::mapper::literal_text;
use crate::schema::{ItemKind, ItemSchema, Items, ObjectSchema, ScalarKind, SchemaKind, SchemaNode};

/// Returns a coerced copy of `value` against an object schema.
pub fn coerce(object: &ObjectSchema, value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(coerce_object(object, map)),
        other => other.clone(),
    }
}

fn coerce_object(object: &ObjectSchema, map: &Map<String, Value>) -> Map<String, Value> {
    let properties = object.properties.as_ref();
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        match properties.and_then(|props| props.get(key)) {
            Some(node) => {
                if let Some(coerced) = coerce_value(node, value) {
                    out.insert(key.clone(), coerced);
                }
            }
            None => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    out
}

/// `None` means the value counts as absent.
fn coerce_value(node: &SchemaNode, value: &Value) -> Option<Value> {
    if node.is_multi_choice() {
        return match value {
            Value::Null => Some(Value::Null),
            Value::Array(elements) => Some(Value::Array(
                elements
                    .iter()
                    .filter_map(|element| coerce_scalar(ScalarKind::String, element))
                    .collect(),
            )),
            single => Some(Value::Array(
                coerce_scalar(ScalarKind::String, single).into_iter().collect(),
            )),
        };
    }

    match &node.kind {
        SchemaKind::String => coerce_scalar(ScalarKind::String, unwrap_single(value)),
        SchemaKind::Number => coerce_scalar(ScalarKind::Number, unwrap_single(value)),
        SchemaKind::Integer => coerce_scalar(ScalarKind::Integer, unwrap_single(value)),
        SchemaKind::Boolean => coerce_scalar(ScalarKind::Boolean, unwrap_single(value)),
        SchemaKind::Array { items } => {
            let elements = match value {
                Value::Null => return Some(Value::Null),
                Value::Array(elements) => elements.iter().collect(),
                single => vec![single],
            };
            Some(Value::Array(
                elements
                    .into_iter()
                    .filter_map(|element| coerce_item(items, element))
                    .collect(),
            ))
        }
        SchemaKind::Object(object) => Some(coerce(object, value)),
    }
}

fn coerce_item(items: &Items, element: &Value) -> Option<Value> {
    match items {
        Items::Schema(ItemSchema {
            kind: ItemKind::Scalar(kind),
            ..
        }) => coerce_scalar(*kind, element),
        // Untyped items take the type of the enum literal they spell
        Items::Schema(ItemSchema {
            enum_values: Some(allowed),
            ..
        }) => Some(
            allowed
                .iter()
                .find(|literal| element.is_string() && literal_text(literal) == literal_text(element))
                .unwrap_or(element)
                .clone(),
        ),
        _ => Some(element.clone()),
    }
}

fn unwrap_single(value: &Value) -> &Value {
    match value {
        Value::Array(elements) if elements.len() == 1 => &elements[0],
        other => other,
    }
}

fn coerce_scalar(kind: ScalarKind, value: &Value) -> Option<Value> {
    match (kind, value) {
        (ScalarKind::String, Value::Number(n)) => Some(Value::String(n.to_string())),
        (ScalarKind::String, Value::Bool(b)) => Some(Value::String(b.to_string())),
        (ScalarKind::Number | ScalarKind::Integer, Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(parse_number(text).unwrap_or_else(|| value.clone()))
        }
        (ScalarKind::Number | ScalarKind::Integer, Value::Bool(b)) => {
            Some(Value::from(i64::from(*b)))
        }
        (ScalarKind::Boolean, Value::String(text)) => match text.as_str() {
            "" => None,
            "true" | "on" | "1" => Some(Value::Bool(true)),
            "false" | "off" | "0" => Some(Value::Bool(false)),
            _ => Some(value.clone()),
        },
        _ => Some(value.clone()),
    }
}

/// Parses numeric text, keeping integral values as integers.
fn parse_number(text: &str) -> Option<Value> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(Value::from(int));
    }
    let float: f64 = text.parse().ok()?;
    if !float.is_finite() {
        return None;
    }
    // 2^53: beyond this an f64 no longer holds every integer
    if float.fract() == 0.0 && float.abs() < 9_007_199_254_740_992.0 {
        return Some(Value::from(float as i64));
    }
    Number::from_f64(float).map(Value::Number)
}
