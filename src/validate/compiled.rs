//! Compiled schema validator
//!
//! Validation semantics:
//! - Payload is coerced toward the schema before any check
//! - Declared properties are checked in declaration order
//! - Required keys must be present after coercion, declared or not
//! - Type, enum, bounds, length and pattern are checked per property
//! - Enum membership compares numbers by value, so `2` matches `2.0`
//! - Undeclared properties are allowed
//! - Every issue is reported, not only the first
//!
//! Compilation does all the work that can fail on the schema itself, so
//! `validate` never fails; a mismatch is an issue in the result.

use std::collections::HashMap;

use regex::Regex;
use serde_json::{Map, Value};

use crate::path::FieldPath;
use crate::schema::{
    parse_root, ItemKind, Items, ObjectSchema, ScalarKind, SchemaError, SchemaKind, SchemaNode,
    SchemaResult, WidgetHint,
};

use super::coerce::coerce;
use super::types::{ValidationIssue, ValidationResult};

/// Schema compiled once and validated against many times.
///
/// Immutable after compilation; share it behind an `Arc`.
#[derive(Debug)]
pub struct CompiledSchema {
    root: ObjectSchema,
    /// Compiled `pattern` per field path; keyed by segments since a
    /// property key may itself contain the separator
    patterns: HashMap<FieldPath, Regex>,
}

impl CompiledSchema {
    /// Compiles a JSON Schema document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` for the same shapes the control mapper rejects,
    /// and for a `pattern` that is not a valid regular expression.
    pub fn compile(schema: &Value) -> SchemaResult<Self> {
        let root = parse_root(schema)?;
        let mut patterns = HashMap::new();
        compile_object(&root, None, &mut patterns)?;
        Ok(Self { root, patterns })
    }

    pub fn root(&self) -> &ObjectSchema {
        &self.root
    }

    /// Coerces and checks a payload.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        let output = coerce(&self.root, value);
        let mut issues = Vec::new();
        match &output {
            Value::Object(map) => self.check_object(&self.root, map, None, &mut issues),
            _ => issues.push(ValidationIssue::new("", "type", "must be object")),
        }
        ValidationResult::new(output, issues)
    }

    fn check_object(
        &self,
        object: &ObjectSchema,
        map: &Map<String, Value>,
        parent: Option<&FieldPath>,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let properties = object.properties.as_ref();

        for (key, node) in properties.into_iter().flatten() {
            let path = FieldPath::under(parent, key.as_str());
            match map.get(key) {
                Some(value) => self.check_value(node, value, &path, issues),
                None if object.is_required(key) => issues.push(required_issue(&path)),
                None => {}
            }
        }

        // Required keys without a property entry are checked against the payload only
        for key in &object.required {
            let declared = properties.is_some_and(|props| props.contains_key(key));
            if !declared && !map.contains_key(key) {
                issues.push(required_issue(&FieldPath::under(parent, key.as_str())));
            }
        }
    }

    fn check_value(
        &self,
        node: &SchemaNode,
        value: &Value,
        path: &FieldPath,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let at = path.encode();

        // Uploads arrive as file handle objects in place of text
        if is_file_field(node) && value.is_object() {
            return;
        }

        if node.is_multi_choice() {
            let (Value::Array(choices), Some(allowed)) = (value, &node.enum_values) else {
                issues.push(type_issue(at, "array"));
                return;
            };
            check_choices(ScalarKind::String, allowed, choices, &at, issues);
            return;
        }

        if !matches_kind(&node.kind, value) {
            issues.push(type_issue(at, node.kind.type_name()));
            return;
        }

        if let Some(allowed) = &node.enum_values {
            if !enum_contains(allowed, value) {
                issues.push(enum_issue(at.clone()));
            }
        }

        let constraints = &node.constraints;
        match value {
            Value::Number(number) => {
                let Some(number) = number.as_f64() else {
                    return;
                };
                if let Some(minimum) = constraints.minimum {
                    if number < minimum {
                        issues.push(ValidationIssue::new(
                            at.clone(),
                            "minimum",
                            format!("must be >= {}", minimum),
                        ));
                    }
                }
                if let Some(maximum) = constraints.maximum {
                    if number > maximum {
                        issues.push(ValidationIssue::new(
                            at,
                            "maximum",
                            format!("must be <= {}", maximum),
                        ));
                    }
                }
            }
            Value::String(text) => {
                let length = text.chars().count() as u64;
                if let Some(min_length) = constraints.min_length {
                    if length < min_length {
                        issues.push(ValidationIssue::new(
                            at.clone(),
                            "minLength",
                            format!("must NOT have fewer than {} characters", min_length),
                        ));
                    }
                }
                if let Some(max_length) = constraints.max_length {
                    if length > max_length {
                        issues.push(ValidationIssue::new(
                            at.clone(),
                            "maxLength",
                            format!("must NOT have more than {} characters", max_length),
                        ));
                    }
                }
                if let Some(regex) = self.patterns.get(path) {
                    if !regex.is_match(text) {
                        issues.push(ValidationIssue::new(
                            at,
                            "pattern",
                            format!("must match pattern \"{}\"", regex.as_str()),
                        ));
                    }
                }
            }
            Value::Array(elements) => {
                if let SchemaKind::Array { items } = &node.kind {
                    check_items(items, elements, &at, issues);
                }
            }
            Value::Object(map) => {
                if let SchemaKind::Object(object) = &node.kind {
                    self.check_object(object, map, Some(path), issues);
                }
            }
            _ => {}
        }
    }
}

fn compile_object(
    object: &ObjectSchema,
    parent: Option<&FieldPath>,
    patterns: &mut HashMap<FieldPath, Regex>,
) -> SchemaResult<()> {
    let field = parent.map(FieldPath::encode);
    let properties = object.properties(field.as_deref())?;

    for (key, node) in properties {
        let path = FieldPath::under(parent, key.as_str());
        match &node.kind {
            SchemaKind::Array { items } => {
                items.enum_values(&path.encode())?;
            }
            SchemaKind::Object(child) => compile_object(child, Some(&path), patterns)?,
            _ => {}
        }

        if let Some(pattern) = &node.constraints.pattern {
            let regex = Regex::new(pattern)
                .map_err(|err| SchemaError::invalid_pattern(path.encode(), err))?;
            patterns.insert(path, regex);
        }
    }

    Ok(())
}

fn check_items(items: &Items, elements: &[Value], at: &str, issues: &mut Vec<ValidationIssue>) {
    let Items::Schema(item) = items else {
        return;
    };

    for (index, element) in elements.iter().enumerate() {
        let element_at = format!("{}[{}]", at, index);
        if let ItemKind::Scalar(kind) = item.kind {
            if !matches_scalar(kind, element) {
                issues.push(type_issue(element_at, kind.type_name()));
                continue;
            }
        }
        if let Some(allowed) = &item.enum_values {
            if !enum_contains(allowed, element) {
                issues.push(enum_issue(element_at));
            }
        }
    }
}

/// Checks each selection of a multi-choice string field.
fn check_choices(
    kind: ScalarKind,
    allowed: &[Value],
    choices: &[Value],
    at: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    for (index, choice) in choices.iter().enumerate() {
        let choice_at = format!("{}[{}]", at, index);
        if !matches_scalar(kind, choice) {
            issues.push(type_issue(choice_at, kind.type_name()));
        } else if !enum_contains(allowed, choice) {
            issues.push(enum_issue(choice_at));
        }
    }
}

/// Enum membership with numbers compared by value.
fn enum_contains(allowed: &[Value], value: &Value) -> bool {
    allowed.iter().any(|literal| match (literal, value) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        _ => literal == value,
    })
}

fn is_file_field(node: &SchemaNode) -> bool {
    matches!(node.kind, SchemaKind::String) && node.ui.prefers(&WidgetHint::File)
}

fn matches_kind(kind: &SchemaKind, value: &Value) -> bool {
    match kind {
        SchemaKind::String => matches_scalar(ScalarKind::String, value),
        SchemaKind::Number => matches_scalar(ScalarKind::Number, value),
        SchemaKind::Integer => matches_scalar(ScalarKind::Integer, value),
        SchemaKind::Boolean => matches_scalar(ScalarKind::Boolean, value),
        SchemaKind::Array { .. } => value.is_array(),
        SchemaKind::Object(_) => value.is_object(),
    }
}

fn matches_scalar(kind: ScalarKind, value: &Value) -> bool {
    match kind {
        ScalarKind::String => value.is_string(),
        ScalarKind::Number => value.is_number(),
        // 42.0 counts as an integer
        ScalarKind::Integer => {
            value.is_i64() || value.is_u64() || value.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        ScalarKind::Boolean => value.is_boolean(),
    }
}

fn type_issue(at: String, expected: &str) -> ValidationIssue {
    ValidationIssue::new(at, "type", format!("must be {}", expected))
}

fn required_issue(path: &FieldPath) -> ValidationIssue {
    ValidationIssue::new(
        path.encode(),
        "required",
        format!("must have required property '{}'", path.key()),
    )
}

fn enum_issue(at: String) -> ValidationIssue {
    ValidationIssue::new(at, "enum", "must be equal to one of the allowed values")
}
