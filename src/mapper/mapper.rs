//! Schema to control mapping
//!
//! One control per property, in declaration order. Nested objects become
//! fieldsets whose children use the object's path as their prefix. Any
//! schema problem aborts the whole walk; no partial output is returned.

use serde_json::Value;

use crate::path::FieldPath;
use crate::schema::{
    parse_root, ObjectSchema, SchemaKind, SchemaNode, SchemaResult, StringFormat, WidgetHint,
};

use super::control::{literal_text, ControlDescription, ControlOption, Step, WidgetKind};

/// Maps a JSON Schema document to its controls.
///
/// # Errors
///
/// Returns `SchemaError` if the root is not an object with properties, a
/// property has no usable type, or an array property violates the item rules.
pub fn map_schema(schema: &Value) -> SchemaResult<Vec<ControlDescription>> {
    let root = parse_root(schema)?;
    map_object(&root, None)
}

/// Maps the properties of an object schema.
///
/// `parent` is the path of the object itself, `None` for the root.
pub fn map_object(
    object: &ObjectSchema,
    parent: Option<&FieldPath>,
) -> SchemaResult<Vec<ControlDescription>> {
    let field = parent.map(FieldPath::encode);
    let properties = object.properties(field.as_deref())?;

    properties
        .iter()
        .map(|(key, node)| {
            let path = FieldPath::under(parent, key.as_str());
            map_property(key, node, path, object.is_required(key))
        })
        .collect()
}

fn map_property(
    key: &str,
    node: &SchemaNode,
    path: FieldPath,
    required: bool,
) -> SchemaResult<ControlDescription> {
    let label = node.label(key).to_string();

    let mut control = match &node.kind {
        SchemaKind::String => map_string(node, path, label, required),
        SchemaKind::Number | SchemaKind::Integer => map_number(node, path, label, required),
        SchemaKind::Boolean => {
            let mut control = ControlDescription::new(path, label, WidgetKind::Checkbox, required);
            control.checked = node.default.as_ref().and_then(Value::as_bool);
            control
        }
        SchemaKind::Array { items } => {
            let values = items.enum_values(&path.encode())?;
            let widget = choice_widget(node, true);
            let mut control = ControlDescription::new(path, label, widget, required);
            control.options = options(values, node.default.as_ref());
            control
        }
        SchemaKind::Object(object) => {
            let children = map_object(object, Some(&path))?;
            let mut control = ControlDescription::new(path, label, WidgetKind::Fieldset, required);
            control.children = children;
            control
        }
    };

    control.description = node.description.clone();
    Ok(control)
}

fn map_string(
    node: &SchemaNode,
    path: FieldPath,
    label: String,
    required: bool,
) -> ControlDescription {
    let constraints = &node.constraints;

    if let Some(values) = &node.enum_values {
        let widget = choice_widget(node, node.ui.multiple);
        let mut control = ControlDescription::new(path, label, widget, required);
        control.options = options(values, node.default.as_ref());
        return control;
    }

    // Format wins over uiWidget
    let widget = match &constraints.format {
        Some(StringFormat::Uri) => WidgetKind::Url,
        Some(StringFormat::Email) => WidgetKind::Email,
        Some(StringFormat::DateTimeLocal) => WidgetKind::DateTimeLocal,
        Some(StringFormat::TimeLocal) => WidgetKind::Time,
        Some(StringFormat::Other(_)) | None => {
            if node.ui.prefers(&WidgetHint::Textarea) {
                WidgetKind::Textarea
            } else if node.ui.prefers(&WidgetHint::File) {
                WidgetKind::File
            } else {
                WidgetKind::Text
            }
        }
    };

    let mut control = ControlDescription::new(path, label, widget, required);
    if widget != WidgetKind::File {
        control.default_value = node.default.as_ref().map(literal_text);
        control.constraints.min_length = constraints.min_length;
        control.constraints.max_length = constraints.max_length;
    }
    if widget == WidgetKind::Text {
        control.constraints.pattern = constraints.pattern.clone();
    }
    control
}

fn map_number(
    node: &SchemaNode,
    path: FieldPath,
    label: String,
    required: bool,
) -> ControlDescription {
    let widget = if node.ui.prefers(&WidgetHint::Range) {
        WidgetKind::Range
    } else {
        WidgetKind::Number
    };

    let mut control = ControlDescription::new(path, label, widget, required);
    control.default_value = node.default.as_ref().map(literal_text);
    control.constraints.min = node.constraints.minimum;
    control.constraints.max = node.constraints.maximum;
    control.constraints.step = Some(match node.kind {
        SchemaKind::Integer => Step::One,
        _ => Step::Any,
    });
    control
}

/// Choice widget for an enum: `select` hint picks the select variant,
/// anything else the radio/checkbox variant.
fn choice_widget(node: &SchemaNode, multiple: bool) -> WidgetKind {
    let select = node.ui.prefers(&WidgetHint::Select);
    match (multiple, select) {
        (false, true) => WidgetKind::Select,
        (false, false) => WidgetKind::RadioGroup,
        (true, true) => WidgetKind::SelectMultiple,
        (true, false) => WidgetKind::CheckboxGroup,
    }
}

/// Options in enum order, selected when equal to the default or contained
/// in an array default.
fn options(values: &[Value], default: Option<&Value>) -> Vec<ControlOption> {
    values
        .iter()
        .map(|value| ControlOption {
            value: literal_text(value),
            selected: match default {
                Some(Value::Array(defaults)) => defaults.contains(value),
                Some(default) => default == value,
                None => false,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaErrorCode;
    use serde_json::json;

    fn single(property: Value) -> ControlDescription {
        let schema = json!({ "type": "object", "properties": { "field": property } });
        let mut controls = map_schema(&schema).unwrap();
        assert_eq!(controls.len(), 1);
        controls.remove(0)
    }

    fn option_values(control: &ControlDescription) -> Vec<&str> {
        control.options.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn test_root_must_be_object() {
        let err = map_schema(&json!({ "type": "array" })).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::InvalidRoot);
    }

    #[test]
    fn test_root_must_have_properties() {
        let err = map_schema(&json!({ "type": "object" })).unwrap_err();
        assert_eq!(err.message(), "Root schema must have properties");
    }

    #[test]
    fn test_nested_object_without_properties() {
        let schema = json!({
            "type": "object",
            "properties": { "meta": { "type": "object" } }
        });
        let err = map_schema(&schema).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MissingProperties);
        assert_eq!(err.field(), Some("meta"));
    }

    #[test]
    fn test_required_from_parent_set() {
        let schema = json!({
            "type": "object",
            "required": ["a"],
            "properties": {
                "a": { "type": "string" },
                "b": { "type": "string" }
            }
        });
        let controls = map_schema(&schema).unwrap();
        assert!(controls[0].required);
        assert!(!controls[1].required);
    }

    #[test]
    fn test_string_enum_defaults_to_radio() {
        let control = single(json!({ "type": "string", "enum": ["GET", "POST"], "default": "POST" }));
        assert_eq!(control.widget, WidgetKind::RadioGroup);
        assert_eq!(option_values(&control), vec!["GET", "POST"]);
        assert!(!control.options[0].selected);
        assert!(control.options[1].selected);
    }

    #[test]
    fn test_string_enum_select_hint() {
        let control = single(json!({ "type": "string", "enum": ["a", "b"], "uiWidget": "select" }));
        assert_eq!(control.widget, WidgetKind::Select);
    }

    #[test]
    fn test_string_enum_multiple() {
        let control = single(json!({ "type": "string", "enum": ["a", "b"], "uiMultiple": true }));
        assert_eq!(control.widget, WidgetKind::CheckboxGroup);

        let control = single(json!({
            "type": "string",
            "enum": ["a", "b"],
            "uiWidget": "select",
            "multiple": true
        }));
        assert_eq!(control.widget, WidgetKind::SelectMultiple);
    }

    #[test]
    fn test_format_variants() {
        let cases = [
            ("uri", WidgetKind::Url),
            ("email", WidgetKind::Email),
            ("date-time-local", WidgetKind::DateTimeLocal),
            ("time-local", WidgetKind::Time),
        ];
        for (format, widget) in cases {
            let control = single(json!({ "type": "string", "format": format }));
            assert_eq!(control.widget, widget, "format {}", format);
        }
    }

    #[test]
    fn test_format_wins_over_widget_hint() {
        let control = single(json!({
            "type": "string",
            "format": "uri",
            "uiWidget": "textarea",
            "default": "https://example.net",
            "maxLength": 200
        }));
        assert_eq!(control.widget, WidgetKind::Url);
        assert_eq!(control.default_value.as_deref(), Some("https://example.net"));
        assert_eq!(control.constraints.max_length, Some(200));
    }

    #[test]
    fn test_unknown_format_falls_through() {
        let control = single(json!({ "type": "string", "format": "date" }));
        assert_eq!(control.widget, WidgetKind::Text);
    }

    #[test]
    fn test_textarea_hint() {
        let control = single(json!({ "type": "string", "uiWidget": "textarea", "minLength": 2 }));
        assert_eq!(control.widget, WidgetKind::Textarea);
        assert_eq!(control.constraints.min_length, Some(2));
    }

    #[test]
    fn test_file_hint() {
        let control = single(json!({ "type": "string", "uiWidget": "file", "default": "x" }));
        assert_eq!(control.widget, WidgetKind::File);
        assert!(control.default_value.is_none());
    }

    #[test]
    fn test_plain_text_carries_constraints() {
        let control = single(json!({
            "type": "string",
            "minLength": 1,
            "maxLength": 100,
            "pattern": "^[A-Z]",
            "description": "Your name"
        }));
        assert_eq!(control.widget, WidgetKind::Text);
        assert_eq!(control.constraints.min_length, Some(1));
        assert_eq!(control.constraints.max_length, Some(100));
        assert_eq!(control.constraints.pattern.as_deref(), Some("^[A-Z]"));
        assert_eq!(control.description.as_deref(), Some("Your name"));
    }

    #[test]
    fn test_number_and_integer_steps() {
        let control = single(json!({ "type": "number", "minimum": 0, "maximum": 1 }));
        assert_eq!(control.widget, WidgetKind::Number);
        assert_eq!(control.constraints.step, Some(Step::Any));
        assert_eq!(control.constraints.min, Some(0.0));
        assert_eq!(control.constraints.max, Some(1.0));

        let control = single(json!({ "type": "integer", "uiWidget": "range", "default": 3 }));
        assert_eq!(control.widget, WidgetKind::Range);
        assert_eq!(control.constraints.step, Some(Step::One));
        assert_eq!(control.default_value.as_deref(), Some("3"));
    }

    #[test]
    fn test_boolean_checked_from_default() {
        let control = single(json!({ "type": "boolean", "default": true }));
        assert_eq!(control.widget, WidgetKind::Checkbox);
        assert_eq!(control.checked, Some(true));

        let control = single(json!({ "type": "boolean" }));
        assert_eq!(control.checked, None);
    }

    #[test]
    fn test_array_checkbox_group_and_select() {
        let items = json!({ "type": "string", "enum": ["red", "green", "blue"] });

        let control = single(json!({ "type": "array", "items": items }));
        assert_eq!(control.widget, WidgetKind::CheckboxGroup);
        assert_eq!(option_values(&control), vec!["red", "green", "blue"]);

        let control = single(json!({ "type": "array", "items": items, "uiWidget": "select" }));
        assert_eq!(control.widget, WidgetKind::SelectMultiple);
        assert_eq!(option_values(&control), vec!["red", "green", "blue"]);
    }

    #[test]
    fn test_array_default_selects_members() {
        let control = single(json!({
            "type": "array",
            "items": { "type": "string", "enum": ["red", "green", "blue"] },
            "default": ["red", "blue"]
        }));
        let selected: Vec<bool> = control.options.iter().map(|o| o.selected).collect();
        assert_eq!(selected, vec![true, false, true]);
    }

    #[test]
    fn test_array_item_errors() {
        let schema = json!({
            "type": "object",
            "properties": {
                "user": {
                    "type": "object",
                    "properties": {
                        "tags": { "type": "array", "items": { "type": "object" } }
                    }
                }
            }
        });
        let err = map_schema(&schema).unwrap_err();
        assert_eq!(
            err.message(),
            "Unsupported schema type for field \"user.tags\", array of object is not supported"
        );

        let err = map_schema(&json!({
            "type": "object",
            "properties": { "tags": { "type": "array" } }
        }))
        .unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::InvalidItems);

        let err = map_schema(&json!({
            "type": "object",
            "properties": { "tags": { "type": "array", "items": { "type": "string" } } }
        }))
        .unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::ItemsEnumRequired);
    }

    #[test]
    fn test_nested_object_fieldset() {
        let schema = json!({
            "type": "object",
            "properties": {
                "user": {
                    "type": "object",
                    "uiName": "User",
                    "required": ["name"],
                    "properties": {
                        "name": { "type": "string" },
                        "address": {
                            "type": "object",
                            "properties": { "city": { "type": "string" } }
                        }
                    }
                }
            }
        });
        let controls = map_schema(&schema).unwrap();
        let user = &controls[0];
        assert_eq!(user.widget, WidgetKind::Fieldset);
        assert_eq!(user.label, "User");
        assert_eq!(user.children[0].name(), "user.name");
        assert!(user.children[0].required);
        assert_eq!(user.children[1].children[0].name(), "user.address.city");
    }

    #[test]
    fn test_error_aborts_whole_walk() {
        let schema = json!({
            "type": "object",
            "properties": {
                "ok": { "type": "string" },
                "bad": { "type": "array", "items": { "type": "array" } }
            }
        });
        assert!(map_schema(&schema).is_err());
    }
}
