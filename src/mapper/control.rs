//! Control descriptions
//!
//! Backend-agnostic description of the control that represents one schema
//! property. A renderer turns these into markup; the `path` doubles as the
//! submission name of the control.

use serde::Serialize;
use serde_json::Value;

use crate::path::FieldPath;

/// Closed set of control kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    Text,
    Textarea,
    Url,
    Email,
    #[serde(rename = "datetime-local")]
    DateTimeLocal,
    Time,
    Number,
    Range,
    Checkbox,
    RadioGroup,
    Select,
    SelectMultiple,
    CheckboxGroup,
    File,
    Fieldset,
}

impl WidgetKind {
    /// `type` attribute for single `<input>` widgets
    pub fn input_type(&self) -> Option<&'static str> {
        match self {
            WidgetKind::Text => Some("text"),
            WidgetKind::Url => Some("url"),
            WidgetKind::Email => Some("email"),
            WidgetKind::DateTimeLocal => Some("datetime-local"),
            WidgetKind::Time => Some("time"),
            WidgetKind::Number => Some("number"),
            WidgetKind::Range => Some("range"),
            WidgetKind::Checkbox => Some("checkbox"),
            WidgetKind::File => Some("file"),
            _ => None,
        }
    }

    /// Whether the control submits its name once per chosen option
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, WidgetKind::SelectMultiple | WidgetKind::CheckboxGroup)
    }
}

/// Numeric step policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Step {
    /// Integers step by one
    #[serde(rename = "1")]
    One,
    /// Numbers accept any precision
    #[serde(rename = "any")]
    Any,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::One => "1",
            Step::Any => "any",
        }
    }
}

/// One choice of a radio group, select, or checkbox group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlOption {
    /// Submitted value text
    pub value: String,
    /// Selected or checked initially
    pub selected: bool,
}

/// Constraints forwarded to the control
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ControlConstraints {
    pub fn is_empty(&self) -> bool {
        self == &ControlConstraints::default()
    }
}

/// Mapper output unit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlDescription {
    /// Field identity; encodes to the submission name
    pub path: FieldPath,
    /// Display label
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub widget: WidgetKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ControlOption>,
    #[serde(skip_serializing_if = "ControlConstraints::is_empty")]
    pub constraints: ControlConstraints,
    /// Initial value text for single-valued inputs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Initial state of a checkbox
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Nested controls of a fieldset
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ControlDescription>,
}

impl ControlDescription {
    /// Creates a control with no options, constraints or children
    pub fn new(path: FieldPath, label: impl Into<String>, widget: WidgetKind, required: bool) -> Self {
        Self {
            path,
            label: label.into(),
            description: None,
            widget,
            required,
            options: Vec::new(),
            constraints: ControlConstraints::default(),
            default_value: None,
            checked: None,
            children: Vec::new(),
        }
    }

    /// Submission name of the control
    pub fn name(&self) -> String {
        self.path.encode()
    }

    /// Depth-first iterator over this control and all nested controls
    pub fn walk(&self) -> Vec<&ControlDescription> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}

/// Text form of a schema literal as it appears in a form
pub fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
