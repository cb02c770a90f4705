//! HTML string renderer
//!
//! Markup per widget:
//! - single inputs: `<div><label for title>..</label><input ..></div>`
//! - textarea: same, with the default as element text
//! - select / select-multiple: `<select>` with one `<option>` per choice
//! - radio / checkbox groups: a titled `<span>` label followed by one
//!   `<label><input><span>value</span></label>` per choice
//! - fieldset: `<fieldset name><legend title>..</legend><div>children</div></fieldset>`

use std::fmt::Display;

use crate::mapper::{ControlDescription, WidgetKind};

use super::context::RenderContext;
use super::{FormAttributes, RenderBackend};

/// Renders controls to an HTML string
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    context: RenderContext,
}

impl HtmlRenderer {
    pub fn new(context: RenderContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Renders the controls inside a `<form>` followed by a submit button.
    pub fn render_form(&self, controls: &[ControlDescription], form: &FormAttributes) -> String {
        let mut attrs = Attributes::new();
        attrs.set("method", &form.method);
        attrs.opt("action", form.action.as_ref());
        attrs.opt("enctype", form.enctype.as_ref());
        format!(
            "<form{}>{}<button type=\"submit\">{}</button></form>",
            attrs,
            self.render(controls),
            escape_html(&form.submit_label)
        )
    }

    fn render_control(&self, control: &ControlDescription) -> String {
        match control.widget {
            WidgetKind::Fieldset => self.render_fieldset(control),
            WidgetKind::Select | WidgetKind::SelectMultiple => self.render_select(control),
            WidgetKind::RadioGroup => render_choice_group(control, "radio"),
            WidgetKind::CheckboxGroup => render_choice_group(control, "checkbox"),
            WidgetKind::Textarea => self.render_textarea(control),
            _ => self.render_input(control),
        }
    }

    fn label(&self, control: &ControlDescription, id: &str) -> String {
        let mut attrs = Attributes::new();
        attrs.set("for", id);
        attrs.opt("title", control.description.as_ref());
        format!("<label{}>{}</label>", attrs, escape_html(&control.label))
    }

    fn render_input(&self, control: &ControlDescription) -> String {
        let name = control.name();
        let id = self.context.id_for(&name);
        let constraints = &control.constraints;

        let mut attrs = Attributes::new();
        attrs.set("id", &id);
        attrs.set("name", &name);
        attrs.opt("type", control.widget.input_type());
        attrs.flag("required", control.required);
        match control.widget {
            WidgetKind::Checkbox => attrs.flag("checked", control.checked == Some(true)),
            WidgetKind::File => {}
            _ => attrs.opt("value", control.default_value.as_ref()),
        }
        attrs.opt("min", constraints.min);
        attrs.opt("max", constraints.max);
        attrs.opt("step", constraints.step.map(|step| step.as_str()));
        attrs.opt("minlength", constraints.min_length);
        attrs.opt("maxlength", constraints.max_length);
        attrs.opt("pattern", constraints.pattern.as_ref());
        attrs.opt("title", constraints.pattern.as_ref());

        format!("<div>{}<input{} /></div>", self.label(control, &id), attrs)
    }

    fn render_textarea(&self, control: &ControlDescription) -> String {
        let name = control.name();
        let id = self.context.id_for(&name);

        let mut attrs = Attributes::new();
        attrs.set("id", &id);
        attrs.set("name", &name);
        attrs.flag("required", control.required);
        attrs.opt("minlength", control.constraints.min_length);
        attrs.opt("maxlength", control.constraints.max_length);

        format!(
            "<div>{}<textarea{}>{}</textarea></div>",
            self.label(control, &id),
            attrs,
            escape_html(control.default_value.as_deref().unwrap_or_default())
        )
    }

    fn render_select(&self, control: &ControlDescription) -> String {
        let name = control.name();
        let id = self.context.id_for(&name);

        let mut attrs = Attributes::new();
        attrs.set("id", &id);
        attrs.set("name", &name);
        attrs.flag("multiple", control.widget == WidgetKind::SelectMultiple);
        attrs.flag("required", control.required);

        let options: String = control
            .options
            .iter()
            .map(|option| {
                let mut attrs = Attributes::new();
                attrs.set("value", &option.value);
                attrs.flag("selected", option.selected);
                format!("<option{}>{}</option>", attrs, escape_html(&option.value))
            })
            .collect();

        format!(
            "<div>{}<select{}>{}</select></div>",
            self.label(control, &id),
            attrs,
            options
        )
    }

    fn render_fieldset(&self, control: &ControlDescription) -> String {
        let mut attrs = Attributes::new();
        attrs.set("name", &control.name());
        let mut legend = Attributes::new();
        legend.opt("title", control.description.as_ref());

        format!(
            "<fieldset{}><legend{}>{}</legend><div>{}</div></fieldset>",
            attrs,
            legend,
            escape_html(&control.label),
            self.render(&control.children)
        )
    }
}

impl RenderBackend for HtmlRenderer {
    type Output = String;

    fn render(&self, controls: &[ControlDescription]) -> String {
        controls
            .iter()
            .map(|control| self.render_control(control))
            .collect()
    }
}

fn render_choice_group(control: &ControlDescription, input_type: &str) -> String {
    let name = control.name();
    let mut title = Attributes::new();
    title.opt("title", control.description.as_ref());

    let choices: String = control
        .options
        .iter()
        .map(|option| {
            let mut attrs = Attributes::new();
            attrs.set("type", input_type);
            attrs.set("name", &name);
            attrs.set("value", &option.value);
            // Browsers would demand every box of a required checkbox group
            attrs.flag("required", control.required && input_type == "radio");
            attrs.flag("checked", option.selected);
            format!(
                "<label><input{} /><span>{}</span></label>",
                attrs,
                escape_html(&option.value)
            )
        })
        .collect();

    format!(
        "<div><span{}>{}</span><span>{}</span></div>",
        title,
        escape_html(&control.label),
        choices
    )
}

/// Attribute list rendered as ` name="value"` pairs in insertion order
struct Attributes(String);

impl Attributes {
    fn new() -> Self {
        Self(String::new())
    }

    fn set(&mut self, name: &str, value: &str) {
        self.0
            .push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }

    fn opt<T: Display>(&mut self, name: &str, value: Option<T>) {
        if let Some(value) = value {
            self.set(name, &value.to_string());
        }
    }

    fn flag(&mut self, name: &str, on: bool) {
        if on {
            self.0.push(' ');
            self.0.push_str(name);
        }
    }
}

impl Display for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escapes text for HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
