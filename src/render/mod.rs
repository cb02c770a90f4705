//! Rendering backends
//!
//! A backend consumes control descriptions and produces markup. Backends
//! receive their document context explicitly; nothing here reads global
//! state.

mod context;
mod html;

pub use context::RenderContext;
pub use html::{escape_html, HtmlRenderer};

use crate::mapper::ControlDescription;

/// Turns control descriptions into a rendered representation.
pub trait RenderBackend {
    type Output;

    fn render(&self, controls: &[ControlDescription]) -> Self::Output;
}

/// Attributes of the wrapping `<form>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormAttributes {
    pub method: String,
    pub action: Option<String>,
    pub enctype: Option<String>,
    pub submit_label: String,
}

impl Default for FormAttributes {
    fn default() -> Self {
        Self {
            method: "post".to_string(),
            action: None,
            enctype: None,
            submit_label: "Submit".to_string(),
        }
    }
}

/// Renders a complete `<form>` with the default HTML renderer.
pub fn render_form(controls: &[ControlDescription], form: &FormAttributes) -> String {
    HtmlRenderer::default().render_form(controls, form)
}
