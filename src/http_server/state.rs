//! Shared state of the form host
//!
//! Every schema is mapped and compiled once when the state is built; request
//! handlers only read it.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::mapper::{map_object, ControlDescription};
use crate::observability::{log_event, Event, MetricsRegistry};
use crate::render::{escape_html, FormAttributes, HtmlRenderer, RenderContext};
use crate::schema::{SchemaLoader, SchemaResult};
use crate::validate::{CompiledSchema, ValidatorCache};

/// One schema served as a form
#[derive(Debug)]
pub struct HostedForm {
    pub name: String,
    pub controls: Vec<ControlDescription>,
    pub schema: Arc<CompiledSchema>,
}

/// Forms, renderer and counters shared by all handlers
#[derive(Debug)]
pub struct FormsState {
    forms: BTreeMap<String, HostedForm>,
    renderer: HtmlRenderer,
    form: FormAttributes,
    cache: ValidatorCache,
    pub metrics: MetricsRegistry,
}

impl FormsState {
    /// Maps and compiles every schema of `loader`.
    ///
    /// `form` supplies method and enctype; the action of each form is its
    /// own submission URL.
    pub fn new(
        loader: &SchemaLoader,
        form: FormAttributes,
        context: RenderContext,
    ) -> SchemaResult<Self> {
        let mut state = Self {
            forms: BTreeMap::new(),
            renderer: HtmlRenderer::new(context),
            form,
            cache: ValidatorCache::new(),
            metrics: MetricsRegistry::new(),
        };

        for document in loader.documents() {
            let controls = map_object(&document.root, None)?;
            let lookup = state.cache.get_or_compile(&document.source)?;
            state.metrics.record_cache_lookup(lookup.hit);
            log_event(Event::SchemaCompiled, &[("form", document.name.as_str())]);

            state.forms.insert(
                document.name.clone(),
                HostedForm {
                    name: document.name.clone(),
                    controls,
                    schema: lookup.schema,
                },
            );
        }

        Ok(state)
    }

    pub fn get(&self, name: &str) -> Option<&HostedForm> {
        self.forms.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.forms.keys().map(String::as_str).collect()
    }

    /// Full HTML page for one form
    pub fn render_page(&self, form: &HostedForm) -> String {
        let attributes = FormAttributes {
            action: Some(format!("/forms/{}", form.name)),
            ..self.form.clone()
        };
        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}</body></html>",
            escape_html(&form.name),
            self.renderer.render_form(&form.controls, &attributes)
        )
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
