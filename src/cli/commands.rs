//! CLI command implementations
//!
//! Every command but `render` and `serve` writes one JSON envelope to
//! stdout. Failures write an error envelope and exit non-zero.

use std::path::Path;

use serde_json::Value;

use crate::http_server::{FormsState, HttpServer};
use crate::mapper::map_object;
use crate::observability::{log_event, Event};
use crate::payload::{normalize, FlatEntry};
use crate::render::{FormAttributes, HtmlRenderer, RenderBackend, RenderContext};
use crate::schema::{SchemaDocument, SchemaLoader};
use crate::validate::CompiledSchema;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_pairs, write_error, write_response, write_text};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command).map_err(|err| {
        log_event(Event::CommandFailed, &[("code", err.code_str())]);
        // Reporting is best effort; the original error decides the exit status
        let _ = write_error(err.code_str(), err.message());
        err
    })
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Controls { schema } => write_response(controls(&schema)?),
        Command::Render {
            schema,
            form,
            action,
            method,
            id_prefix,
            config,
        } => {
            let options = RenderOptions {
                form,
                action,
                method,
                id_prefix,
                config,
            };
            write_text(&render(&schema, &options)?)
        }
        Command::Normalize => write_response(normalize_pairs(read_pairs()?)?),
        Command::Validate { schema } => write_response(validate(&schema, read_pairs()?)?),
        Command::Serve { config, port } => serve(&config, port),
    }
}

fn load_schema(path: &Path) -> CliResult<SchemaDocument> {
    let document = SchemaLoader::load_file(path)?;
    log_event(Event::SchemasLoaded, &[("count", "1"), ("form", document.name.as_str())]);
    Ok(document)
}

/// Control descriptions of a schema file as JSON
pub fn controls(schema_path: &Path) -> CliResult<Value> {
    let document = load_schema(schema_path)?;
    let controls = map_object(&document.root, None)?;
    Ok(serde_json::to_value(controls)?)
}

/// Options of the `render` command
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Wrap controls in a `<form>`
    pub form: bool,
    pub action: Option<String>,
    /// Overrides the configured method
    pub method: Option<String>,
    /// Overrides the configured id prefix
    pub id_prefix: Option<String>,
    pub config: Option<std::path::PathBuf>,
}

/// Renders a schema file as HTML.
///
/// Without `form` only the controls are emitted.
pub fn render(schema_path: &Path, options: &RenderOptions) -> CliResult<String> {
    let config = match &options.config {
        Some(path) => {
            let config = Config::load(path)?;
            let shown = path.display().to_string();
            log_event(Event::ConfigLoaded, &[("path", shown.as_str())]);
            config
        }
        None => Config::default(),
    };

    let document = load_schema(schema_path)?;
    let controls = map_object(&document.root, None)?;

    let context = match options.id_prefix.as_ref().or(config.id_prefix.as_ref()) {
        Some(prefix) => RenderContext::with_prefix(prefix.clone()),
        None => RenderContext::new(),
    };
    let renderer = HtmlRenderer::new(context);

    if !options.form {
        return Ok(renderer.render(&controls));
    }

    let mut attributes: FormAttributes = config.form_attributes(options.action.clone());
    if let Some(method) = &options.method {
        let method = method.to_ascii_lowercase();
        if method != "get" && method != "post" {
            return Err(CliError::invalid_input(format!(
                "Invalid method: '{}'. Expected 'get' or 'post'.",
                method
            )));
        }
        attributes.method = method;
    }

    Ok(renderer.render_form(&controls, &attributes))
}

/// Aggregates flat entries into a nested payload.
pub fn normalize_pairs(entries: Vec<FlatEntry>) -> CliResult<Value> {
    Ok(normalize(entries)?.to_json())
}

/// Aggregates and validates flat entries against a schema file.
///
/// A failed check is a successful command; the result carries the issues.
pub fn validate(schema_path: &Path, entries: Vec<FlatEntry>) -> CliResult<Value> {
    let document = load_schema(schema_path)?;
    let schema = CompiledSchema::compile(&document.source)?;
    log_event(Event::SchemaCompiled, &[("form", document.name.as_str())]);

    let result = crate::validate::validate_form_data(&schema, entries)?;
    if result.valid {
        log_event(Event::ValidationPassed, &[("form", document.name.as_str())]);
    } else {
        let issues = result.errors.len().to_string();
        log_event(
            Event::ValidationFailed,
            &[("form", document.name.as_str()), ("issues", issues.as_str())],
        );
    }

    Ok(serde_json::to_value(result)?)
}

/// Serves every schema of the configured directory as a form.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    config.validate_for_serve()?;
    let shown = config_path.display().to_string();
    log_event(Event::ConfigLoaded, &[("path", shown.as_str())]);

    let mut loader = SchemaLoader::new(&config.schema_dir);
    loader.load_all()?;
    let count = loader.schema_count().to_string();
    let dir = config.schema_dir.display().to_string();
    log_event(
        Event::SchemasLoaded,
        &[("count", count.as_str()), ("dir", dir.as_str())],
    );

    let context = match &config.id_prefix {
        Some(prefix) => RenderContext::with_prefix(prefix.clone()),
        None => RenderContext::new(),
    };
    let state = FormsState::new(&loader, config.form_attributes(None), context)?.into_shared();

    let mut server_config = config.server_config();
    if let Some(port) = port {
        server_config.port = port;
    }
    let server = HttpServer::new(server_config, state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server.start().await.map_err(|e| {
            let reason = e.to_string();
            log_event(Event::ServerFailed, &[("error", reason.as_str())]);
            CliError::serve_failed(format!("HTTP server failed: {}", e))
        })
    })
}
