//! CLI module for formcodec
//!
//! Provides command-line interface for:
//! - controls: Print the control descriptions of a schema
//! - render: Render a schema as HTML
//! - normalize: Aggregate flat pairs into a nested payload
//! - validate: Aggregate and validate flat pairs
//! - serve: Host a directory of schemas as forms

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{controls, normalize_pairs, render, run, run_command, serve, validate, RenderOptions};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_pairs, read_pairs, read_request, write_error, write_response, write_text};
