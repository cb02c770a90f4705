//! CLI argument definitions using clap
//!
//! Commands:
//! - formcodec controls --schema <path>
//! - formcodec render --schema <path> [--form] [--action <url>] [--method <m>] [--id-prefix <p>]
//! - formcodec normalize < pairs.json
//! - formcodec validate --schema <path> < pairs.json
//! - formcodec serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// formcodec - JSON Schema to HTML forms and back
#[derive(Parser, Debug)]
#[command(name = "formcodec")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the control descriptions of a schema
    Controls {
        /// Path to a JSON Schema file
        #[arg(long)]
        schema: PathBuf,
    },

    /// Render a schema as HTML form controls
    Render {
        /// Path to a JSON Schema file
        #[arg(long)]
        schema: PathBuf,

        /// Wrap the controls in a <form> with a submit button
        #[arg(long)]
        form: bool,

        /// Form action URL
        #[arg(long)]
        action: Option<String>,

        /// Form method (get or post)
        #[arg(long)]
        method: Option<String>,

        /// Prefix for element ids
        #[arg(long)]
        id_prefix: Option<String>,

        /// Configuration file supplying form defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Aggregate [key, value] pairs from stdin into a nested payload
    Normalize,

    /// Aggregate and validate [key, value] pairs from stdin
    Validate {
        /// Path to a JSON Schema file
        #[arg(long)]
        schema: PathBuf,
    },

    /// Serve the schemas of a directory as HTML forms
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./formcodec.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
