//! formcodec CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`, which has already
//! written the error envelope when a command fails.

use formcodec::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
