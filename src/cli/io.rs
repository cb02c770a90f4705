//! JSON I/O for the CLI
//!
//! - Input: one JSON document on stdin
//! - Output: one envelope per command on stdout, or raw HTML for `render`
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde_json::Value;

use crate::mapper::literal_text;
use crate::payload::FlatEntry;

use super::errors::{CliError, CliResult};

/// Reads the whole of stdin as one JSON document.
pub fn read_request() -> CliResult<Value> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(serde_json::from_str(&input)?)
}

/// Reads a flat submission from stdin.
pub fn read_pairs() -> CliResult<Vec<FlatEntry>> {
    parse_pairs(&read_request()?)
}

/// Parses a JSON array of `[key, value]` pairs, in submission order.
///
/// Non-string scalar values are taken in their text form.
pub fn parse_pairs(input: &Value) -> CliResult<Vec<FlatEntry>> {
    let pairs = input
        .as_array()
        .ok_or_else(|| CliError::invalid_input("Expected a JSON array of [key, value] pairs"))?;

    pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| match pair.as_array().map(Vec::as_slice) {
            Some([Value::String(key), value]) if !value.is_array() && !value.is_object() => {
                Ok(FlatEntry::new(key.clone(), literal_text(value)))
            }
            _ => Err(CliError::invalid_input(format!(
                "Entry {} is not a [key, value] pair: {}",
                index, pair
            ))),
        })
        .collect()
}

/// Writes a success envelope to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Writes an error envelope to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Writes raw text to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;

    Ok(())
}
