//! Output formatting for `pm_lite`.
//!
//! Two renderings of every command result: human text (default) and
//! JSON (`--json`). The JSON shapes live in [`output`]; the plain
//! text helpers in [`text`].

pub mod output;
pub mod text;

use anyhow::Result;
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
