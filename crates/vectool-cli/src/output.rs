//! Output formatting for CLI responses.

use serde_json::Value;

/// Prints a JSON value to stdout, pretty-printed.
pub fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("[ERROR] {message}");
}
