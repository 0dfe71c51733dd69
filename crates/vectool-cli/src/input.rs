//! Argument resolution for `vectool call`.
//!
//! Arguments come from an inline JSON string (`--args`), a file
//! (`--args-file`), or stdin (`--args-file -`).

use std::io::Read;
use std::path::Path;

use serde_json::Value;

/// Resolves the tool arguments. A file takes precedence over the inline string.
pub fn resolve_args(inline: &str, file: Option<&str>) -> anyhow::Result<Value> {
    let raw = match file {
        Some("-") => read_from_stdin()?,
        Some(path) => read_from_file(path)?,
        None => inline.to_string(),
    };
    parse_json(raw.trim())
}

fn read_from_file(path: &str) -> anyhow::Result<String> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        anyhow::bail!("arguments file not found: {path}");
    }
    std::fs::read_to_string(file_path)
        .map_err(|e| anyhow::anyhow!("failed to read arguments file: {e}"))
}

fn read_from_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;
    Ok(buffer)
}

fn parse_json(input: &str) -> anyhow::Result<Value> {
    serde_json::from_str(input).map_err(|e| anyhow::anyhow!("invalid JSON arguments: {e}"))
}
