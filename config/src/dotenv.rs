//! `.env` reader: `KEY=VALUE` lines into a map. Nothing is applied here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `<dir>/.env` when it exists, with `dir` defaulting to the current directory.
pub fn dotenv_path(dir: Option<&Path>) -> Option<PathBuf> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().ok()?,
    };
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

fn unquote(value: &str) -> String {
    if let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    {
        return inner.replace("\\\"", "\"").replace("\\n", "\n");
    }
    if let Some(inner) = value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return inner.to_string();
    }
    // Unquoted: ` #` starts a trailing comment.
    match value.find(" #") {
        Some(pos) => value[..pos].trim_end().to_string(),
        None => value.to_string(),
    }
}

/// Parses `.env` text.
///
/// * Blank lines and lines starting with `#` are skipped, as are lines without `=`.
/// * An optional leading `export ` is ignored.
/// * Double quotes allow `\"` and `\n`; single quotes are literal.
/// * Later duplicates win.
pub fn parse(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim())))
        })
        .collect()
}

/// Reads `.env` from `dir` (or the current directory). No file means an empty map.
pub fn load_env_map(dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    match dotenv_path(dir) {
        Some(path) => Ok(parse(&std::fs::read_to_string(path)?)),
        None => Ok(HashMap::new()),
    }
}
