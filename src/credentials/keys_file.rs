//! Keys file: line-oriented `NAME=value` assignments.
//!
//! Blank lines and `#` comments are skipped. Values may be wrapped in single
//! or double quotes. Lines that do not look like an assignment are skipped
//! without complaint.

use std::path::{Path, PathBuf};

/// Environment variable naming an override keys file.
pub const KEYS_FILE_ENV: &str = "PRIMARY_KEYS_FILE";

/// Default keys file name under the home directory.
pub const DEFAULT_KEYS_FILE_NAME: &str = ".llm_api_keys";

/// One parsed assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAssignment {
    /// 1-based line number in the file.
    pub line: usize,
    pub name: String,
    pub value: String,
}

/// Parse every assignment in `content`, in file order.
pub fn parse_keys_file(content: &str) -> Vec<KeyAssignment> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            parse_line(raw).map(|(name, value)| KeyAssignment {
                line: idx + 1,
                name,
                value,
            })
        })
        .collect()
}

fn parse_line(raw: &str) -> Option<(String, String)> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (name, value) = line.split_once('=')?;
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some((name.to_string(), unquote(value).to_string()))
}

/// Strip one optional leading and one optional trailing quote character.
fn unquote(value: &str) -> &str {
    let is_quote = |c: char| c == '"' || c == '\'';
    let value = value.strip_prefix(is_quote).unwrap_or(value);
    value.strip_suffix(is_quote).unwrap_or(value)
}

/// Pick the keys file: an existing override path wins, else the default file
/// under `home` if it exists.
pub fn locate_keys_file(override_path: Option<&str>, home: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        let candidate = PathBuf::from(path);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    home.map(|h| h.join(DEFAULT_KEYS_FILE_NAME))
        .filter(|p| p.is_file())
}
