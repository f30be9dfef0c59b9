use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// A tag together with the number of sessions referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagUsage {
    pub name: String,
    pub usage_count: i64,
}

fn split_tags(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !out.iter().any(|o| o == t) {
            out.push(t.to_string());
        }
    }
    out
}

/// Split a comma separated tag list.
///
/// Entries are trimmed, empty ones dropped and duplicates collapsed
/// (first occurrence wins). Input with no tag in it (blank, or only
/// separators) yields `default_tag`.
pub fn parse_tags(input: &str, default_tag: &str) -> Vec<String> {
    let tags = split_tags(input);
    if tags.is_empty() {
        split_tags(default_tag)
    } else {
        tags
    }
}

/// Validate a single tag name given on the command line.
pub fn validate_tag(name: &str) -> AppResult<String> {
    let t = name.trim();
    if t.is_empty() {
        return Err(AppError::InvalidTag("tag name cannot be empty".into()));
    }
    if t.contains(',') {
        return Err(AppError::InvalidTag(format!(
            "'{t}' contains a comma; pass a single tag"
        )));
    }
    Ok(t.to_string())
}
