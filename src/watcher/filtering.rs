//! File filtering logic for directory walks and watch events
//!
//! A file is processed when its extension is served by the registry and its
//! path matches none of the ignore patterns.

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::Path;

const IGNORE_PATTERNS: &[&str] = &[
    "**/node_modules/**",
    "**/.git/**",
    "**/target/**",
    "**/dist/**",
];

/// Build ignore patterns for files/directories to skip
pub fn build_ignore_patterns() -> Result<Vec<glob::Pattern>> {
    IGNORE_PATTERNS
        .iter()
        .map(|p| {
            glob::Pattern::new(p).map_err(|e| anyhow::anyhow!("Invalid glob pattern {}: {}", p, e))
        })
        .collect()
}

pub fn is_ignored(path: &Path, ignore_patterns: &[glob::Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    ignore_patterns.iter().any(|pattern| pattern.matches(&path_str))
}

pub fn has_supported_extension(path: &Path, supported_extensions: &BTreeSet<String>) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| supported_extensions.contains(&ext.to_ascii_lowercase()))
}

/// Extension and ignore checks only; the path need not exist
pub fn should_process_path(
    path: &Path,
    supported_extensions: &BTreeSet<String>,
    ignore_patterns: &[glob::Pattern],
) -> bool {
    has_supported_extension(path, supported_extensions) && !is_ignored(path, ignore_patterns)
}
