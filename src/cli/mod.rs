/// CLI utilities for the symbol-outline binary
///
/// File discovery over the command-line paths and per-file outlining through a
/// shared [`DocumentOutline`]. The library's request path does not use this
/// module.
///
/// Modules:
/// - output: text and JSON rendering of file outlines
pub mod output;

pub use output::{OutputFormat, OutputWriter};

use crate::extractors::SymbolRecord;
use crate::language::detect_language;
use crate::outline::{DocumentOutline, TextDocument};
use crate::watcher::filtering::{has_supported_extension, is_ignored};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// The outline of one file as printed by the CLI
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileOutline {
    pub path: String,
    pub symbols: Vec<SymbolRecord>,
}

/// Expand files and directories into the supported, non-ignored files beneath them
pub fn discover_files(
    roots: &[PathBuf],
    supported_extensions: &BTreeSet<String>,
    ignore_patterns: &[glob::Pattern],
) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for root in roots {
        if root.is_file() {
            // Explicitly named files skip the ignore globs
            files.push(root.clone());
            continue;
        }

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored(e.path(), ignore_patterns))
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file()
                && has_supported_extension(entry.path(), supported_extensions)
                && !is_ignored(entry.path(), ignore_patterns)
            {
                files.push(entry.path().to_path_buf());
            }
        }
    }

    debug!("Discovered {} file(s) to outline", files.len());
    files
}

/// Document snapshot for a file on disk, keyed by its path
pub fn load_document(path: &Path) -> Result<TextDocument> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let language_id = detect_language(path).unwrap_or("plaintext");
    Ok(TextDocument::from_content(
        path.display().to_string(),
        text,
        language_id,
    ))
}

pub fn outline_file(outline: &mut DocumentOutline, path: &Path) -> Result<FileOutline> {
    let document = load_document(path)?;
    Ok(FileOutline {
        path: document.key.clone(),
        symbols: outline.symbols_for(&document),
    })
}
