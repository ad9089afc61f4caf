// Base Extractor Types and Traits for Outline
//
// The shared output shape of every language scanner plus the extractor contract.
// Scanners populate only the fields they support: PHP, Python and the regex
// fallback leave `kind` (and PHP/regex also `parent`) unset.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A function, method, class or interface definition discovered in source text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SymbolRecord {
    /// Identifier as written in the source
    pub name: String,
    /// 0-based line in the original document
    pub line: u32,
    /// Name of the innermost enclosing symbol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<SymbolKind>,
}

impl SymbolRecord {
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            line,
            parent: None,
            kind: None,
        }
    }

    pub fn with_parent(mut self, parent: Option<String>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_kind(mut self, kind: SymbolKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// `Parent.name` when a parent is known, `name` otherwise
    pub fn qualified_name(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}.{}", parent, self.name),
            None => self.name.clone(),
        }
    }
}

/// Symbol kinds the outline distinguishes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Class,
    Interface,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Class => "class",
            SymbolKind::Interface => "interface",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal extraction failures. These never cross `SymbolExtractor::extract`.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Parse aborted for segment at offset {offset}")]
    ParseAborted { offset: usize },

    #[error("Segment {start}..{end} out of bounds for document of length {len}")]
    SegmentBounds { start: usize, end: usize, len: usize },

    #[error("Decomposer error: {0}")]
    Decompose(String),

    #[error("Masked text is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<tree_sitter::LanguageError> for ExtractionError {
    fn from(err: tree_sitter::LanguageError) -> Self {
        ExtractionError::Grammar(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Language-specific strategy turning document text into an ordered symbol list.
///
/// `extract` is fail-soft: internal errors degrade to an empty or partial list,
/// so callers treat "no symbols" and "extractor failure" the same way.
pub trait SymbolExtractor: Send + Sync {
    /// Registry id of the language this extractor serves
    fn language_id(&self) -> &'static str;

    /// File extensions (without the dot) this extractor understands
    fn extensions(&self) -> &'static [&'static str];

    fn extract(&self, text: &str) -> Vec<SymbolRecord>;
}

/// 0-based line of a byte offset: the number of `\n` bytes before it
pub fn line_at(text: &str, byte_offset: usize) -> u32 {
    let end = byte_offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() as u32
}

/// Newline positions of a text, for repeated offset-to-line lookups
#[derive(Debug, Clone)]
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let newlines = text
            .bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'\n')
            .map(|(i, _)| i)
            .collect();
        Self { newlines }
    }

    /// Same result as [`line_at`] on the indexed text, in O(log lines)
    pub fn line_of(&self, byte_offset: usize) -> u32 {
        self.newlines.partition_point(|&pos| pos < byte_offset) as u32
    }
}

/// Drop records whose (name, line, parent, kind) tuple was already seen, keeping order
pub fn dedupe_records(records: Vec<SymbolRecord>) -> Vec<SymbolRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}
