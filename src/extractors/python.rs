// Python Extractor for Outline
//
// Line-oriented indentation-stack scanner. Classes are tracked only to name the
// parent of the defs inside them; defs are emitted while their nesting depth is
// within `max_depth` and are pushed onto the stack so nested defs see them.
//
// Indentation is the raw leading-whitespace character count: tabs and spaces
// are not normalized.

use crate::extractors::base::{SymbolExtractor, SymbolRecord};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*class\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap());
static DEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:async\s+)?def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap());

/// Depth used when the host does not configure one: top-level functions and
/// methods of top-level classes.
pub const DEFAULT_MAX_DEPTH: usize = 1;

/// An enclosing `class`/`def` block still open at the current line
#[derive(Debug)]
struct Block {
    indent: usize,
    depth: usize,
    name: String,
}

#[derive(Debug, Clone, Copy)]
pub struct PythonExtractor {
    max_depth: usize,
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl PythonExtractor {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

impl SymbolExtractor for PythonExtractor {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py", "pyi"]
    }

    fn extract(&self, text: &str) -> Vec<SymbolRecord> {
        let mut symbols = Vec::new();
        let mut stack: Vec<Block> = Vec::new();

        for (index, line) in text.split('\n').enumerate() {
            let trimmed = line.trim();
            // Blank and comment-only lines carry no indentation information
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let indent = leading_whitespace(line);
            while stack.last().is_some_and(|block| block.indent >= indent) {
                stack.pop();
            }
            let current_depth = stack.last().map_or(0, |block| block.depth + 1);

            if let Some(caps) = CLASS_RE.captures(line) {
                stack.push(Block {
                    indent,
                    depth: current_depth,
                    name: caps[1].to_string(),
                });
                continue;
            }

            if let Some(caps) = DEF_RE.captures(line) {
                let name = caps[1].to_string();
                if current_depth <= self.max_depth {
                    let parent = stack.last().map(|block| block.name.clone());
                    symbols.push(SymbolRecord::new(name.clone(), index as u32).with_parent(parent));
                } else {
                    trace!("Skipping def {} at depth {}", name, current_depth);
                }
                stack.push(Block {
                    indent,
                    depth: current_depth,
                    name,
                });
            }
        }

        symbols
    }
}
