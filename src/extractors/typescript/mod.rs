//! TypeScript/JavaScript symbol extractor with a two-level strategy
//!
//! The tree-sitter strategy runs first. When the grammar is unavailable or the
//! AST pass fails, the regex strategy takes over; when that fails too the
//! result is empty. Submodules:
//!
//! - **segments**: splits template-hosting documents into script segments
//! - **sfc**: Vue and Svelte top-level block decomposers
//! - **ast**: tree-sitter walk producing spanned symbol candidates
//! - **enclosure**: span-based parent inference
//! - **masking**: comment and literal blanking for the regex strategy
//! - **fallback**: the regex strategy itself
//! - **helpers**: JSX and hook heuristics

mod ast;
mod enclosure;
mod fallback;
mod helpers;
mod masking;
mod sfc;

pub mod segments;

pub use ast::AstEngine;
pub use helpers::ScriptFlavor;
pub use masking::mask_literals;
pub use segments::{segment_document, Segment, SegmenterCapabilities};

use crate::extractors::base::{Result, SymbolExtractor, SymbolRecord};
use std::collections::HashSet;
use tracing::{debug, warn};

const EXTENSIONS: &[&str] = &[
    "js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts", "vue", "svelte", "html", "htm",
];

/// JS/TS extractor serving plain scripts and `<script>`-hosting markup
#[derive(Clone)]
pub struct TypeScriptExtractor {
    engine: Option<AstEngine>,
    capabilities: SegmenterCapabilities,
}

impl Default for TypeScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeScriptExtractor {
    /// Extractor with every capability the build provides
    pub fn new() -> Self {
        Self {
            engine: AstEngine::load(),
            capabilities: SegmenterCapabilities::default(),
        }
    }

    /// Extractor without an AST engine: always uses the regex strategy
    pub fn regex_only() -> Self {
        Self {
            engine: None,
            capabilities: SegmenterCapabilities::default(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: SegmenterCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn has_ast_engine(&self) -> bool {
        self.engine.is_some()
    }

    fn extract_with_ast(&self, engine: &AstEngine, text: &str) -> Result<Vec<SymbolRecord>> {
        let segments = segment_document(text, self.capabilities);
        let mut items = engine.collect(text, &segments)?;
        enclosure::infer_parents(&mut items, |_| true);

        let records = items
            .into_iter()
            .map(|item| {
                SymbolRecord::new(item.name, item.line)
                    .with_parent(item.parent)
                    .with_kind(item.kind)
            })
            .collect();
        Ok(dedupe_by_name_line_parent(records))
    }

    fn extract_with_regex(&self, text: &str) -> Vec<SymbolRecord> {
        match fallback::extract(text) {
            Ok(records) => records,
            Err(e) => {
                warn!("Regex symbol scan failed, returning no symbols: {}", e);
                Vec::new()
            }
        }
    }
}

/// First record wins for each (name, line, parent)
fn dedupe_by_name_line_parent(records: Vec<SymbolRecord>) -> Vec<SymbolRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert((r.name.clone(), r.line, r.parent.clone())))
        .collect()
}

impl SymbolExtractor for TypeScriptExtractor {
    fn language_id(&self) -> &'static str {
        "javascript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        EXTENSIONS
    }

    fn extract(&self, text: &str) -> Vec<SymbolRecord> {
        if let Some(engine) = &self.engine {
            match self.extract_with_ast(engine, text) {
                Ok(records) => return records,
                Err(e) => debug!("AST symbol pass failed, using regex strategy: {}", e),
            }
        }
        self.extract_with_regex(text)
    }
}
