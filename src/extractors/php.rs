// PHP Extractor for Outline
//
// Flat scan for `function <identifier>(` over the raw text. No class/method
// distinction and no parent inference: methods show up as plain functions.

use crate::extractors::base::{LineIndex, SymbolExtractor, SymbolRecord};
use regex::Regex;
use std::sync::LazyLock;

static FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap());

#[derive(Debug, Default, Clone, Copy)]
pub struct PhpExtractor;

impl PhpExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl SymbolExtractor for PhpExtractor {
    fn language_id(&self) -> &'static str {
        "php"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["php", "phtml"]
    }

    fn extract(&self, text: &str) -> Vec<SymbolRecord> {
        let lines = LineIndex::new(text);
        FUNCTION_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(1)?;
                Some(SymbolRecord::new(name.as_str(), lines.line_of(whole.start())))
            })
            .collect()
    }
}
