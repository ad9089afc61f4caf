// Name filter applied to outline results

use crate::extractors::SymbolRecord;
use regex::Regex;
use tracing::warn;

/// Compile a filter pattern; empty or invalid patterns mean "no filter"
pub fn compile_name_filter(pattern: &str) -> Option<Regex> {
    if pattern.is_empty() {
        return None;
    }
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Ignoring invalid symbol filter {:?}: {}", pattern, e);
            None
        }
    }
}

/// Keep records whose name matches `pattern`
pub fn filter_by_name(symbols: &[SymbolRecord], pattern: &str) -> Vec<SymbolRecord> {
    match compile_name_filter(pattern) {
        Some(re) => symbols
            .iter()
            .filter(|symbol| re.is_match(&symbol.name))
            .cloned()
            .collect(),
        None => symbols.to_vec(),
    }
}
