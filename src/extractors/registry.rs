//! ExtractorRegistry - language id to extractor routing
//!
//! An explicitly constructed registry owned by its consumer. Lookups try the
//! direct id first and then the alias table; an unknown id resolves to `None`,
//! which callers read as "zero symbols".

use crate::extractors::base::SymbolExtractor;
use crate::extractors::php::PhpExtractor;
use crate::extractors::python::PythonExtractor;
use crate::extractors::typescript::TypeScriptExtractor;
use crate::language::{alias_target, detect_language};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Advertised when no extractor declares any extension
const FALLBACK_EXTENSIONS: &[&str] = &["js", "ts", "py", "php"];

#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn SymbolExtractor>>,
}

impl ExtractorRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// PHP, Python and JS/TS extractors; `typescript` shares the `javascript` instance
    pub fn with_defaults(python_max_depth: usize) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PhpExtractor::new()));
        registry.register(Arc::new(PythonExtractor::new(python_max_depth)));

        let scripts: Arc<dyn SymbolExtractor> = Arc::new(TypeScriptExtractor::new());
        registry.register_as("typescript", Arc::clone(&scripts));
        registry.register(scripts);
        registry
    }

    /// Register under the extractor's own language id, replacing any previous entry
    pub fn register(&mut self, extractor: Arc<dyn SymbolExtractor>) {
        let id = extractor.language_id().to_string();
        self.register_as(&id, extractor);
    }

    pub fn register_as(&mut self, language_id: &str, extractor: Arc<dyn SymbolExtractor>) {
        debug!("Registering extractor for {}", language_id);
        self.extractors.insert(language_id.to_string(), extractor);
    }

    pub fn resolve(&self, language_id: &str) -> Option<Arc<dyn SymbolExtractor>> {
        if let Some(extractor) = self.extractors.get(language_id) {
            return Some(Arc::clone(extractor));
        }
        alias_target(language_id)
            .and_then(|target| self.extractors.get(target))
            .map(Arc::clone)
    }

    pub fn resolve_for_path(&self, path: &Path) -> Option<Arc<dyn SymbolExtractor>> {
        detect_language(path).and_then(|language_id| self.resolve(language_id))
    }

    /// Union of every registered extractor's extensions; never empty
    pub fn supported_extensions(&self) -> BTreeSet<String> {
        let extensions: BTreeSet<String> = self
            .extractors
            .values()
            .flat_map(|extractor| extractor.extensions().iter())
            .map(|ext| ext.to_string())
            .collect();

        if extensions.is_empty() {
            FALLBACK_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
        } else {
            extensions
        }
    }

    /// Replace the Python extractor with one using `max_depth`
    pub fn set_python_max_depth(&mut self, max_depth: usize) {
        self.register(Arc::new(PythonExtractor::new(max_depth)));
    }

    pub fn language_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.extractors.keys().cloned().collect();
        ids.sort();
        ids
    }
}
