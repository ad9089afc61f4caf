// Outline's Language Extractors Module
//
// Each extractor turns the full text of a document into an ordered list of
// symbol records. The registry maps language ids onto extractor instances.

pub mod base;
pub mod php;
pub mod python;
pub mod registry;
pub mod typescript;

pub use base::{ExtractionError, SymbolExtractor, SymbolKind, SymbolRecord};
pub use php::PhpExtractor;
pub use python::PythonExtractor;
pub use registry::ExtractorRegistry;
pub use typescript::TypeScriptExtractor;
