// Outline - Cached Source Symbol Index Library
//!
//! Outline extracts a navigable list of function, class, method and interface
//! definitions from PHP, JavaScript/TypeScript (including Vue, Svelte and
//! `<script>`-hosting markup) and Python source text, and serves it through a
//! per-document LRU cache with debounced refresh signalling.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod language;
pub mod outline;
pub mod watcher;


// Re-export common types
pub use config::OutlineConfig;
pub use extractors::{ExtractorRegistry, SymbolExtractor, SymbolKind, SymbolRecord};
pub use outline::{DocumentOutline, SourceDocument, TextDocument};
pub use watcher::{RefreshScheduler, RefreshSignal};
