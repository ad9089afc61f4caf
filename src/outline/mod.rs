//! Outline service: cache, document model, name filter and the request path

pub mod cache;
pub mod document;
pub mod filter;
pub mod service;

pub use cache::SymbolCache;
pub use document::{content_revision, SourceDocument, TextDocument};
pub use filter::{compile_name_filter, filter_by_name};
pub use service::DocumentOutline;
