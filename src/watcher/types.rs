//! Type definitions for refresh signals and file system changes

use std::path::PathBuf;

/// What the view layer should do for a document key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshSignal {
    /// Content changed and the debounce window elapsed: ask for symbols again
    Reparse { key: String },
    /// Content is unchanged: redraw from the cache
    Repaint { key: String },
}

impl RefreshSignal {
    pub fn key(&self) -> &str {
        match self {
            RefreshSignal::Reparse { key } | RefreshSignal::Repaint { key } => key,
        }
    }
}

/// A file system change relevant to the outline
#[derive(Debug, Clone)]
pub struct FileChangeEvent {
    pub path: PathBuf,
    pub change_type: FileChangeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChangeType {
    Created,
    Modified,
    Deleted,
}
