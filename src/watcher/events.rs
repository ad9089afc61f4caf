//! File system event processing
//!
//! Converts `notify::Event` instances into [`FileChangeEvent`] entries for the
//! paths the outline cares about.

use crate::watcher::filtering::should_process_path;
use crate::watcher::types::{FileChangeEvent, FileChangeType};
use notify::{Event, EventKind};
use std::collections::BTreeSet;
use tracing::debug;

pub fn classify_event(
    event: Event,
    supported_extensions: &BTreeSet<String>,
    ignore_patterns: &[glob::Pattern],
) -> Vec<FileChangeEvent> {
    let change_type = match event.kind {
        EventKind::Create(_) => FileChangeType::Created,
        EventKind::Modify(_) => FileChangeType::Modified,
        EventKind::Remove(_) => FileChangeType::Deleted,
        _ => {
            debug!("Ignoring event kind: {:?}", event.kind);
            return Vec::new();
        }
    };

    event
        .paths
        .into_iter()
        .filter(|path| should_process_path(path, supported_extensions, ignore_patterns))
        // A deleted path no longer is a file, so only existing paths are checked
        .filter(|path| change_type == FileChangeType::Deleted || path.is_file())
        .map(|path| FileChangeEvent {
            path,
            change_type,
        })
        .collect()
}
