// DocumentOutline tests: the request path, change handling and settings reloads

use crate::config::OutlineConfig;
use crate::extractors::base::{SymbolExtractor, SymbolRecord};
use crate::extractors::registry::ExtractorRegistry;
use crate::outline::{content_revision, DocumentOutline, TextDocument};
use crate::watcher::RefreshSignal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::sleep;

/// Counts how often extraction actually runs
struct CountingExtractor {
    calls: Arc<AtomicUsize>,
}

impl SymbolExtractor for CountingExtractor {
    fn language_id(&self) -> &'static str {
        "counted"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["cnt"]
    }

    fn extract(&self, text: &str) -> Vec<SymbolRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        text.lines()
            .enumerate()
            .map(|(line, name)| SymbolRecord::new(name, line as u32))
            .collect()
    }
}

fn counting_outline(config: OutlineConfig) -> (DocumentOutline, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(CountingExtractor {
        calls: Arc::clone(&calls),
    }));
    let (outline, _rx) = DocumentOutline::with_registry(config, registry);
    (outline, calls)
}

fn php(key: &str, revision: u64, text: &str) -> TextDocument {
    TextDocument::new(key, revision, text, "php")
}

#[test]
fn test_symbols_for_extracts_once_per_revision() {
    let (mut outline, calls) = counting_outline(OutlineConfig::default());
    let doc = TextDocument::new("file:///a", 1, "alpha\nbeta", "counted");

    let first = outline.symbols_for(&doc);
    let second = outline.symbols_for(&doc);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let edited = TextDocument::new("file:///a", 2, "alpha\nbeta\ngamma", "counted");
    assert_eq!(outline.symbols_for(&edited).len(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(outline.len(), 1);
}

#[test]
fn test_unsupported_language_yields_nothing() {
    let (mut outline, _rx) = DocumentOutline::new(OutlineConfig::default());
    let doc = TextDocument::new("main.rs", 1, "fn main() {}", "rust");
    assert!(outline.symbols_for(&doc).is_empty());
    assert!(outline.is_empty());
}

#[test]
fn test_disabled_outline_yields_nothing() {
    let config = OutlineConfig {
        enabled: false,
        ..OutlineConfig::default()
    };
    let (mut outline, _rx) = DocumentOutline::new(config);
    assert!(outline.symbols_for(&php("a.php", 1, "function a() {}")).is_empty());
}

#[test]
fn test_filter_applies_to_results_not_cache() {
    let (mut outline, _rx) = DocumentOutline::new(OutlineConfig::default());
    let doc = php("a.php", 1, "function handleA() {}\nfunction other() {}\nfunction handleB() {}");
    assert_eq!(outline.symbols_for(&doc).len(), 3);

    outline.apply_config(OutlineConfig {
        filter_regex: "^handle".to_string(),
        ..OutlineConfig::default()
    });
    let names: Vec<String> = outline
        .symbols_for(&doc)
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["handleA", "handleB"]);

    // An invalid pattern means no filter
    outline.apply_config(OutlineConfig {
        filter_regex: "([".to_string(),
        ..OutlineConfig::default()
    });
    assert_eq!(outline.symbols_for(&doc).len(), 3);
}

#[test]
fn test_settings_reload_reclamps_and_evicts() {
    let (mut outline, _calls) = counting_outline(OutlineConfig::default());
    for i in 0..20 {
        let doc = TextDocument::new(format!("doc{}", i), 1, "x", "counted");
        outline.symbols_for(&doc);
    }
    assert_eq!(outline.len(), 20);

    outline.apply_config(OutlineConfig {
        max_cache_entries: 3,
        debounce_ms: 1,
        ..OutlineConfig::default()
    });
    assert_eq!(outline.config().max_cache_entries, 10);
    assert_eq!(outline.config().debounce_ms, 25);
    assert_eq!(outline.len(), 10);
    assert_eq!(outline.cached_keys().first().map(String::as_str), Some("doc10"));
    assert_eq!(outline.cached_keys().last().map(String::as_str), Some("doc19"));
}

#[test]
fn test_python_depth_change_reextracts() {
    let (mut outline, _rx) = DocumentOutline::new(OutlineConfig::default());
    let doc = TextDocument::new("m.py", 1, "def a():\n    def b():\n        def c():\n            pass\n", "python");
    assert_eq!(outline.symbols_for(&doc).len(), 2);

    outline.apply_config(OutlineConfig {
        python_max_depth: 2,
        ..OutlineConfig::default()
    });
    assert_eq!(outline.symbols_for(&doc).len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_change_notifications() {
    let (mut outline, mut rx) = DocumentOutline::new(OutlineConfig::default());
    let doc = php("a.php", 1, "function a() {}");
    outline.symbols_for(&doc);

    // Same revision as cached: immediate repaint, no timer
    outline.on_document_changed(&doc);
    assert_eq!(
        rx.try_recv(),
        Ok(RefreshSignal::Repaint {
            key: "a.php".to_string()
        })
    );
    assert!(!outline.is_refresh_pending("a.php"));

    let edited = php("a.php", 2, "function a() {}\nfunction b() {}");
    outline.on_document_changed(&edited);
    assert!(outline.is_refresh_pending("a.php"));
    sleep(Duration::from_millis(300)).await;
    assert_eq!(
        rx.try_recv(),
        Ok(RefreshSignal::Reparse {
            key: "a.php".to_string()
        })
    );
    assert_eq!(outline.symbols_for(&edited).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_close_cancels_and_invalidates() {
    let (mut outline, mut rx) = DocumentOutline::new(OutlineConfig::default());
    outline.symbols_for(&php("a.php", 1, "function a() {}"));
    outline.on_document_changed(&php("a.php", 2, "function b() {}"));

    outline.on_document_closed("a.php");
    assert!(!outline.is_refresh_pending("a.php"));
    assert!(outline.is_empty());

    sleep(Duration::from_secs(1)).await;
    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn test_content_revision_tracks_text() {
    assert_eq!(content_revision("abc"), content_revision("abc"));
    assert_ne!(content_revision("abc"), content_revision("abd"));

    let doc = TextDocument::from_content("k", "function a() {}", "php");
    assert_eq!(doc.revision, content_revision("function a() {}"));
}

#[test]
fn test_change_notification_without_runtime() {
    let (mut outline, mut rx) = DocumentOutline::new(OutlineConfig::default());
    outline.on_document_changed(&php("a.php", 1, "function a() {}"));

    assert_eq!(
        rx.try_recv(),
        Ok(RefreshSignal::Reparse {
            key: "a.php".to_string()
        })
    );
    assert!(!outline.is_refresh_pending("a.php"));
}
