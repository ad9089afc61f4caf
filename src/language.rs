// Language id helpers
//
// Host editors report ids such as `typescriptreact` or `vue`; the registry
// only knows a handful of extractor ids. The alias table bridges the two.

use std::path::Path;

/// Host language ids served by another extractor id
pub const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("typescriptreact", "javascript"),
    ("javascriptreact", "javascript"),
    ("svelte", "javascript"),
    ("vue", "javascript"),
    ("html", "javascript"),
];

/// Extractor id an aliased language id is routed to
pub fn alias_target(language_id: &str) -> Option<&'static str> {
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == language_id)
        .map(|(_, target)| *target)
}

/// Language id for a file extension (without the dot, case-insensitive)
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "php" | "phtml" => Some("php"),
        "py" | "pyi" => Some("python"),
        "js" | "mjs" | "cjs" | "jsx" => Some("javascript"),
        "ts" | "mts" | "cts" | "tsx" => Some("typescript"),
        "vue" => Some("vue"),
        "svelte" => Some("svelte"),
        "html" | "htm" => Some("html"),
        _ => None,
    }
}

pub fn detect_language(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(detect_language_from_extension)
}
