// Language detection and alias tests

use crate::language::*;
use std::path::Path;

#[test]
fn test_extension_detection() {
    let cases = [
        ("php", "php"),
        ("phtml", "php"),
        ("py", "python"),
        ("pyi", "python"),
        ("js", "javascript"),
        ("mjs", "javascript"),
        ("jsx", "javascript"),
        ("ts", "typescript"),
        ("tsx", "typescript"),
        ("vue", "vue"),
        ("svelte", "svelte"),
        ("HTML", "html"),
    ];
    for (ext, expected) in cases {
        assert_eq!(detect_language_from_extension(ext), Some(expected), "{}", ext);
    }
    assert_eq!(detect_language_from_extension("rs"), None);
}

#[test]
fn test_detect_language_from_path() {
    assert_eq!(detect_language(Path::new("src/App.vue")), Some("vue"));
    assert_eq!(detect_language(Path::new("lib/util.mts")), Some("typescript"));
    assert_eq!(detect_language(Path::new("README")), None);
}

#[test]
fn test_aliases() {
    assert_eq!(alias_target("typescriptreact"), Some("javascript"));
    assert_eq!(alias_target("svelte"), Some("javascript"));
    assert_eq!(alias_target("vue"), Some("javascript"));
    assert_eq!(alias_target("javascript"), None);
    assert_eq!(alias_target("rust"), None);
}
