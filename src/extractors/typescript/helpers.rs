//! Helper functions for the JS/TS extractor
//!
//! Heuristics shared by the AST walk and the regex fallback.

use regex::Regex;
use std::sync::LazyLock;

static HOOK_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^use[A-Z][A-Za-z0-9_$]*$").unwrap());
static JSX_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z][A-Za-z0-9.:_-]*[\s/>]").unwrap());
static RETURN_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\breturn\s*\(").unwrap());

/// Grammar flavor a segment is parsed with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFlavor {
    Plain,
    Jsx,
}

impl ScriptFlavor {
    /// JSX when the text has both a tag-looking `<Name` and a `return (`
    pub fn guess(text: &str) -> Self {
        if JSX_TAG_RE.is_match(text) && RETURN_PAREN_RE.is_match(text) {
            ScriptFlavor::Jsx
        } else {
            ScriptFlavor::Plain
        }
    }
}

/// `useXxx`: the React hook naming convention
pub(super) fn is_hook_name(name: &str) -> bool {
    HOOK_NAME_RE.is_match(name)
}

/// Reserved words a method-shaped regex match must not be named after
pub(super) fn is_control_keyword(name: &str) -> bool {
    matches!(
        name,
        "if" | "for"
            | "while"
            | "switch"
            | "catch"
            | "function"
            | "return"
            | "with"
            | "else"
            | "do"
            | "new"
            | "typeof"
            | "await"
            | "yield"
    )
}
