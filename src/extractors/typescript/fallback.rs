//! Regex strategy for the JS/TS extractor
//!
//! Used when the tree-sitter engine is unavailable or fails on a document.
//! The source is normalized and masked first, so patterns never match inside
//! comments or literals. Spans come from brace counting over the masked text.
//!
//! Output carries only `name` and `line`: kinds and parents are computed for
//! ordering and scoping but are not part of the returned records.

use super::enclosure::{infer_parents, CollectedItem};
use super::helpers::is_control_keyword;
use super::masking::mask_literals;
use super::segments::script_tag_segments;
use crate::extractors::base::{dedupe_records, LineIndex, Result, SymbolKind, SymbolRecord};
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

const MODIFIERS: &str =
    r"(?:(?:public|private|protected|static|async|readonly|override|abstract|declare|get|set)\s+)*";

static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+([A-Za-z_$][\w$]*)").unwrap());
static INTERFACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\binterface\s+([A-Za-z_$][\w$]*)").unwrap());
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bfunction\s*\*?\s*([A-Za-z_$][\w$]*)\s*(?:<[^>(]*>)?\s*\(").unwrap()
});
static ASSIGNED_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=;\n]+)?=\s*(?:async\s+)?(?:function\b|(?:\([^)]*\)|[A-Za-z_$][\w$]*)[ \t]*(?::[ \t]*[^=;{\n]+)?=>)",
    )
    .unwrap()
});
static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:^|[\s;}}]){}\*?\s*([A-Za-z_$][\w$]*)\s*(?:<[^>(]*>)?\s*\([^)]*\)\s*(?::[ \t]*[^{{;=\n]+)?\s*\{{",
        MODIFIERS
    ))
    .unwrap()
});
static PROPERTY_ARROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:^|[\s;}}]){}([A-Za-z_$][\w$]*)\s*(?::[^=;\n]+)?=\s*(?:async\s+)?(?:function\b|(?:\([^)]*\)|[A-Za-z_$][\w$]*)[ \t]*(?::[ \t]*[^=;{{\n]+)?=>)",
        MODIFIERS
    ))
    .unwrap()
});
static HOOK_ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*use[A-Z][\w$]*\s*\(").unwrap()
});
static HOOK_CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(use[A-Z][\w$]*)\s*\(").unwrap());

/// Strip a leading BOM and turn `\r\n` and lone `\r` into `\n`
pub fn normalize_source(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Offset of the `}` balancing the first `{` at or after `from`, or the end of text
fn body_end(masked: &str, from: usize) -> usize {
    let bytes = masked.as_bytes();
    let Some(open) = masked[from..].find('{').map(|rel| from + rel) else {
        return masked.len();
    };

    let mut depth = 0usize;
    for (i, &byte) in bytes.iter().enumerate().skip(open) {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
    }
    masked.len()
}

/// End of an assigned function: its braced body, or the `;` closing an expression body
fn assignment_end(masked: &str, from: usize) -> usize {
    let rest = &masked[from..];
    match (rest.find('{'), rest.find(';')) {
        (Some(brace), Some(semi)) if semi < brace => from + semi + 1,
        (None, Some(semi)) => from + semi + 1,
        _ => body_end(masked, from),
    }
}

/// Brace depth before every byte of `text`, relative to its start
fn depth_map(text: &str) -> Vec<i32> {
    let mut depths = Vec::with_capacity(text.len());
    let mut depth = 0i32;
    for byte in text.bytes() {
        depths.push(depth);
        match byte {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
    }
    depths
}

struct Collector<'a> {
    masked: &'a str,
    lines: LineIndex,
    items: Vec<CollectedItem>,
    seen: HashSet<(String, u32, SymbolKind)>,
}

impl<'a> Collector<'a> {
    fn new(masked: &'a str) -> Self {
        Self {
            masked,
            lines: LineIndex::new(masked),
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn push(&mut self, name: &str, kind: SymbolKind, start: usize, end: usize) {
        let line = self.lines.line_of(start);
        if !self.seen.insert((name.to_string(), line, kind)) {
            return;
        }
        self.items.push(CollectedItem {
            name: name.to_string(),
            line,
            parent: None,
            kind,
            start,
            end,
        });
    }

    fn scan_declarations(&mut self, re: &Regex, kind: SymbolKind, assignment: bool) {
        let masked = self.masked;
        for caps in re.captures_iter(masked) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let end = if assignment {
                assignment_end(masked, whole.end())
            } else {
                body_end(masked, whole.start())
            };
            self.push(name.as_str(), kind, whole.start(), end);
        }
    }

    /// Methods and property arrows directly inside each class body
    fn scan_class_members(&mut self) {
        let classes: Vec<(usize, usize)> = self
            .items
            .iter()
            .filter(|item| item.kind == SymbolKind::Class)
            .map(|item| (item.start, item.end))
            .collect();

        let masked = self.masked;
        for (class_start, class_end) in classes {
            let Some(open) = masked[class_start..class_end].find('{') else {
                continue;
            };
            let body_start = class_start + open + 1;
            let body_stop = if masked[..class_end].ends_with('}') {
                (class_end - 1).max(body_start)
            } else {
                class_end
            };
            let body = &masked[body_start..body_stop];
            let depths = depth_map(body);

            let members: Vec<(String, usize, usize)> = METHOD_RE
                .captures_iter(body)
                .filter_map(|caps| self.member_span(&caps, body_start, &depths, true))
                .chain(
                    PROPERTY_ARROW_RE
                        .captures_iter(body)
                        .filter_map(|caps| self.member_span(&caps, body_start, &depths, false)),
                )
                .collect();

            for (name, start, end) in members {
                self.push(&name, SymbolKind::Function, start, end);
            }
        }
    }

    fn member_span(
        &self,
        caps: &Captures,
        body_start: usize,
        depths: &[i32],
        braced: bool,
    ) -> Option<(String, usize, usize)> {
        let name = caps.get(1)?;
        let whole = caps.get(0)?;
        if depths.get(name.start()).copied() != Some(0) || is_control_keyword(name.as_str()) {
            return None;
        }
        let start = body_start + name.start();
        let end = if braced {
            // The match ends right after the opening brace of the method body
            body_end(self.masked, body_start + whole.end() - 1)
        } else {
            assignment_end(self.masked, body_start + whole.end())
        };
        Some((name.as_str().to_string(), start, end))
    }

    fn scan_hooks(&mut self) {
        let masked = self.masked;
        for caps in HOOK_ASSIGN_RE.captures_iter(masked) {
            if let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) {
                self.push(name.as_str(), SymbolKind::Function, whole.start(), whole.end());
            }
        }
        for caps in HOOK_CALL_RE.captures_iter(masked) {
            if let Some(name) = caps.get(1) {
                self.push(name.as_str(), SymbolKind::Function, name.start(), name.end());
            }
        }
    }
}

/// Collected items with spans and scoped parents, in ascending start order
pub(crate) fn collect_items(text: &str) -> Result<Vec<CollectedItem>> {
    let normalized = normalize_source(text);
    let source = if normalized.contains("<script") {
        let bodies: Vec<String> = script_tag_segments(&normalized)
            .into_iter()
            .map(|segment| segment.text)
            .collect();
        if bodies.is_empty() {
            normalized
        } else {
            bodies.join("\n")
        }
    } else {
        normalized
    };

    let masked = mask_literals(&source)?;
    let mut collector = Collector::new(&masked);
    collector.scan_declarations(&CLASS_RE, SymbolKind::Class, false);
    collector.scan_declarations(&INTERFACE_RE, SymbolKind::Interface, false);
    collector.scan_declarations(&FUNCTION_RE, SymbolKind::Function, false);
    collector.scan_declarations(&ASSIGNED_FUNCTION_RE, SymbolKind::Function, true);
    collector.scan_class_members();
    collector.scan_hooks();

    let mut items = collector.items;
    infer_parents(&mut items, |kind| {
        matches!(kind, SymbolKind::Function | SymbolKind::Class)
    });
    Ok(items)
}

/// Name/line records from the regex strategy
pub fn extract(text: &str) -> Result<Vec<SymbolRecord>> {
    let records = collect_items(text)?
        .into_iter()
        .map(|item| SymbolRecord::new(item.name, item.line))
        .collect();
    Ok(dedupe_records(records))
}
