// Component file decomposers (Vue SFC and Svelte)
//
// Both formats keep their scripts in top-level `<script>` blocks next to a
// template and styles. The scanner walks top-level blocks only: the body of a
// `<template>`, `<script>` or `<style>` block is skipped as a unit, as are HTML
// comments between blocks.

use super::segments::Segment;
use crate::extractors::base::{ExtractionError, Result};
use regex::Regex;
use std::sync::LazyLock;

static BLOCK_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(template|script|style)\b([^>]*)>").unwrap());
static TEMPLATE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)template\b([^>]*)>").unwrap());
static SETUP_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)setup(?:\s|=|/|$)").unwrap());
static MODULE_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)(?:context\s*=\s*["']module["']|module(?:\s|/|$))"#).unwrap()
});

/// A top-level block of a component file
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TopLevelBlock {
    pub(super) tag: String,
    pub(super) attrs: String,
    pub(super) content_start: usize,
    pub(super) content_end: usize,
}

/// Scan the top-level `<template>`, `<script>` and `<style>` blocks in document order
pub(super) fn top_level_blocks(text: &str) -> Result<Vec<TopLevelBlock>> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some(open) = BLOCK_OPEN_RE.captures_at(text, pos) else {
            break;
        };
        let Some(whole) = open.get(0) else {
            break;
        };

        // A comment opening before the tag hides everything up to its end
        if let Some(rel) = text[pos..whole.start()].find("<!--") {
            let comment_body = pos + rel + 4;
            pos = match text[comment_body..].find("-->") {
                Some(end) => comment_body + end + 3,
                None => text.len(),
            };
            continue;
        }

        let tag = open[1].to_string();
        let attrs = open.get(2).map_or("", |m| m.as_str()).to_string();
        let content_start = whole.end();

        // `<script src="..." />` has no body
        if attrs.trim_end().ends_with('/') {
            pos = content_start;
            continue;
        }

        let close_tag = format!("</{}>", tag);
        let content_end = if tag == "template" {
            matching_template_close(text, content_start)?
        } else {
            text[content_start..]
                .find(&close_tag)
                .map(|rel| content_start + rel)
                .ok_or_else(|| {
                    ExtractionError::Decompose(format!("<{}> block is missing its end tag", tag))
                })?
        };

        pos = content_end + close_tag.len();
        blocks.push(TopLevelBlock {
            tag,
            attrs,
            content_start,
            content_end,
        });
    }

    Ok(blocks)
}

/// Offset of the `</template>` closing the template opened just before `from`
fn matching_template_close(text: &str, from: usize) -> Result<usize> {
    let mut depth = 1usize;
    for caps in TEMPLATE_TAG_RE.captures_iter(&text[from..]) {
        let Some(whole) = caps.get(0) else { continue };
        if &caps[1] == "/" {
            depth -= 1;
            if depth == 0 {
                return Ok(from + whole.start());
            }
        } else if !caps[2].trim_end().ends_with('/') {
            depth += 1;
        }
    }
    Err(ExtractionError::Decompose(
        "<template> block is missing its end tag".to_string(),
    ))
}

/// Pick at most one block per slot, in slot order
fn script_slots<'a>(
    blocks: &'a [TopLevelBlock],
    second_slot: &Regex,
    format_name: &str,
) -> Result<Vec<&'a TopLevelBlock>> {
    let mut first: Option<&TopLevelBlock> = None;
    let mut second: Option<&TopLevelBlock> = None;

    for block in blocks.iter().filter(|b| b.tag == "script") {
        let slot = if second_slot.is_match(&block.attrs) {
            &mut second
        } else {
            &mut first
        };
        if slot.is_some() {
            return Err(ExtractionError::Decompose(format!(
                "{} component can contain only one <script{}> element",
                format_name, block.attrs
            )));
        }
        *slot = Some(block);
    }

    Ok([first, second].into_iter().flatten().collect())
}

/// Vue SFC descriptor view: the `script` block, then the `scriptSetup` block
pub(super) fn vue_script_segments(text: &str) -> Result<Vec<Segment>> {
    let blocks = top_level_blocks(text)?;
    script_slots(&blocks, &SETUP_ATTR_RE, "Vue")?
        .into_iter()
        .map(|block| Segment::from_range(text, block.content_start, block.content_end))
        .collect()
}

/// Svelte view: the `instance` script, then the `module` script
pub(super) fn svelte_script_segments(text: &str) -> Result<Vec<Segment>> {
    let blocks = top_level_blocks(text)?;
    script_slots(&blocks, &MODULE_ATTR_RE, "Svelte")?
        .into_iter()
        .map(|block| Segment::from_range(text, block.content_start, block.content_end))
        .collect()
}
