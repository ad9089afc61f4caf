//! Script segmentation for template-hosting documents
//!
//! Vue and Svelte components and plain markup carry their scripts inside
//! `<script>` blocks. Each block becomes a [`Segment`] that remembers where it
//! starts in the host document, so AST-local positions can be mapped back.

use super::sfc;
use crate::extractors::base::{line_at, ExtractionError, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Naive `<script ...>...</script>` matcher: no nesting, no escaped tags
static SCRIPT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<script\b[^>]*>(.*?)</script>").unwrap());

/// A contiguous script region of a larger host document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// Byte offset of the segment start in the host document
    pub base_offset: usize,
    /// 1-based line of `base_offset` in the host document (0 for the whole-document segment)
    pub base_line: u32,
}

impl Segment {
    /// The entire document as a single segment at offset 0 / line 0
    pub fn whole_document(text: &str) -> Self {
        Self {
            text: text.to_string(),
            base_offset: 0,
            base_line: 0,
        }
    }

    /// Carve `document[start..end]` out as a segment
    pub fn from_range(document: &str, start: usize, end: usize) -> Result<Self> {
        if start > end
            || end > document.len()
            || !document.is_char_boundary(start)
            || !document.is_char_boundary(end)
        {
            return Err(ExtractionError::SegmentBounds {
                start,
                end,
                len: document.len(),
            });
        }

        Ok(Self {
            text: document[start..end].to_string(),
            base_offset: start,
            base_line: line_at(document, start) + 1,
        })
    }
}

/// Which component-aware decomposers the host makes available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmenterCapabilities {
    pub vue: bool,
    pub svelte: bool,
}

impl Default for SegmenterCapabilities {
    fn default() -> Self {
        Self {
            vue: true,
            svelte: true,
        }
    }
}

impl SegmenterCapabilities {
    /// Only the generic `<script>` tag matcher
    pub fn tags_only() -> Self {
        Self {
            vue: false,
            svelte: false,
        }
    }
}

/// Split a document into script segments.
///
/// The decomposers are tried in order (Vue, Svelte, generic tags); a strategy
/// that errors or yields nothing hands over to the next one. A document with no
/// script segments at all is returned as one whole-document segment.
pub fn segment_document(text: &str, capabilities: SegmenterCapabilities) -> Vec<Segment> {
    let mut segments = Vec::new();

    if text.contains("<script") {
        if capabilities.vue {
            match sfc::vue_script_segments(text) {
                Ok(found) => segments = found,
                Err(e) => debug!("Vue decomposer declined document: {}", e),
            }
        }

        if segments.is_empty() && capabilities.svelte {
            match sfc::svelte_script_segments(text) {
                Ok(found) => segments = found,
                Err(e) => debug!("Svelte decomposer declined document: {}", e),
            }
        }

        if segments.is_empty() {
            segments = script_tag_segments(text);
        }
    }

    if segments.is_empty() {
        segments.push(Segment::whole_document(text));
    }

    debug!("Segmented document into {} script segment(s)", segments.len());
    segments
}

/// Every `<script>...</script>` body found by the tag pattern
pub fn script_tag_segments(text: &str) -> Vec<Segment> {
    SCRIPT_TAG_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|body| Segment::from_range(text, body.start(), body.end()).ok())
        .collect()
}
