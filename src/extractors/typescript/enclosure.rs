//! Enclosure-based parent inference
//!
//! Collected items carry absolute byte spans in the host document. An item
//! without an explicit parent is given the name of the smallest other item
//! whose span contains it.

use crate::extractors::base::SymbolKind;
use std::cmp::Ordering;

/// A symbol candidate with its absolute span, before parents are final
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CollectedItem {
    pub(crate) name: String,
    pub(crate) line: u32,
    pub(crate) parent: Option<String>,
    pub(crate) kind: SymbolKind,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl CollectedItem {
    /// `self` encloses `other`: it covers the whole span and is strictly larger
    pub(crate) fn encloses(&self, other: &CollectedItem) -> bool {
        self.start <= other.start
            && self.end >= other.end
            && (self.start, self.end) != (other.start, other.end)
    }
}

/// Ascending start, outer-before-inner at equal start
fn span_order(a: &CollectedItem, b: &CollectedItem) -> Ordering {
    a.start.cmp(&b.start).then(b.end.cmp(&a.end))
}

pub(crate) fn sort_by_span(items: &mut [CollectedItem]) {
    items.sort_by(span_order);
}

/// Index of the innermost item enclosing `items[index]`: greatest start, then smallest end
pub(crate) fn innermost_enclosing(items: &[CollectedItem], index: usize) -> Option<usize> {
    let item = &items[index];
    items
        .iter()
        .enumerate()
        .filter(|(i, candidate)| *i != index && candidate.encloses(item))
        .max_by(|(_, a), (_, b)| a.start.cmp(&b.start).then(b.end.cmp(&a.end)))
        .map(|(i, _)| i)
}

/// Sort `items` by span and fill in missing parents.
///
/// `is_scope` decides which kinds may act as a parent; an innermost enclosing
/// item of another kind leaves the parent unset rather than looking further out.
pub(crate) fn infer_parents(items: &mut [CollectedItem], is_scope: impl Fn(SymbolKind) -> bool) {
    sort_by_span(items);

    let inferred: Vec<Option<String>> = (0..items.len())
        .map(|index| {
            if items[index].parent.is_some() {
                return None;
            }
            innermost_enclosing(items, index)
                .filter(|&parent| is_scope(items[parent].kind))
                .map(|parent| items[parent].name.clone())
        })
        .collect();

    for (item, parent) in items.iter_mut().zip(inferred) {
        if item.parent.is_none() {
            item.parent = parent;
        }
    }
}
