//! Tree-sitter strategy for the JS/TS extractor
//!
//! Each segment is parsed on its own with the TypeScript grammar (TSX when the
//! segment looks like JSX) and walked depth-first with a stack of enclosing
//! class names.

use super::enclosure::CollectedItem;
use super::helpers::{is_hook_name, ScriptFlavor};
use super::segments::Segment;
use crate::extractors::base::{ExtractionError, Result, SymbolKind};
use tracing::{debug, warn};
use tree_sitter::{Language, Node, Parser};

const FUNCTION_VALUE_KINDS: &[&str] = &[
    "arrow_function",
    "function_expression",
    "function",
    "generator_function",
];

/// Loaded TypeScript/TSX grammars
#[derive(Clone)]
pub struct AstEngine {
    typescript: Language,
    tsx: Language,
}

impl AstEngine {
    /// Load both grammars, or `None` when either cannot be installed in a parser
    pub fn load() -> Option<Self> {
        let engine = Self {
            typescript: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            tsx: tree_sitter_typescript::LANGUAGE_TSX.into(),
        };

        match engine
            .parser_for(ScriptFlavor::Plain)
            .and_then(|_| engine.parser_for(ScriptFlavor::Jsx))
        {
            Ok(_) => Some(engine),
            Err(e) => {
                warn!("TypeScript grammar unavailable, regex strategy only: {}", e);
                None
            }
        }
    }

    fn parser_for(&self, flavor: ScriptFlavor) -> Result<Parser> {
        let language = match flavor {
            ScriptFlavor::Plain => &self.typescript,
            ScriptFlavor::Jsx => &self.tsx,
        };
        let mut parser = Parser::new();
        parser.set_language(language)?;
        Ok(parser)
    }

    /// Walk every segment and collect symbol candidates in host-document coordinates
    pub(crate) fn collect(&self, document: &str, segments: &[Segment]) -> Result<Vec<CollectedItem>> {
        // Applied to every segment of any document mentioning `<script`
        let line_correction = u32::from(document.contains("<script"));
        let mut items = Vec::new();

        for segment in segments {
            let flavor = ScriptFlavor::guess(&segment.text);
            let mut parser = self.parser_for(flavor)?;
            let tree = parser
                .parse(&segment.text, None)
                .ok_or(ExtractionError::ParseAborted {
                    offset: segment.base_offset,
                })?;

            if tree.root_node().has_error() {
                debug!(
                    "Segment at offset {} has syntax errors, keeping partial results",
                    segment.base_offset
                );
            }

            let walk = SegmentWalk {
                segment,
                line_correction,
            };
            let mut classes = Vec::new();
            walk.visit(tree.root_node(), &mut classes, &mut items);
            debug_assert!(classes.is_empty());
        }

        Ok(items)
    }
}

struct SegmentWalk<'a> {
    segment: &'a Segment,
    line_correction: u32,
}

impl SegmentWalk<'_> {
    fn text_of(&self, node: Node) -> Option<&str> {
        node.utf8_text(self.segment.text.as_bytes())
            .ok()
            .filter(|text| !text.is_empty())
    }

    fn field_text(&self, node: Node, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .and_then(|child| self.text_of(child))
            .map(str::to_string)
    }

    fn item(&self, name: String, kind: SymbolKind, node: Node, parent: Option<String>) -> CollectedItem {
        let row = node.start_position().row as u32;
        CollectedItem {
            name,
            line: (self.segment.base_line + row).saturating_sub(self.line_correction),
            parent,
            kind,
            start: self.segment.base_offset + node.start_byte(),
            end: self.segment.base_offset + node.end_byte(),
        }
    }

    /// Name bound by a `variable_declarator` whose initializer is a function or a hook call
    fn function_binding(&self, declarator: Node) -> Option<String> {
        let name = declarator.child_by_field_name("name")?;
        if name.kind() != "identifier" {
            return None;
        }
        let value = declarator.child_by_field_name("value")?;

        let binds_function = FUNCTION_VALUE_KINDS.contains(&value.kind())
            || (value.kind() == "call_expression"
                && value
                    .child_by_field_name("function")
                    .filter(|callee| callee.kind() == "identifier")
                    .and_then(|callee| self.text_of(callee))
                    .is_some_and(is_hook_name));

        if binds_function {
            self.text_of(name).map(str::to_string)
        } else {
            None
        }
    }

    fn visit(&self, node: Node, classes: &mut Vec<String>, items: &mut Vec<CollectedItem>) {
        let mut entered_class = false;

        match node.kind() {
            "function_declaration" | "generator_function_declaration" => {
                if let Some(name) = self.field_text(node, "name") {
                    items.push(self.item(name, SymbolKind::Function, node, None));
                }
            }
            "variable_declarator" => {
                if let Some(name) = self.function_binding(node) {
                    items.push(self.item(name, SymbolKind::Function, node, None));
                }
            }
            "class_declaration" | "abstract_class_declaration" => {
                if let Some(name) = self.field_text(node, "name") {
                    items.push(self.item(name.clone(), SymbolKind::Class, node, None));
                    classes.push(name);
                    entered_class = true;
                }
            }
            "method_definition" => {
                let in_class_body = node.parent().is_some_and(|p| p.kind() == "class_body");
                if in_class_body {
                    if let Some(name) = self.field_text(node, "name") {
                        let parent = classes.last().cloned();
                        items.push(self.item(name, SymbolKind::Function, node, parent));
                    }
                }
            }
            "public_field_definition" | "field_definition" => {
                let holds_function = node
                    .child_by_field_name("value")
                    .is_some_and(|value| FUNCTION_VALUE_KINDS.contains(&value.kind()));
                if holds_function {
                    let name = self
                        .field_text(node, "name")
                        .or_else(|| self.field_text(node, "property"));
                    if let Some(name) = name {
                        let parent = classes.last().cloned();
                        items.push(self.item(name, SymbolKind::Function, node, parent));
                    }
                }
            }
            "interface_declaration" => {
                if let Some(name) = self.field_text(node, "name") {
                    items.push(self.item(name, SymbolKind::Interface, node, None));
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, classes, items);
        }

        if entered_class {
            classes.pop();
        }
    }
}
