// TypeScript/JavaScript Extractor Tests
//
// AST strategy over plain scripts. Component files and the regex strategy have
// their own modules.

mod fallback;

use crate::extractors::base::{SymbolExtractor, SymbolKind, SymbolRecord};
use crate::extractors::typescript::TypeScriptExtractor;
use std::collections::HashSet;

pub(super) fn extract(code: &str) -> Vec<SymbolRecord> {
    TypeScriptExtractor::new().extract(code)
}

pub(super) fn function(name: &str, line: u32, parent: Option<&str>) -> SymbolRecord {
    SymbolRecord::new(name, line)
        .with_parent(parent.map(str::to_string))
        .with_kind(SymbolKind::Function)
}

pub(super) fn class(name: &str, line: u32) -> SymbolRecord {
    SymbolRecord::new(name, line).with_kind(SymbolKind::Class)
}

#[test]
fn test_grammar_is_available() {
    assert!(TypeScriptExtractor::new().has_ast_engine());
    assert!(!TypeScriptExtractor::regex_only().has_ast_engine());
}

#[test]
fn test_class_with_method() {
    let symbols = extract("class C { method() {} }");
    assert_eq!(symbols, vec![class("C", 0), function("method", 0, Some("C"))]);
}

#[test]
fn test_function_forms() {
    let code = r#"function declared(a: number): number {
  return a;
}
function* generate() {
  yield 1;
}
const arrow = (x: string) => x.length;
let expression = function () {};
var asyncArrow = async () => {};
const notAFunction = 42;
"#;
    let symbols = extract(code);
    assert_eq!(
        symbols,
        vec![
            function("declared", 0, None),
            function("generate", 3, None),
            function("arrow", 6, None),
            function("expression", 7, None),
            function("asyncArrow", 8, None),
        ]
    );
}

#[test]
fn test_class_property_functions() {
    let code = r#"class Store {
  items: string[] = [];
  load = async () => {
    return fetch('/items');
  };
  handler = function () {};
  static create() { return new Store(); }
}
"#;
    let symbols = extract(code);
    assert_eq!(
        symbols,
        vec![
            class("Store", 0),
            function("load", 2, Some("Store")),
            function("handler", 5, Some("Store")),
            function("create", 6, Some("Store")),
        ]
    );
}

#[test]
fn test_interfaces() {
    let code = "interface Shape {\n  area(): number;\n}\nexport interface Named extends Shape { name: string }\n";
    let symbols = extract(code);
    assert_eq!(
        symbols,
        vec![
            SymbolRecord::new("Shape", 0).with_kind(SymbolKind::Interface),
            SymbolRecord::new("Named", 3).with_kind(SymbolKind::Interface),
        ]
    );
}

#[test]
fn test_innermost_enclosing_function_is_the_parent() {
    let code = r#"function outer() {
  function middle() {
    const inner = () => {
      return 1;
    };
  }
}
"#;
    let symbols = extract(code);
    assert_eq!(
        symbols,
        vec![
            function("outer", 0, None),
            function("middle", 1, Some("outer")),
            function("inner", 2, Some("middle")),
        ]
    );
}

#[test]
fn test_local_class_inside_function() {
    let code = "function factory() {\n  class Local {\n    run() {}\n  }\n  return Local;\n}\n";
    let symbols = extract(code);
    assert_eq!(
        symbols,
        vec![
            function("factory", 0, None),
            SymbolRecord::new("Local", 1)
                .with_parent(Some("factory".to_string()))
                .with_kind(SymbolKind::Class),
            function("run", 2, Some("Local")),
        ]
    );
}

#[test]
fn test_sibling_classes_do_not_leak_parents() {
    let code = "class A {\n  a() {}\n}\nclass B {\n  b() {}\n}\nfunction free() {}\n";
    let symbols = extract(code);
    assert_eq!(
        symbols,
        vec![
            class("A", 0),
            function("a", 1, Some("A")),
            class("B", 3),
            function("b", 4, Some("B")),
            function("free", 6, None),
        ]
    );
}

#[test]
fn test_object_literal_methods_are_not_symbols() {
    assert!(extract("const api = { get() {}, post: 1 };").is_empty());
}

#[test]
fn test_react_hooks_and_jsx() {
    let code = r#"import { useState, useCallback } from 'react';
export function Counter() {
  const [count, setCount] = useState(0);
  const increment = useCallback(() => setCount(count + 1), [count]);
  const label = useMemo(() => `n=${count}`, [count]);
  const total = compute(count);
  return (
    <button onClick={increment}>{label}</button>
  );
}
"#;
    let symbols = extract(code);
    assert_eq!(
        symbols,
        vec![
            function("Counter", 1, None),
            function("increment", 3, Some("Counter")),
            function("label", 4, Some("Counter")),
        ]
    );
}

#[test]
fn test_abstract_and_exported_classes() {
    let code = "export class Page {}\nexport abstract class Base {\n  abstract render(): void;\n  mount() {}\n}\n";
    let symbols = extract(code);
    assert_eq!(
        symbols,
        vec![
            class("Page", 0),
            class("Base", 1),
            function("mount", 3, Some("Base")),
        ]
    );
}

#[test]
fn test_duplicates_are_removed() {
    let symbols = extract("function a() {} function a() {}");
    assert_eq!(symbols, vec![function("a", 0, None)]);
}

#[test]
fn test_extraction_is_deterministic() {
    let code = "class A { x() {} }\nconst f = () => { class B { y = () => 1 } };\ninterface I {}\n";
    assert_eq!(extract(code), extract(code));
}

#[test]
fn test_invalid_source_degrades_quietly() {
    let inputs = [
        "function broken( {\n  class \nconst = => ;;",
        "const s = `unterminated\nfunction f() {",
        "}}}}{{{{",
        "",
    ];
    for input in inputs {
        let symbols = extract(input);
        let unique: HashSet<_> = symbols.iter().cloned().collect();
        assert_eq!(unique.len(), symbols.len(), "duplicates for {:?}", input);
    }
}

#[test]
fn test_script_substring_shifts_lines_in_plain_files() {
    // Any `<script` in the document triggers the one-line correction
    let code = "const tpl = \"<script>\";\nfunction f() {}\n";
    assert_eq!(extract(code), vec![function("f", 0, None)]);
}

#[test]
fn test_language_id_and_extensions() {
    let extractor = TypeScriptExtractor::new();
    assert_eq!(extractor.language_id(), "javascript");
    for ext in ["js", "jsx", "ts", "tsx", "vue", "svelte", "html"] {
        assert!(extractor.extensions().contains(&ext), "missing {}", ext);
    }
}
