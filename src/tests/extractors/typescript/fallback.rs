// Regex strategy through the public extractor: name/line records only

use crate::extractors::base::{SymbolExtractor, SymbolRecord};
use crate::extractors::typescript::TypeScriptExtractor;

fn extract(code: &str) -> Vec<SymbolRecord> {
    TypeScriptExtractor::regex_only().extract(code)
}

fn names(symbols: &[SymbolRecord]) -> Vec<&str> {
    symbols.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn test_class_with_method_drops_kind_and_parent() {
    let symbols = extract("class C { method() {} }");
    assert_eq!(
        symbols,
        vec![SymbolRecord::new("C", 0), SymbolRecord::new("method", 0)]
    );
}

#[test]
fn test_declaration_patterns_in_start_order() {
    let code = r#"interface Props {
  title: string;
}
export class Panel {
  constructor(props: Props) {}
  private toggle(): void {
    if (this.open) { this.close(); }
  }
  onClick = (event) => {
    this.toggle();
  };
}
function helper(a, b) {
  return a + b;
}
const double = (n) => n * 2;
let legacy = function () {};
"#;
    let symbols = extract(code);
    assert_eq!(
        symbols,
        vec![
            SymbolRecord::new("Props", 0),
            SymbolRecord::new("Panel", 3),
            SymbolRecord::new("constructor", 4),
            SymbolRecord::new("toggle", 5),
            SymbolRecord::new("onClick", 8),
            SymbolRecord::new("helper", 12),
            SymbolRecord::new("double", 15),
            SymbolRecord::new("legacy", 16),
        ]
    );
}

#[test]
fn test_comments_and_strings_are_masked() {
    let code = "// function commented() {}\nconst msg = \"class Fake {}\";\nconst tpl = `function inTemplate() {}`;\n/*\nfunction blockCommented() {}\n*/\nfunction visible() {}\n";
    assert_eq!(extract(code), vec![SymbolRecord::new("visible", 6)]);
}

#[test]
fn test_hook_idioms() {
    let code = "function App() {\n  const theme = useTheme();\n  useEffect(() => {}, []);\n}\n";
    let symbols = extract(code);
    assert_eq!(names(&symbols), vec!["App", "theme", "useTheme", "useEffect"]);
    assert_eq!(symbols[1].line, 1);
    assert_eq!(symbols[3].line, 2);
}

#[test]
fn test_crlf_and_bom_are_normalized() {
    let code = "\u{feff}function a() {}\r\nfunction b() {}\rfunction c() {}";
    assert_eq!(
        extract(code),
        vec![
            SymbolRecord::new("a", 0),
            SymbolRecord::new("b", 1),
            SymbolRecord::new("c", 2),
        ]
    );
}

#[test]
fn test_script_blocks_are_joined_without_line_mapping() {
    let doc = "<template><div/></template>\n<script>\nfunction first() {}\n</script>\n<script setup>\nfunction second() {}\n</script>\n";
    // Lines count within the joined script source
    assert_eq!(
        extract(doc),
        vec![SymbolRecord::new("first", 1), SymbolRecord::new("second", 4)]
    );
}

#[test]
fn test_unbalanced_braces_do_not_panic() {
    let symbols = extract("class Open {\n  method() {\n    if (x) {\n");
    assert_eq!(names(&symbols), vec!["Open", "method"]);
    assert!(extract("}}} function x() {").iter().any(|s| s.name == "x"));
}

#[test]
fn test_regex_results_are_deduplicated() {
    let symbols = extract("function twice() {} function twice() {}");
    assert_eq!(symbols, vec![SymbolRecord::new("twice", 0)]);
}

#[test]
fn test_annotation_without_initializer_stops_at_line_end() {
    let code = "let total: number\nconst handler = () => {\n  run();\n}\n";
    assert_eq!(extract(code), vec![SymbolRecord::new("handler", 1)]);
}

#[test]
fn test_annotated_class_field_does_not_swallow_next_member() {
    let code = "class Form {\n  count: number\n  onSubmit = () => {\n    send();\n  }\n}\n";
    assert_eq!(
        extract(code),
        vec![SymbolRecord::new("Form", 0), SymbolRecord::new("onSubmit", 2)]
    );
}
