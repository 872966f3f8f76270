use cqlparse_ast::*;
use serde_json::Value;

/// Assert that every statement parses without diagnostics
pub fn assert_clean(source: &str) -> Script {
    let script = cqlparse_parser::parse(source);
    let diagnostics: Vec<_> = script.diagnostics().collect();
    assert!(
        diagnostics.is_empty(),
        "Expected {:?} to parse cleanly, got {:#?}",
        source,
        diagnostics
    );
    script
}

/// Assert the source holds exactly one clean statement and return it
pub fn parse_one(source: &str) -> Statement {
    let script = assert_clean(source);
    assert_eq!(script.statements.len(), 1, "Expected one statement in {:?}", source);
    script
        .statements
        .into_iter()
        .next()
        .and_then(|s| s.statement)
        .expect("statement")
}

/// Assert that the script reports at least one diagnostic with `code`
pub fn assert_has_diagnostic<'a>(script: &'a Script, code: &str) -> &'a Diagnostic {
    script
        .diagnostics()
        .find(|d| d.code == code)
        .unwrap_or_else(|| panic!("Expected diagnostic {}", code))
}

/// JSON form of a tree with every span removed, for structural comparison
pub fn without_spans<T: serde::Serialize>(node: &T) -> Value {
    let mut value = serde_json::to_value(node).expect("serializable tree");
    strip_spans(&mut value);
    value
}

fn strip_spans(value: &mut Value) {
    let is_span = matches!(value, Value::Object(map)
        if map.len() == 2 && map.contains_key("start") && map.contains_key("end"));
    if is_span {
        *value = Value::Null;
        return;
    }
    match value {
        Value::Object(map) => {
            map.remove("span");
            for child in map.values_mut() {
                strip_spans(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_spans),
        _ => {}
    }
}

/// Assert that every span in the tree lies within the span of its nearest
/// enclosing node
pub fn assert_spans_nested<T: serde::Serialize>(node: &T) {
    let value = serde_json::to_value(node).expect("serializable tree");
    check_nested(&value, None, "$");
}

fn as_span(value: &Value) -> Option<(u64, u64)> {
    match value {
        Value::Object(map) if map.len() == 2 => {
            Some((map.get("start")?.as_u64()?, map.get("end")?.as_u64()?))
        }
        _ => None,
    }
}

fn check_within(span: (u64, u64), parent: Option<(u64, u64)>, path: &str) {
    assert!(span.0 <= span.1, "Inverted span {:?} at {}", span, path);
    if let Some(outer) = parent {
        assert!(
            outer.0 <= span.0 && span.1 <= outer.1,
            "Span {:?} at {} escapes its parent {:?}",
            span,
            path,
            outer
        );
    }
}

fn check_nested(value: &Value, parent: Option<(u64, u64)>, path: &str) {
    if let Some(span) = as_span(value) {
        check_within(span, parent, path);
        return;
    }
    match value {
        Value::Object(map) => {
            let own = map.get("span").and_then(as_span);
            if let Some(span) = own {
                check_within(span, parent, path);
            }
            let enclosing = own.or(parent);
            for (key, child) in map.iter().filter(|(key, _)| *key != "span") {
                check_nested(child, enclosing, &format!("{}.{}", path, key));
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                check_nested(item, parent, &format!("{}[{}]", path, i));
            }
        }
        _ => {}
    }
}

/// Print a statement, re-parse it, and assert the trees match
pub fn assert_round_trips(source: &str) {
    let original = parse_one(source);
    let printed = original.to_string();
    let reparsed = parse_one(&printed);
    assert_eq!(
        without_spans(&original),
        without_spans(&reparsed),
        "Round trip changed the tree\n  source:  {}\n  printed: {}",
        source,
        printed
    );
    assert_eq!(printed, reparsed.to_string(), "Printing is not idempotent");
}
