use std::fs;

use cqlparse_parser::parse;

mod common;
use common::*;

#[test]
fn test_all_fixtures_parse() {
    let fixtures = discover_fixtures();

    assert!(
        !fixtures.is_empty(),
        "No .cql fixtures found! Check tests/fixtures/ directory."
    );

    let mut failures = Vec::new();

    for path in &fixtures {
        let source = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e));

        let script = parse(&source);
        if script.is_clean() {
            println!("✓ Parsed: {} ({} statements)", path.display(), script.statements.len());
        } else {
            eprintln!("✗ Failed to parse: {}", path.display());
            for diagnostic in script.diagnostics() {
                eprintln!("  {}: {}", diagnostic.code, diagnostic.message);
            }
            failures.push((path.clone(), script.diagnostics().count()));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} out of {} fixtures failed to parse:\n{}",
            failures.len(),
            fixtures.len(),
            failures
                .iter()
                .map(|(path, count)| format!("  - {}: {} diagnostics", path.display(), count))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

#[test]
fn test_fixture_node_spans_nest() {
    for path in discover_fixtures() {
        let source = fs::read_to_string(&path).expect("fixture");
        let script = parse(&source);
        assert_spans_nested(&script);
    }
}

#[test]
fn test_fixture_statement_spans_match_source() {
    for path in discover_fixtures() {
        let source = fs::read_to_string(&path).expect("fixture");
        let script = parse(&source);
        for statement in script.parsed() {
            let span = statement.span();
            let text = &source[span.start..span.end];
            assert!(!text.ends_with(';'), "{}: span includes separator: {:?}", path.display(), text);
            assert_eq!(
                text.trim(),
                text,
                "{}: span has surrounding whitespace",
                path.display()
            );
        }
    }
}

#[test]
fn test_fixture_statement_counts() {
    let counts = [
        ("auth.cql", 17),
        ("functions.cql", 7),
        ("queries.cql", 24),
        ("schema.cql", 22),
    ];
    for (name, expected) in counts {
        let script = assert_clean(&load_fixture(name));
        assert_eq!(script.statements.len(), expected, "{}", name);
    }
}

#[test]
fn test_fixtures_print_and_reparse() {
    for path in discover_fixtures() {
        let source = fs::read_to_string(&path).expect("fixture");
        let script = assert_clean(&source);
        let printed: String = script
            .parsed()
            .map(|statement| format!("{};\n", statement))
            .collect();
        let reparsed = assert_clean(&printed);
        let original: Vec<_> = script.parsed().map(without_spans).collect();
        let again: Vec<_> = reparsed.parsed().map(without_spans).collect();
        assert_eq!(original, again, "{} changed after printing", path.display());
    }
}
