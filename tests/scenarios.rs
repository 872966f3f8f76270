//! End-to-end parsing of representative scripts

use cqlparse_ast::*;
use cqlparse_parser::{parse, parse_statement};

mod common;
use common::*;

#[test]
fn test_select_with_where_and_limit() {
    let statement = parse_one("SELECT name, age FROM users WHERE id = 5 LIMIT 10;");
    let Statement::Select(select) = statement else {
        panic!("expected SELECT, got {:?}", statement.kind());
    };

    let Some(SelectElements::List(elements)) = &select.elements else {
        panic!("expected an element list");
    };
    let names: Vec<_> = elements
        .iter()
        .map(|e| match &e.kind {
            SelectElementKind::Column(c) => c.name.as_str(),
            other => panic!("unexpected element {:?}", other),
        })
        .collect();
    assert_eq!(names, ["name", "age"]);

    let table = select.from.as_ref().and_then(|f| f.table.as_ref()).expect("table");
    assert_eq!(table.name.name, "users");
    assert!(table.keyspace.is_none());

    let relations = &select.where_clause.as_ref().expect("where").relations;
    assert_eq!(relations.len(), 1);
    match &relations[0].kind {
        RelationKind::Compare { column, op, value } => {
            assert_eq!(column.column.name, "id");
            assert_eq!(*op, CompareOp::Eq);
            assert_eq!(value.kind, ConstantKind::Decimal("5".into()));
        }
        other => panic!("unexpected relation {:?}", other),
    }
    assert_eq!(
        select.limit.map(|l| l.kind),
        Some(ConstantKind::Decimal("10".into()))
    );
}

#[test]
fn test_create_table_with_keyspace_and_collection() {
    let statement =
        parse_one("CREATE TABLE IF NOT EXISTS ks.t (id uuid PRIMARY KEY, tags set<text>);");
    let Statement::CreateTable(table) = statement else {
        panic!("expected CREATE TABLE, got {:?}", statement.kind());
    };

    assert!(table.if_not_exists);
    assert_eq!(table.name.keyspace.as_ref().map(|k| k.name.as_str()), Some("ks"));
    assert_eq!(table.name.name.name, "t");
    assert_eq!(table.columns.len(), 2);
    assert!(table.columns[0].primary_key);
    assert_eq!(table.columns[1].data_type.to_string(), "set<text>");
    assert!(matches!(
        &table.columns[1].data_type.kind,
        DataTypeKind::Set(inner) if inner.kind == DataTypeKind::Primitive(PrimitiveType::Text)
    ));
}

#[test]
fn test_select_missing_elements_is_a_gap() {
    let script = parse("SELECT FROM users;");
    assert_eq!(script.statements.len(), 1);

    let entry = &script.statements[0];
    let Some(Statement::Select(select)) = &entry.statement else {
        panic!("expected a SELECT tree despite the gap");
    };
    assert!(select.elements.is_none());
    assert!(select.from.is_some());

    assert_eq!(entry.diagnostics.len(), 1);
    let gap = assert_has_diagnostic(&script, GAP_SELECT_ELEMENTS);
    assert_eq!(gap.kind, DiagnosticKind::StructuralGap);
}

#[test]
fn test_counter_increment_form() {
    let statement = parse_one("UPDATE t SET counter = counter + 1 WHERE id = 3;");
    let Statement::Update(update) = statement else {
        panic!("expected UPDATE, got {:?}", statement.kind());
    };

    assert_eq!(update.assignments.len(), 1);
    let assignment = &update.assignments[0];
    assert_eq!(assignment.column.name, "counter");
    match &assignment.kind {
        AssignmentKind::Counter { source, op, amount } => {
            assert_eq!(source.name, "counter");
            assert_eq!(*op, ArithOp::Add);
            assert_eq!(amount.kind, ConstantKind::Decimal("1".into()));
        }
        other => panic!("expected the counter form, got {:?}", other),
    }
}

#[test]
fn test_keywords_are_case_insensitive() {
    let upper = parse_one("SELECT a FROM t WHERE k IN (1, 2) ALLOW FILTERING");
    let lower = parse_one("select a from t where k in (1, 2) allow filtering");
    assert_eq!(without_spans(&upper), without_spans(&lower));
}

#[test]
fn test_empty_and_blank_scripts() {
    for source in ["", "   \n\t", ";;;", "/* nothing */ ; // here"] {
        let script = parse(source);
        assert!(script.statements.is_empty(), "{:?}", source);
        assert!(script.is_clean());
    }
}

#[test]
fn test_statement_kinds_across_families() {
    let source = "\
        USE ks;\
        CREATE KEYSPACE k WITH REPLICATION = {'class': 'SimpleStrategy'};\
        ALTER TABLE t DROP COMPACT STORAGE;\
        DROP INDEX i;\
        CREATE OR REPLACE FUNCTION f(x int) CALLED ON NULL INPUT RETURNS int LANGUAGE java AS 'return x;';\
        GRANT SELECT ON ALL KEYSPACES TO r;\
        LIST ROLES;\
        TRUNCATE t;";
    let script = assert_clean(source);
    let kinds: Vec<_> = script.parsed().map(Statement::kind).collect();
    assert_eq!(
        kinds,
        [
            StatementKind::Use,
            StatementKind::CreateKeyspace,
            StatementKind::AlterTable,
            StatementKind::DropIndex,
            StatementKind::CreateFunction,
            StatementKind::Grant,
            StatementKind::ListRoles,
            StatementKind::Truncate,
        ]
    );
}

#[test]
fn test_unrecognized_statement() {
    let script = parse("CREATE BANANA x;");
    assert_eq!(script.statements.len(), 1);
    assert!(script.statements[0].statement.is_none());
    let diagnostic = assert_has_diagnostic(&script, "syntax.statement");
    assert_eq!(diagnostic.kind, DiagnosticKind::UnrecognizedStatement);
}

#[test]
fn test_mismatch_names_rule_and_position() {
    let source = "SELECT a FROM t WHERE";
    let script = parse(source);
    let diagnostic = script.diagnostics().next().expect("diagnostic");
    assert_eq!(diagnostic.kind, DiagnosticKind::SyntaxMismatch);
    assert_eq!(diagnostic.rule.as_deref(), Some("relationElement"));
    assert_eq!(diagnostic.span.start, source.len());
}

#[test]
fn test_parse_statement_reports_residual_tokens() {
    let result = parse_statement("USE ks; USE other;");
    assert!(result.statement.is_some());
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.residual, 3);
}

#[test]
fn test_statement_at_offset() {
    let source = "USE ks;\nSELECT * FROM t WHERE;\nTRUNCATE t;";
    let script = parse(source);
    let second = source.find("FROM").expect("offset");

    let entry = script.statement_at(second).expect("entry at offset");
    assert_eq!(entry.span, script.statements[1].span);
    assert!(entry.statement.is_none());

    let last = script.statement_at(source.len() - 1).expect("cursor at end of last");
    assert_eq!(last.span.end, source.len() - 1);
    assert!(script.statement_at(source.len()).is_none());
    let end_of_first = script.statement_at(6).expect("entry ending at offset");
    assert!(end_of_first.is_clean());
}
