//! Canonical printing and source spans

use cqlparse_lexer::{tokenize, TokenKind};
use cqlparse_parser::parse;
use proptest::prelude::*;

mod common;
use common::*;

const CORPUS: &[&str] = &[
    "select distinct a as x, t.*, count(*) from ks.t where a > -1.5 and b in (1, 2) order by a desc per partition limit 1 limit 5 allow filtering",
    "SELECT JSON writetime(v), ttl(v) FROM t WHERE token(k) >= token(3) AND m CONTAINS KEY 'a' AND (c1, c2) IN ((1, 2), (3, 4))",
    "INSERT INTO t (k, s, m, l, tp) VALUES (now(), {1, 2}, {'a': 1}, [true, false], (1, 'x')) IF NOT EXISTS USING TTL 5 AND TIMESTAMP 7",
    "INSERT INTO t JSON '{\"k\": \"it''s\"}'",
    "UPDATE ks.t USING TIMESTAMP 9 SET a = 1, s = s - {2}, m = {'b': 2} + m, l = l + [3], m['c'] = 'd' WHERE k = 1 IF a = 1 AND b < 2",
    "BEGIN LOGGED BATCH USING TIMESTAMP 42 DELETE m['k'], v FROM t USING TIMESTAMP 1 WHERE k = 1 IF EXISTS",
    "APPLY BATCH",
    "CREATE TABLE \"Quoted\".\"Name\" (k int, c text static, v frozen<map<text, list<int>>>, PRIMARY KEY ((k), c)) WITH CLUSTERING ORDER BY (c ASC) AND COMPACT STORAGE AND caching = {'keys': 'ALL'}",
    "ALTER TABLE t ALTER v TYPE blob",
    "ALTER TABLE t DROP (a, b)",
    "ALTER TYPE ks.addr RENAME a TO b AND c TO d",
    "CREATE CUSTOM INDEX IF NOT EXISTS i ON t (ENTRIES(m)) USING 'Idx'",
    "CREATE MATERIALIZED VIEW v AS SELECT * FROM t WHERE k IS NOT NULL AND c > 0 PRIMARY KEY (c, k) WITH comment = 'v'",
    "CREATE FUNCTION f(a int, b text) RETURNS NULL ON NULL INPUT RETURNS text LANGUAGE lua AS $$ return b $$",
    "CREATE AGGREGATE ks.agg(int, text) SFUNC f STYPE map<int, text> INITCOND {total: ('a', 2)}",
    "DROP FUNCTION IF EXISTS ks.f(int, text)",
    "CREATE ROLE r WITH OPTIONS = {'k': 'v'} AND SUPERUSER = true",
    "CREATE USER u WITH PASSWORD 'p' SUPERUSER",
    "REVOKE ALL ON ALL FUNCTIONS FROM r",
    "GRANT EXECUTE ON FUNCTION ks.f TO r",
    "LIST MODIFY PERMISSION ON ALL ROLES OF r NORECURSIVE",
    "DROP MATERIALIZED VIEW IF EXISTS ks.v",
];

#[test]
fn test_corpus_round_trips() {
    for source in CORPUS {
        assert_round_trips(source);
    }
}

#[test]
fn test_statement_span_covers_source_text() {
    let source = CORPUS.join(";\n");
    let script = assert_clean(&source);
    let texts: Vec<_> = script
        .parsed()
        .map(|statement| {
            let span = statement.span();
            &source[span.start..span.end]
        })
        .collect();
    assert_eq!(texts, CORPUS);
}

#[test]
fn test_node_spans_nest_within_parents() {
    let source = CORPUS.join(";\n");
    let script = assert_clean(&source);
    assert_spans_nested(&script);
}

#[test]
fn test_printed_keywords_are_upper_case() {
    let statement = parse_one("select a from t where k = 1 limit 2");
    assert_eq!(statement.to_string(), "SELECT a FROM t WHERE k = 1 LIMIT 2");
}

#[test]
fn test_quoted_names_survive_printing() {
    let statement = parse_one("SELECT \"Select\", \"a\"\"b\" FROM \"T\"");
    assert_eq!(statement.to_string(), "SELECT \"Select\", \"a\"\"b\" FROM \"T\"");
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("must not be a keyword", |s| {
        tokenize(s)[0].kind == TokenKind::Ident
    })
}

proptest! {
    #[test]
    fn generated_selects_round_trip(
        columns in prop::collection::vec(identifier(), 1..4),
        table in identifier(),
        key in identifier(),
        value in -1000i64..1000,
        limit in prop::option::of(1u32..100),
    ) {
        let mut source = format!(
            "SELECT {} FROM {} WHERE {} = {}",
            columns.join(", "),
            table,
            key,
            value
        );
        if let Some(limit) = limit {
            source.push_str(&format!(" LIMIT {}", limit));
        }
        let script = parse(&source);
        prop_assert!(script.is_clean(), "{}", source);
        assert_round_trips(&source);
    }

    #[test]
    fn generated_tables_round_trip(
        table in identifier(),
        columns in prop::collection::vec(
            (identifier(), prop::sample::select(&["int", "text", "set<uuid>", "map<text, bigint>", "frozen<tuple<int, text>>"][..])),
            1..5,
        ),
    ) {
        let definitions: Vec<_> = columns
            .iter()
            .map(|(name, ty)| format!("{} {}", name, ty))
            .collect();
        let source = format!(
            "CREATE TABLE {} ({}, PRIMARY KEY ({}))",
            table,
            definitions.join(", "),
            columns[0].0
        );
        assert_round_trips(&source);
    }
}
