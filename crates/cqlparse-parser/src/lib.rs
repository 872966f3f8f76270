//! cqlparse Parser - Recursive descent parser for CQL3
//!
//! Turns a token stream into typed statement trees.
//! Parsing never aborts a document:
//! - each statement is parsed independently; a failure resynchronizes at
//!   the next `;` and the rest of the script is still parsed
//! - missing SELECT elements, FROM clause or FROM table are reported as
//!   named structural gaps on an otherwise complete tree
//! - statement alternatives are chosen with at most three tokens of
//!   lookahead; checkpoints are only used to tell set literals from maps

mod error;
mod stream;
mod parser;
mod expr;
mod dml;
mod ddl;
mod routine;
mod dcl;
mod script;

pub use error::*;
pub use parser::Parser;
pub use script::StatementResult;
pub use stream::{Mark, TokenStream};

use cqlparse_ast::Script;
use cqlparse_lexer::{tokenize, Token};

/// Parse a source string into a script of statements and diagnostics
pub fn parse(source: &str) -> Script {
    parse_tokens(source, tokenize(source))
}

/// Parse an already tokenized source
pub fn parse_tokens(source: &str, tokens: Vec<Token>) -> Script {
    let mut parser = Parser::new(source, tokens);
    parser.parse_script()
}

/// Parse the first statement of `source`
pub fn parse_statement(source: &str) -> StatementResult {
    let mut parser = Parser::new(source, tokenize(source));
    parser.parse_single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cqlparse_ast::*;

    #[test]
    fn test_parse_select_scenario() {
        let script = parse("SELECT name, age FROM users WHERE id = 5 LIMIT 10;");
        assert!(script.is_clean(), "{:?}", script.diagnostics().collect::<Vec<_>>());
        let Some(Statement::Select(select)) = script.parsed().next() else {
            panic!("expected a select statement");
        };
        let Some(SelectElements::List(elements)) = &select.elements else {
            panic!("expected an element list");
        };
        let names: Vec<_> = elements.iter().map(|e| e.to_string()).collect();
        assert_eq!(names, vec!["name", "age"]);
        let table = select.from.as_ref().and_then(|f| f.table.as_ref()).unwrap();
        assert_eq!(table.name.name, "users");
        assert_eq!(select.where_clause.as_ref().unwrap().relations.len(), 1);
        assert_eq!(select.limit.as_ref().and_then(Constant::as_i64), Some(10));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let script = parse("select * from T where K = 1 allow filtering");
        assert!(script.is_clean());
    }

    #[test]
    fn test_parse_empty_source() {
        let script = parse("   -- nothing here\n");
        assert!(script.statements.is_empty());
        assert!(script.is_clean());
    }

    #[test]
    fn test_parse_statement_reports_gap() {
        let result = parse_statement("SELECT FROM users;");
        assert!(matches!(result.statement, Some(Statement::Select(_))));
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].is_gap(GAP_SELECT_ELEMENTS));
    }

    #[test]
    fn test_lexer_error_token_is_a_mismatch() {
        let script = parse("SELECT a FROM t WHERE a = @; USE ks;");
        assert_eq!(script.statements.len(), 2);
        assert_eq!(script.statements[0].diagnostics[0].kind, DiagnosticKind::SyntaxMismatch);
        assert!(script.statements[1].is_clean());
    }

    #[test]
    fn test_script_serializes_to_json() {
        let script = parse("USE ks;");
        let json = serde_json::to_value(&script).unwrap();
        assert_eq!(json["statements"][0]["statement"]["Use"]["keyspace"]["name"], "ks");
    }
}
