//! cqlparse - Error-tolerant CQL3 statement parser
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use cqlparse_ast as ast;
pub use cqlparse_lexer as lexer;
pub use cqlparse_parser as parser;

pub use cqlparse_parser::{parse, parse_statement};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexports_parse_end_to_end() {
        let script = parse("USE ks;");
        assert_eq!(script.statements.len(), 1);
        assert_eq!(
            script.statements[0].statement.as_ref().map(ast::Statement::kind),
            Some(ast::StatementKind::Use)
        );
    }
}
