//! Parser error types

use cqlparse_ast::{Diagnostic, DiagnosticKind, Severity, Span};
use cqlparse_lexer::TokenKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
        rule: &'static str,
    },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof {
        expected: String,
        span: Span,
        rule: &'static str,
    },

    #[error("unrecognized statement starting with {found}")]
    UnrecognizedStatement { found: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span, .. } => *span,
            ParseError::UnrecognizedStatement { span, .. } => *span,
        }
    }

    /// Innermost grammar rule active when the error was raised
    pub fn rule(&self) -> Option<&'static str> {
        match self {
            ParseError::UnexpectedToken { rule, .. } | ParseError::UnexpectedEof { rule, .. } => {
                Some(rule)
            }
            ParseError::UnrecognizedStatement { .. } => None,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ParseError::UnexpectedToken { .. } | ParseError::UnexpectedEof { .. } => {
                DiagnosticKind::SyntaxMismatch
            }
            ParseError::UnrecognizedStatement { .. } => DiagnosticKind::UnrecognizedStatement,
        }
    }

    pub fn unexpected(
        expected: impl Into<String>,
        found: TokenKind,
        span: Span,
        rule: &'static str,
    ) -> Self {
        if found == TokenKind::Eof {
            ParseError::UnexpectedEof {
                expected: expected.into(),
                span,
                rule,
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.into(),
                found: found.describe().to_string(),
                span,
                rule,
            }
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self.rule() {
            Some(rule) => format!("syntax.{}", rule),
            None => "syntax.statement".to_string(),
        };
        Diagnostic {
            severity: Severity::Error,
            kind: self.kind(),
            code,
            message: self.to_string(),
            span: self.span(),
            rule: self.rule().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_becomes_unexpected_eof() {
        let err = ParseError::unexpected("';'", TokenKind::Eof, Span::new(5, 5), "select");
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
        assert_eq!(err.to_string(), "unexpected end of input: expected ';'");
    }

    #[test]
    fn test_diagnostic_carries_rule() {
        let err = ParseError::unexpected("column name", TokenKind::Comma, Span::new(3, 4), "createTable");
        let diag = err.to_diagnostic();
        assert_eq!(diag.kind, DiagnosticKind::SyntaxMismatch);
        assert_eq!(diag.code, "syntax.createTable");
        assert_eq!(diag.rule.as_deref(), Some("createTable"));
        assert_eq!(diag.message, "unexpected token: expected column name, found ','");
    }
}
