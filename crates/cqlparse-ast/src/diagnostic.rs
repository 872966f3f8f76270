//! Syntax diagnostics and per-document parse results

use serde::{Deserialize, Serialize};
use crate::{Span, Statement};

/// Category used by `rule.select.selectElements` gaps
pub const GAP_SELECT_ELEMENTS: &str = "rule.select.selectElements";
/// Category used when a SELECT has no FROM clause
pub const GAP_SELECT_FROM: &str = "rule.select.fromSpec";
/// Category used when FROM is not followed by a table name
pub const GAP_SELECT_FROM_TABLE: &str = "rule.select.fromSpecElement";

/// Every syntax problem is reported as an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// An expected token or sub-rule was absent
    SyntaxMismatch,
    /// A clause that is optional at token level but required for the statement
    StructuralGap,
    /// The leading keywords match no statement
    UnrecognizedStatement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Stable category string, e.g. `rule.select.fromSpec` or `syntax.createTable`
    pub code: String,
    pub message: String,
    pub span: Span,
    /// Innermost grammar rule active at the failure
    pub rule: Option<String>,
}

impl Diagnostic {
    pub fn structural_gap(code: &str, message: impl Into<String>, span: Span, rule: &str) -> Self {
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::StructuralGap,
            code: code.to_string(),
            message: message.into(),
            span,
            rule: Some(rule.to_string()),
        }
    }

    pub fn is_gap(&self, code: &str) -> bool {
        self.kind == DiagnosticKind::StructuralGap && self.code == code
    }
}

/// One top-level statement: a tree, its diagnostics, or both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub statement: Option<Statement>,
    pub diagnostics: Vec<Diagnostic>,
    /// Tokens this entry accounts for, including skipped ones
    pub span: Span,
}

impl ParsedStatement {
    pub fn is_clean(&self) -> bool {
        self.statement.is_some() && self.diagnostics.is_empty()
    }
}

/// Result of parsing a whole document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Script {
    pub statements: Vec<ParsedStatement>,
    pub span: Span,
}

impl Script {
    pub fn is_clean(&self) -> bool {
        self.statements.iter().all(ParsedStatement::is_clean)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.statements.iter().flat_map(|s| s.diagnostics.iter())
    }

    pub fn parsed(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter().filter_map(|s| s.statement.as_ref())
    }

    /// The statement entry whose span contains `offset`
    pub fn statement_at(&self, offset: usize) -> Option<&ParsedStatement> {
        self.statements
            .iter()
            .find(|s| s.span.contains(offset) || s.span.end == offset)
    }
}
