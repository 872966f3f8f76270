//! Statement dispatch, separators and error recovery

use cqlparse_ast::*;
use cqlparse_lexer::TokenKind;
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::parser::{Parser, Result};

/// Outcome of parsing exactly one statement
#[derive(Debug, Clone, PartialEq)]
pub struct StatementResult {
    pub statement: Option<Statement>,
    pub diagnostics: Vec<Diagnostic>,
    /// Index of the first token not consumed by the statement
    pub residual: usize,
}

impl<'a> Parser<'a> {
    /// Parse every statement in the document, recovering at `;` after errors
    pub fn parse_script(&mut self) -> Script {
        let start = self.start();
        let mut statements = Vec::new();
        loop {
            self.skip_empty_statements();
            if self.stream.is_at_end() {
                break;
            }
            statements.push(self.parse_next());
        }
        Script {
            span: start.merge(self.start()),
            statements,
        }
    }

    /// Parse one statement and report where it stopped, without recovery
    pub fn parse_single(&mut self) -> StatementResult {
        self.skip_empty_statements();
        self.gaps.clear();
        match self.parse_statement() {
            Ok(statement) => {
                self.eat(TokenKind::CommentMarker);
                self.eat(TokenKind::Semicolon);
                StatementResult {
                    statement: Some(statement),
                    diagnostics: std::mem::take(&mut self.gaps),
                    residual: self.stream.position(),
                }
            }
            Err(err) => {
                let mut diagnostics = std::mem::take(&mut self.gaps);
                diagnostics.push(err.to_diagnostic());
                StatementResult {
                    statement: None,
                    diagnostics,
                    residual: self.stream.position(),
                }
            }
        }
    }

    /// Bare `;` and stray comment markers between statements
    fn skip_empty_statements(&mut self) {
        while self.eat(TokenKind::Semicolon) || self.eat(TokenKind::CommentMarker) {}
    }

    fn parse_next(&mut self) -> ParsedStatement {
        let start = self.start();
        self.gaps.clear();
        let (statement, diagnostics) = match self.parse_statement() {
            Ok(statement) => {
                let mut diagnostics = std::mem::take(&mut self.gaps);
                self.eat(TokenKind::CommentMarker);
                if !self.at(TokenKind::Semicolon) && !self.stream.is_at_end() {
                    let rule = statement.kind().rule_name();
                    let token = self.stream.peek(0);
                    let err = ParseError::unexpected("';'", token.kind, token.span, rule);
                    diagnostics.push(err.to_diagnostic());
                    self.synchronize();
                }
                (Some(statement), diagnostics)
            }
            Err(err) => {
                let mut diagnostics = std::mem::take(&mut self.gaps);
                debug!(error = %err, offset = err.span().start, "statement failed to parse");
                diagnostics.push(err.to_diagnostic());
                self.synchronize();
                (None, diagnostics)
            }
        };
        ParsedStatement {
            statement,
            diagnostics,
            span: self.finish(start),
        }
    }

    /// Skip to the next `;` or end of input
    fn synchronize(&mut self) {
        let mut skipped = 0usize;
        while !self.at(TokenKind::Semicolon) && !self.stream.is_at_end() {
            self.advance();
            skipped += 1;
        }
        debug!(skipped, "resynchronized at statement boundary");
    }

    /// Choose a statement rule from the first one to three tokens
    pub(crate) fn parse_statement(&mut self) -> Result<Statement> {
        trace!(token = ?self.peek(), offset = self.start().start, "dispatching statement");
        match self.peek() {
            TokenKind::Select => Ok(Statement::Select(self.rule("select", Self::parse_select)?)),
            TokenKind::Insert | TokenKind::Update | TokenKind::Delete => {
                self.parse_modification(None)
            }
            TokenKind::Begin => {
                let batch = self.parse_begin_batch()?;
                if !self.at_any(&[TokenKind::Insert, TokenKind::Update, TokenKind::Delete]) {
                    return Err(self.expected("'INSERT', 'UPDATE' or 'DELETE'"));
                }
                self.parse_modification(Some(batch))
            }
            TokenKind::Apply => Ok(Statement::ApplyBatch(
                self.rule("applyBatch", Self::parse_apply_batch)?,
            )),
            TokenKind::Truncate => Ok(Statement::Truncate(
                self.rule("truncate", Self::parse_truncate)?,
            )),
            TokenKind::Use => Ok(Statement::Use(self.rule("use", Self::parse_use)?)),
            TokenKind::Create => self.parse_create(),
            TokenKind::Alter => self.parse_alter(),
            TokenKind::Drop => self.parse_drop(),
            TokenKind::Grant => Ok(Statement::Grant(self.rule("grant", Self::parse_grant)?)),
            TokenKind::Revoke => Ok(Statement::Revoke(self.rule("revoke", Self::parse_revoke)?)),
            TokenKind::List if self.peek_at(1) == TokenKind::Roles => Ok(Statement::ListRoles(
                self.rule("listRoles", Self::parse_list_roles)?,
            )),
            TokenKind::List => Ok(Statement::ListPermissions(
                self.rule("listPermissions", Self::parse_list_permissions)?,
            )),
            _ => Err(self.unrecognized(1)),
        }
    }

    fn parse_modification(&mut self, batch: Option<BeginBatch>) -> Result<Statement> {
        match self.peek() {
            TokenKind::Insert => Ok(Statement::Insert(
                self.rule("insert", |p| p.parse_insert(batch))?,
            )),
            TokenKind::Update => Ok(Statement::Update(
                self.rule("update", |p| p.parse_update(batch))?,
            )),
            _ => Ok(Statement::Delete(
                self.rule("delete", |p| p.parse_delete(batch))?,
            )),
        }
    }

    fn parse_create(&mut self) -> Result<Statement> {
        let object = match self.peek_at(1) {
            TokenKind::Or => self.peek_at(3),
            kind => kind,
        };
        match object {
            TokenKind::Keyspace | TokenKind::Schema => Ok(Statement::CreateKeyspace(
                self.rule("createKeyspace", Self::parse_create_keyspace)?,
            )),
            TokenKind::Table | TokenKind::Columnfamily => Ok(Statement::CreateTable(
                self.rule("createTable", Self::parse_create_table)?,
            )),
            TokenKind::Type => Ok(Statement::CreateType(
                self.rule("createType", Self::parse_create_type)?,
            )),
            TokenKind::Index | TokenKind::Custom => Ok(Statement::CreateIndex(
                self.rule("createIndex", Self::parse_create_index)?,
            )),
            TokenKind::Trigger => Ok(Statement::CreateTrigger(
                self.rule("createTrigger", Self::parse_create_trigger)?,
            )),
            TokenKind::Materialized => Ok(Statement::CreateMaterializedView(
                self.rule("createMaterializedView", Self::parse_create_materialized_view)?,
            )),
            TokenKind::Function => Ok(Statement::CreateFunction(
                self.rule("createFunction", Self::parse_create_function)?,
            )),
            TokenKind::Aggregate => Ok(Statement::CreateAggregate(
                self.rule("createAggregate", Self::parse_create_aggregate)?,
            )),
            TokenKind::Role => Ok(Statement::CreateRole(
                self.rule("createRole", Self::parse_create_role)?,
            )),
            TokenKind::User => Ok(Statement::CreateUser(
                self.rule("createUser", Self::parse_create_user)?,
            )),
            _ if self.peek_at(1) == TokenKind::Or => Err(self.unrecognized(4)),
            _ => Err(self.unrecognized(2)),
        }
    }

    fn parse_alter(&mut self) -> Result<Statement> {
        match self.peek_at(1) {
            TokenKind::Keyspace | TokenKind::Schema => Ok(Statement::AlterKeyspace(
                self.rule("alterKeyspace", Self::parse_alter_keyspace)?,
            )),
            TokenKind::Table | TokenKind::Columnfamily => Ok(Statement::AlterTable(
                self.rule("alterTable", Self::parse_alter_table)?,
            )),
            TokenKind::Type => Ok(Statement::AlterType(
                self.rule("alterType", Self::parse_alter_type)?,
            )),
            TokenKind::Materialized => Ok(Statement::AlterMaterializedView(
                self.rule("alterMaterializedView", Self::parse_alter_materialized_view)?,
            )),
            TokenKind::Role => Ok(Statement::AlterRole(
                self.rule("alterRole", Self::parse_alter_role)?,
            )),
            TokenKind::User => Ok(Statement::AlterUser(
                self.rule("alterUser", Self::parse_alter_user)?,
            )),
            _ => Err(self.unrecognized(2)),
        }
    }

    fn parse_drop(&mut self) -> Result<Statement> {
        match self.peek_at(1) {
            TokenKind::Keyspace | TokenKind::Schema => Ok(Statement::DropKeyspace(
                self.rule("dropKeyspace", Self::parse_drop_keyspace)?,
            )),
            TokenKind::Table | TokenKind::Columnfamily => Ok(Statement::DropTable(
                self.rule("dropTable", Self::parse_drop_table)?,
            )),
            TokenKind::Type => Ok(Statement::DropType(
                self.rule("dropType", Self::parse_drop_type)?,
            )),
            TokenKind::Index => Ok(Statement::DropIndex(
                self.rule("dropIndex", Self::parse_drop_index)?,
            )),
            TokenKind::Trigger => Ok(Statement::DropTrigger(
                self.rule("dropTrigger", Self::parse_drop_trigger)?,
            )),
            TokenKind::Materialized => Ok(Statement::DropMaterializedView(
                self.rule("dropMaterializedView", Self::parse_drop_materialized_view)?,
            )),
            TokenKind::Function => Ok(Statement::DropFunction(
                self.rule("dropFunction", Self::parse_drop_function)?,
            )),
            TokenKind::Aggregate => Ok(Statement::DropAggregate(
                self.rule("dropAggregate", Self::parse_drop_aggregate)?,
            )),
            TokenKind::Role => Ok(Statement::DropRole(
                self.rule("dropRole", Self::parse_drop_role)?,
            )),
            TokenKind::User => Ok(Statement::DropUser(
                self.rule("dropUser", Self::parse_drop_user)?,
            )),
            _ => Err(self.unrecognized(2)),
        }
    }

    /// Error covering the first `count` tokens (stopping before `;` or EOF)
    fn unrecognized(&self, count: usize) -> ParseError {
        let first = self.stream.peek(0);
        let mut span = first.span;
        let mut words = Vec::new();
        for k in 0..count {
            let token = self.stream.peek(k);
            if matches!(token.kind, TokenKind::Semicolon | TokenKind::Eof) {
                break;
            }
            span = span.merge(token.span);
            words.push(self.text(token));
        }
        ParseError::UnrecognizedStatement {
            found: format!("'{}'", words.join(" ")),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use cqlparse_ast::*;
    use cqlparse_lexer::tokenize;

    fn script(source: &str) -> Script {
        Parser::new(source, tokenize(source)).parse_script()
    }

    #[test]
    fn test_empty_statements_are_skipped() {
        let result = script(";; USE ks;;; ");
        assert_eq!(result.statements.len(), 1);
        assert!(result.is_clean());
    }

    #[test]
    fn test_create_dispatch_on_second_token() {
        let result = script(
            "CREATE KEYSPACE k WITH REPLICATION = {'class': 'SimpleStrategy'}; \
             CREATE ROLE r; CREATE OR REPLACE FUNCTION f () CALLED ON NULL INPUT RETURNS int LANGUAGE java AS 'x'",
        );
        let kinds: Vec<_> = result.parsed().map(Statement::kind).collect();
        assert_eq!(
            kinds,
            vec![
                StatementKind::CreateKeyspace,
                StatementKind::CreateRole,
                StatementKind::CreateFunction,
            ]
        );
    }

    #[test]
    fn test_unrecognized_statement() {
        let result = script("CREATE BANANA x; USE ks;");
        assert_eq!(result.statements.len(), 2);
        let diag = &result.statements[0].diagnostics[0];
        assert_eq!(diag.kind, DiagnosticKind::UnrecognizedStatement);
        assert_eq!(diag.message, "unrecognized statement starting with 'CREATE BANANA'");
        assert!(result.statements[1].is_clean());
    }

    #[test]
    fn test_missing_separator_is_reported() {
        let result = script("USE ks USE other;");
        assert_eq!(result.statements.len(), 1);
        let parsed = &result.statements[0];
        assert!(parsed.statement.is_some());
        assert_eq!(parsed.diagnostics[0].code, "syntax.use");
    }

    #[test]
    fn test_comment_marker_before_separator() {
        let result = script("USE ks --\n; SELECT * FROM t --");
        assert_eq!(result.statements.len(), 2);
        assert!(result.is_clean());
    }

    #[test]
    fn test_recovery_after_error() {
        let result = script("SELECT * FROM t WHERE; INSERT INTO t (a) VALUES (1);");
        assert_eq!(result.statements.len(), 2);
        assert!(result.statements[0].statement.is_none());
        assert_eq!(result.statements[0].diagnostics[0].rule.as_deref(), Some("relationElement"));
        assert!(result.statements[1].is_clean());
    }

    #[test]
    fn test_batch_prefix_dispatch() {
        let result = script(
            "BEGIN BATCH INSERT INTO t (a) VALUES (1); UPDATE t SET a = 2 WHERE k = 1; APPLY BATCH;",
        );
        let kinds: Vec<_> = result.parsed().map(Statement::kind).collect();
        assert_eq!(
            kinds,
            vec![StatementKind::Insert, StatementKind::Update, StatementKind::ApplyBatch]
        );
        assert!(result.statements[0].statement.as_ref().and_then(Statement::begin_batch).is_some());
    }

    #[test]
    fn test_statement_span_excludes_separator() {
        let result = script("  USE ks ;");
        assert_eq!(result.statements[0].span, Span::new(2, 8));
    }

    #[test]
    fn test_single_statement_residual() {
        let source = "USE ks; USE other;";
        let mut parser = Parser::new(source, tokenize(source));
        let first = parser.parse_single();
        assert!(first.statement.is_some());
        assert_eq!(first.residual, 3);
        let second = parser.parse_single();
        assert!(second.diagnostics.is_empty());
        assert_eq!(second.residual, 6);
    }
}
