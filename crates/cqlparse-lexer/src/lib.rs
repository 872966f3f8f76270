//! cqlparse Lexer - Tokenization using logos
//!
//! Produces the typed token stream the parser consumes:
//! - keywords are case-insensitive (`select`, `SELECT`, `Select`)
//! - whitespace and comments are dropped, except a bare `--` which is kept
//!   as [`TokenKind::CommentMarker`]
//! - the stream always ends with a single `Eof` token

mod token;

pub use token::*;

use logos::Logos;
use cqlparse_ast::{LineIndex, Span};

/// Tokenize a source string into a vector of tokens
pub fn tokenize(source: &str) -> Vec<Token> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        let kind = match result {
            Ok(kind) => kind,
            Err(_) => TokenKind::Error,
        };
        let pos = index.position(span.start);
        tokens.push(Token {
            kind,
            span,
            line: pos.line,
            column: pos.column,
        });
    }

    // Add EOF token
    let end = source.len();
    let pos = index.position(end);
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(end, end),
        line: pos.line,
        column: pos.column,
    });

    tokens
}

/// A token with its span and 1-based start position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.start..self.span.end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            kinds("SELECT name FROM users;"),
            vec![
                TokenKind::Select,
                TokenKind::Ident,
                TokenKind::From,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(kinds("select Select SELECT")[..3], [TokenKind::Select; 3]);
        assert_eq!(kinds("durable_writes")[0], TokenKind::DurableWrites);
    }

    #[test]
    fn test_literals() {
        let source = "42 3.14 1e10 0xCAFE 'it''s' 123e4567-e89b-12d3-a456-426614174000 $$ return 1; $$";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::DecimalLiteral,
                TokenKind::FloatLiteral,
                TokenKind::FloatLiteral,
                TokenKind::HexLiteral,
                TokenKind::StringLiteral,
                TokenKind::UuidLiteral,
                TokenKind::CodeBlock,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_angle_brackets_in_types() {
        assert_eq!(
            kinds("map<text,frozen<list<int>>>"),
            vec![
                TokenKind::Map,
                TokenKind::Lt,
                TokenKind::Text,
                TokenKind::Comma,
                TokenKind::Frozen,
                TokenKind::Lt,
                TokenKind::List,
                TokenKind::Lt,
                TokenKind::Int,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "USE ks; -- switch keyspace\n/* block\ncomment */ // trailing";
        assert_eq!(
            kinds(source),
            vec![TokenKind::Use, TokenKind::Ident, TokenKind::Semicolon, TokenKind::Eof]
        );
    }

    #[test]
    fn test_bare_dashes_become_comment_marker() {
        assert_eq!(
            kinds("USE ks --\n;"),
            vec![
                TokenKind::Use,
                TokenKind::Ident,
                TokenKind::CommentMarker,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_names_and_minus() {
        assert_eq!(
            kinds("\"MyTable\" c - 1"),
            vec![
                TokenKind::QuotedName,
                TokenKind::Ident,
                TokenKind::Minus,
                TokenKind::DecimalLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("USE ks;\n  SELECT");
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[3].line, tokens[3].column), (2, 3));
        assert_eq!(tokens[3].text("USE ks;\n  SELECT"), "SELECT");
    }

    #[test]
    fn test_soft_keywords() {
        assert!(TokenKind::Key.is_soft_keyword());
        assert!(TokenKind::Ttl.is_soft_keyword());
        assert!(!TokenKind::Select.is_soft_keyword());
        assert_eq!(TokenKind::DurableWrites.keyword(), Some("DURABLE_WRITES"));
        assert_eq!(TokenKind::Ident.keyword(), None);
    }
}
