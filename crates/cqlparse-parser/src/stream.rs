//! Positional token cursor with lookahead and checkpoints

use cqlparse_ast::Span;
use cqlparse_lexer::{Token, TokenKind};

/// A saved cursor position, see [`TokenStream::mark`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// Owns the token vector; all state is the cursor index.
///
/// Reading past the end yields the trailing `Eof` token, so running out of
/// input is an ordinary mismatch rather than a panic.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let (end, line, column) = tokens
                .last()
                .map(|t| (t.span.end, t.line, t.column + t.span.len()))
                .unwrap_or((0, 1, 1));
            tokens.push(Token {
                kind: TokenKind::Eof,
                span: Span::new(end, end),
                line,
                column,
            });
        }
        Self {
            tokens: drop_inner_comment_markers(tokens),
            pos: 0,
        }
    }

    /// Token `k` positions ahead of the cursor without consuming
    pub fn peek(&self, k: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + k).min(last)]
    }

    /// Consume and return the current token; `Eof` is never consumed
    pub fn advance(&mut self) -> Token {
        let token = *self.peek(0);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// The most recently consumed token
    pub fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    pub fn is_at_end(&self) -> bool {
        self.peek(0).kind == TokenKind::Eof
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// A bare `--` is an empty comment; keep it only directly before `;` or `Eof`
fn drop_inner_comment_markers(tokens: Vec<Token>) -> Vec<Token> {
    let mut kept: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens.into_iter().rev() {
        let next = kept.last().map(|t| t.kind);
        if token.kind == TokenKind::CommentMarker
            && !matches!(next, Some(TokenKind::Semicolon | TokenKind::Eof))
        {
            continue;
        }
        kept.push(token);
    }
    kept.reverse();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use cqlparse_lexer::tokenize;

    #[test]
    fn test_peek_does_not_consume() {
        let stream = TokenStream::new(tokenize("USE ks;"));
        assert_eq!(stream.peek(0).kind, TokenKind::Use);
        assert_eq!(stream.peek(2).kind, TokenKind::Semicolon);
        assert_eq!(stream.peek(50).kind, TokenKind::Eof);
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_mark_and_reset_replay_identically() {
        let mut stream = TokenStream::new(tokenize("SELECT a, b FROM t"));
        stream.advance();
        let mark = stream.mark();
        let first: Vec<_> = (0..4).map(|_| stream.advance().kind).collect();
        stream.reset(mark);
        let second: Vec<_> = (0..4).map(|_| stream.advance().kind).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut stream = TokenStream::new(tokenize("USE"));
        stream.advance();
        assert_eq!(stream.advance().kind, TokenKind::Eof);
        assert_eq!(stream.advance().kind, TokenKind::Eof);
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_missing_eof_is_synthesized() {
        let mut tokens = tokenize("USE ks");
        tokens.pop();
        let stream = TokenStream::new(tokens);
        assert_eq!(stream.peek(2).kind, TokenKind::Eof);
        assert_eq!(stream.peek(2).span, Span::new(6, 6));
    }

    #[test]
    fn test_comment_marker_kept_only_before_terminator() {
        let kinds = |source: &str| -> Vec<TokenKind> {
            TokenStream::new(tokenize(source)).tokens().iter().map(|t| t.kind).collect()
        };
        assert_eq!(
            kinds("SELECT a --\nFROM t --\n;"),
            vec![
                TokenKind::Select,
                TokenKind::Ident,
                TokenKind::From,
                TokenKind::Ident,
                TokenKind::CommentMarker,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("--\n--\nUSE ks --"),
            vec![TokenKind::Use, TokenKind::Ident, TokenKind::CommentMarker, TokenKind::Eof]
        );
    }
}
