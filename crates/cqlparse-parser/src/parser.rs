//! Core parser state: token access, names, literals and data types

use cqlparse_ast::*;
use cqlparse_lexer::{Token, TokenKind};

use crate::error::ParseError;
use crate::stream::{Mark, TokenStream};

pub type Result<T> = std::result::Result<T, ParseError>;

/// Recursive descent parser over a single CQL document
pub struct Parser<'a> {
    source: &'a str,
    pub(crate) stream: TokenStream,
    /// Active grammar rules, innermost last
    rules: Vec<&'static str>,
    /// Structural gaps reported by the statement being parsed
    pub(crate) gaps: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            stream: TokenStream::new(tokens),
            rules: Vec::new(),
            gaps: Vec::new(),
        }
    }

    // ===== Token access =====

    pub(crate) fn peek(&self) -> TokenKind {
        self.stream.peek(0).kind
    }

    pub(crate) fn peek_at(&self, k: usize) -> TokenKind {
        self.stream.peek(k).kind
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek())
    }

    pub(crate) fn advance(&mut self) -> Token {
        self.stream.advance()
    }

    /// Consume the current token if it has the given kind
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.expected(kind.describe()))
        }
    }

    /// Mismatch error at the current token, attributed to the innermost rule
    pub(crate) fn expected(&self, what: impl Into<String>) -> ParseError {
        let token = self.stream.peek(0);
        ParseError::unexpected(what, token.kind, token.span, self.current_rule())
    }

    pub(crate) fn text(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }

    /// Span of the current (not yet consumed) token
    pub(crate) fn start(&self) -> Span {
        self.stream.peek(0).span
    }

    /// Span from `start` through the last consumed token
    pub(crate) fn finish(&self, start: Span) -> Span {
        start.merge(self.stream.previous().span)
    }

    pub(crate) fn mark(&self) -> Mark {
        self.stream.mark()
    }

    pub(crate) fn reset(&mut self, mark: Mark) {
        self.stream.reset(mark)
    }

    // ===== Rule tracking =====

    pub(crate) fn rule<T>(
        &mut self,
        name: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.rules.push(name);
        let result = f(self);
        self.rules.pop();
        result
    }

    pub(crate) fn current_rule(&self) -> &'static str {
        self.rules.last().copied().unwrap_or("root")
    }

    /// Record a structural gap inside the current rule
    pub(crate) fn gap(&mut self, code: &str, message: &str, span: Span) {
        let diagnostic = Diagnostic::structural_gap(code, message, span, self.current_rule());
        self.gaps.push(diagnostic);
    }

    /// `IF NOT EXISTS`
    pub(crate) fn parse_if_not_exists(&mut self) -> Result<bool> {
        if self.eat(TokenKind::If) {
            self.consume(TokenKind::Not)?;
            self.consume(TokenKind::Exists)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// `IF EXISTS`
    pub(crate) fn parse_if_exists(&mut self) -> Result<bool> {
        if self.eat(TokenKind::If) {
            self.consume(TokenKind::Exists)?;
            return Ok(true);
        }
        Ok(false)
    }

    // ===== Names =====

    /// Tokens usable as a plain name: identifiers, quoted names, soft keywords
    /// and primitive type names (`counter`, `date`, `text`...)
    pub(crate) fn is_name(kind: TokenKind) -> bool {
        matches!(kind, TokenKind::Ident | TokenKind::QuotedName)
            || kind.is_soft_keyword()
            || primitive_type(kind).is_some()
    }

    /// Function names additionally allow the built-in function keywords
    pub(crate) fn is_function_name(kind: TokenKind) -> bool {
        Self::is_name(kind)
            || matches!(
                kind,
                TokenKind::Token | TokenKind::Writetime | TokenKind::Uuid
            )
    }

    pub(crate) fn at_name(&self) -> bool {
        Self::is_name(self.peek())
    }

    /// `name (` or `ks . name (`
    pub(crate) fn at_function_call(&self) -> bool {
        if !Self::is_function_name(self.peek()) {
            return false;
        }
        match self.peek_at(1) {
            TokenKind::LParen => true,
            TokenKind::Dot => {
                Self::is_function_name(self.peek_at(2)) && self.peek_at(3) == TokenKind::LParen
            }
            _ => false,
        }
    }

    pub(crate) fn parse_identifier(&mut self, what: &str) -> Result<Identifier> {
        if self.at_name() {
            Ok(self.identifier_from_current())
        } else {
            Err(self.expected(what))
        }
    }

    pub(crate) fn parse_function_name_part(&mut self) -> Result<Identifier> {
        if Self::is_function_name(self.peek()) {
            Ok(self.identifier_from_current())
        } else {
            Err(self.expected("function name"))
        }
    }

    fn identifier_from_current(&mut self) -> Identifier {
        let token = self.advance();
        let text = self.text(&token);
        if token.kind == TokenKind::QuotedName {
            Identifier::quoted(unquote(text, '"'), token.span)
        } else {
            Identifier::new(text, token.span)
        }
    }

    /// `name` or `keyspace . name`
    pub(crate) fn parse_qualified_name(&mut self, what: &str) -> Result<QualifiedName> {
        let start = self.start();
        let first = self.parse_identifier(what)?;
        if self.at(TokenKind::Dot) {
            self.advance();
            let name = self.parse_identifier(what)?;
            return Ok(QualifiedName {
                keyspace: Some(first),
                name,
                span: self.finish(start),
            });
        }
        Ok(QualifiedName::unqualified(first))
    }

    pub(crate) fn parse_function_name(&mut self) -> Result<QualifiedName> {
        let start = self.start();
        let first = self.parse_function_name_part()?;
        if self.at(TokenKind::Dot) {
            self.advance();
            let name = self.parse_function_name_part()?;
            return Ok(QualifiedName {
                keyspace: Some(first),
                name,
                span: self.finish(start),
            });
        }
        Ok(QualifiedName::unqualified(first))
    }

    /// `column` or `table . column`
    pub(crate) fn parse_column_ref(&mut self) -> Result<ColumnRef> {
        let start = self.start();
        let first = self.parse_identifier("column name")?;
        if self.at(TokenKind::Dot) {
            self.advance();
            let column = self.parse_identifier("column name")?;
            return Ok(ColumnRef {
                table: Some(first),
                column,
                span: self.finish(start),
            });
        }
        Ok(ColumnRef::bare(first))
    }

    /// Comma-separated list of at least one name
    pub(crate) fn parse_identifier_list(&mut self, what: &str) -> Result<Vec<Identifier>> {
        let mut names = vec![self.parse_identifier(what)?];
        while self.eat(TokenKind::Comma) {
            names.push(self.parse_identifier(what)?);
        }
        Ok(names)
    }

    // ===== Literals =====

    pub(crate) fn at_constant(&self) -> bool {
        match self.peek() {
            TokenKind::UuidLiteral
            | TokenKind::StringLiteral
            | TokenKind::DecimalLiteral
            | TokenKind::FloatLiteral
            | TokenKind::HexLiteral
            | TokenKind::CodeBlock
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::Nan
            | TokenKind::Infinity => true,
            TokenKind::Minus => matches!(
                self.peek_at(1),
                TokenKind::DecimalLiteral
                    | TokenKind::FloatLiteral
                    | TokenKind::Nan
                    | TokenKind::Infinity
            ),
            _ => false,
        }
    }

    pub(crate) fn parse_constant(&mut self) -> Result<Constant> {
        if !self.at_constant() {
            return Err(self.expected("constant"));
        }
        let start = self.start();
        let negative = self.eat(TokenKind::Minus);
        let token = self.advance();
        let text = self.text(&token);
        let sign = if negative { "-" } else { "" };
        let kind = match token.kind {
            TokenKind::UuidLiteral => ConstantKind::Uuid(text.to_string()),
            TokenKind::StringLiteral => ConstantKind::String(unquote(text, '\'')),
            TokenKind::DecimalLiteral => ConstantKind::Decimal(format!("{}{}", sign, text)),
            TokenKind::FloatLiteral => ConstantKind::Float(format!("{}{}", sign, text)),
            TokenKind::Nan => ConstantKind::Float(format!("{}NaN", sign)),
            TokenKind::Infinity => ConstantKind::Float(format!("{}Infinity", sign)),
            TokenKind::HexLiteral => ConstantKind::Hex(text.to_string()),
            TokenKind::CodeBlock => ConstantKind::CodeBlock(
                text.trim_start_matches("$$").trim_end_matches("$$").to_string(),
            ),
            TokenKind::True => ConstantKind::Boolean(true),
            TokenKind::False => ConstantKind::Boolean(false),
            _ => ConstantKind::Null,
        };
        Ok(Constant::new(kind, self.finish(start)))
    }

    /// Unsigned integer literal, as in `LIMIT 10` or `TTL 86400`
    pub(crate) fn parse_decimal(&mut self) -> Result<Constant> {
        let token = self.consume(TokenKind::DecimalLiteral)?;
        let text = self.text(&token).to_string();
        Ok(Constant::new(ConstantKind::Decimal(text), token.span))
    }

    pub(crate) fn parse_string(&mut self) -> Result<Constant> {
        let token = self.consume(TokenKind::StringLiteral)?;
        let text = unquote(self.text(&token), '\'');
        Ok(Constant::new(ConstantKind::String(text), token.span))
    }

    pub(crate) fn parse_boolean(&mut self) -> Result<bool> {
        match self.peek() {
            TokenKind::True => {
                self.advance();
                Ok(true)
            }
            TokenKind::False => {
                self.advance();
                Ok(false)
            }
            _ => Err(self.expected("'true' or 'false'")),
        }
    }

    /// `{ key : value, ... }` with constant keys and values
    pub(crate) fn parse_option_map(&mut self) -> Result<OptionMap> {
        let start = self.start();
        self.consume(TokenKind::LBrace)?;
        let mut entries = Vec::new();
        if !self.at(TokenKind::RBrace) {
            loop {
                let key = self.parse_constant()?;
                self.consume(TokenKind::Colon)?;
                let value = self.parse_constant()?;
                entries.push((key, value));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RBrace)?;
        Ok(OptionMap {
            entries,
            span: self.finish(start),
        })
    }

    // ===== Data types =====

    pub(crate) fn parse_data_type(&mut self) -> Result<DataType> {
        self.rule("dataType", |p| {
            let start = p.start();
            if let Some(primitive) = primitive_type(p.peek()) {
                p.advance();
                return Ok(DataType::new(DataTypeKind::Primitive(primitive), start));
            }
            let kind = match p.peek() {
                TokenKind::List => {
                    p.advance();
                    DataTypeKind::List(Box::new(p.parse_type_argument()?))
                }
                TokenKind::Set => {
                    p.advance();
                    DataTypeKind::Set(Box::new(p.parse_type_argument()?))
                }
                TokenKind::Frozen => {
                    p.advance();
                    DataTypeKind::Frozen(Box::new(p.parse_type_argument()?))
                }
                TokenKind::Map => {
                    p.advance();
                    p.consume(TokenKind::Lt)?;
                    let key = p.parse_data_type()?;
                    p.consume(TokenKind::Comma)?;
                    let value = p.parse_data_type()?;
                    p.consume(TokenKind::Gt)?;
                    DataTypeKind::Map(Box::new(key), Box::new(value))
                }
                TokenKind::Tuple => {
                    p.advance();
                    p.consume(TokenKind::Lt)?;
                    let mut items = vec![p.parse_data_type()?];
                    while p.eat(TokenKind::Comma) {
                        items.push(p.parse_data_type()?);
                    }
                    p.consume(TokenKind::Gt)?;
                    DataTypeKind::Tuple(items)
                }
                kind if Self::is_name(kind) => {
                    DataTypeKind::UserDefined(p.parse_qualified_name("type name")?)
                }
                _ => return Err(p.expected("data type")),
            };
            Ok(DataType::new(kind, p.finish(start)))
        })
    }

    /// `< type >`
    fn parse_type_argument(&mut self) -> Result<DataType> {
        self.consume(TokenKind::Lt)?;
        let inner = self.parse_data_type()?;
        self.consume(TokenKind::Gt)?;
        Ok(inner)
    }

    /// `( type, ... )`, possibly empty
    pub(crate) fn parse_type_signature(&mut self) -> Result<Vec<DataType>> {
        self.consume(TokenKind::LParen)?;
        let mut types = Vec::new();
        if !self.at(TokenKind::RParen) {
            types.push(self.parse_data_type()?);
            while self.eat(TokenKind::Comma) {
                types.push(self.parse_data_type()?);
            }
        }
        self.consume(TokenKind::RParen)?;
        Ok(types)
    }
}

fn primitive_type(kind: TokenKind) -> Option<PrimitiveType> {
    let primitive = match kind {
        TokenKind::Ascii => PrimitiveType::Ascii,
        TokenKind::Bigint => PrimitiveType::Bigint,
        TokenKind::Blob => PrimitiveType::Blob,
        TokenKind::Boolean => PrimitiveType::Boolean,
        TokenKind::Counter => PrimitiveType::Counter,
        TokenKind::Date => PrimitiveType::Date,
        TokenKind::Decimal => PrimitiveType::Decimal,
        TokenKind::Double => PrimitiveType::Double,
        TokenKind::Duration => PrimitiveType::Duration,
        TokenKind::Float => PrimitiveType::Float,
        TokenKind::Inet => PrimitiveType::Inet,
        TokenKind::Int => PrimitiveType::Int,
        TokenKind::Smallint => PrimitiveType::Smallint,
        TokenKind::Text => PrimitiveType::Text,
        TokenKind::Time => PrimitiveType::Time,
        TokenKind::Timestamp => PrimitiveType::Timestamp,
        TokenKind::Timeuuid => PrimitiveType::Timeuuid,
        TokenKind::Tinyint => PrimitiveType::Tinyint,
        TokenKind::Uuid => PrimitiveType::Uuid,
        TokenKind::Varchar => PrimitiveType::Varchar,
        TokenKind::Varint => PrimitiveType::Varint,
        _ => return None,
    };
    Some(primitive)
}

/// Strip surrounding quotes and collapse doubled quote characters
pub(crate) fn unquote(text: &str, quote: char) -> String {
    let inner = text
        .strip_prefix(quote)
        .and_then(|t| t.strip_suffix(quote))
        .unwrap_or(text);
    let doubled = format!("{}{}", quote, quote);
    inner.replace(&doubled, &quote.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cqlparse_lexer::tokenize;

    fn parser(source: &str) -> Parser<'_> {
        Parser::new(source, tokenize(source))
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'it''s'", '\''), "it's");
        assert_eq!(unquote("\"My\"\"Col\"", '"'), "My\"Col");
        assert_eq!(unquote("''", '\''), "");
    }

    #[test]
    fn test_soft_keyword_as_name() {
        let mut p = parser("key");
        let name = p.parse_identifier("column name").unwrap();
        assert_eq!(name.name, "key");
        assert!(!name.quoted);
    }

    #[test]
    fn test_type_name_as_name() {
        let mut p = parser("counter");
        let name = p.parse_identifier("column name").unwrap();
        assert_eq!(name.name, "counter");
    }

    #[test]
    fn test_reserved_keyword_is_not_a_name() {
        let mut p = parser("select");
        let err = p.parse_identifier("column name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected token: expected column name, found 'SELECT'"
        );
    }

    #[test]
    fn test_qualified_name_span() {
        let mut p = parser("ks.\"Users\"");
        let name = p.parse_qualified_name("table name").unwrap();
        assert_eq!(name.keyspace.as_ref().map(|k| k.name.as_str()), Some("ks"));
        assert_eq!(name.name.name, "Users");
        assert!(name.name.quoted);
        assert_eq!(name.span, Span::new(0, 10));
    }

    #[test]
    fn test_negative_constant_merges_sign() {
        let mut p = parser("-42");
        let constant = p.parse_constant().unwrap();
        assert_eq!(constant.kind, ConstantKind::Decimal("-42".into()));
        assert_eq!(constant.span, Span::new(0, 3));
    }

    #[test]
    fn test_nested_data_type() {
        let mut p = parser("map<text, frozen<list<int>>>");
        let ty = p.parse_data_type().unwrap();
        assert_eq!(ty.depth(), 4);
        assert_eq!(ty.span, Span::new(0, 28));
    }

    #[test]
    fn test_user_defined_type() {
        let mut p = parser("ks.address");
        let ty = p.parse_data_type().unwrap();
        assert!(matches!(ty.kind, DataTypeKind::UserDefined(ref n) if n.is_qualified()));
    }

    #[test]
    fn test_data_type_error_names_rule() {
        let mut p = parser("list<>");
        let err = p.parse_data_type().unwrap_err();
        assert_eq!(err.rule(), Some("dataType"));
    }
}
