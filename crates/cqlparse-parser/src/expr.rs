//! Function calls, terms, relations, assignments and IF conditions

use cqlparse_ast::*;
use cqlparse_lexer::TokenKind;

use crate::parser::{Parser, Result};

impl<'a> Parser<'a> {
    // ===== Function calls =====

    pub(crate) fn parse_function_call(&mut self) -> Result<FunctionCall> {
        self.rule("functionCall", |p| {
            let start = p.start();
            let name = p.parse_function_name()?;
            p.consume(TokenKind::LParen)?;
            let args = if p.eat(TokenKind::Star) {
                FunctionArgs::Star
            } else {
                FunctionArgs::List(p.parse_function_args(TokenKind::RParen)?)
            };
            p.consume(TokenKind::RParen)?;
            Ok(FunctionCall {
                name,
                args,
                span: p.finish(start),
            })
        })
    }

    /// Comma-separated arguments up to (not including) `close`; may be empty
    pub(crate) fn parse_function_args(&mut self, close: TokenKind) -> Result<Vec<FunctionArg>> {
        let mut args = Vec::new();
        if self.at(close) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_function_arg()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(args)
    }

    fn parse_function_arg(&mut self) -> Result<FunctionArg> {
        if self.at_constant() {
            Ok(FunctionArg::Constant(self.parse_constant()?))
        } else if self.at_function_call() {
            Ok(FunctionArg::Call(self.parse_function_call()?))
        } else if self.at_name() {
            Ok(FunctionArg::Column(self.parse_identifier("argument")?))
        } else {
            Err(self.expected("function argument"))
        }
    }

    // ===== Terms and collection literals =====

    /// A value: constant, function call, or collection/tuple literal
    pub(crate) fn parse_term(&mut self) -> Result<Term> {
        match self.peek() {
            TokenKind::LBracket => Ok(Term::List(self.parse_list_literal()?)),
            TokenKind::LBrace => self.parse_brace_literal(),
            TokenKind::LParen => Ok(Term::Tuple(self.parse_tuple_literal()?)),
            _ if self.at_constant() => Ok(Term::Constant(self.parse_constant()?)),
            _ if self.at_function_call() => Ok(Term::Call(self.parse_function_call()?)),
            _ => Err(self.expected("value")),
        }
    }

    /// `[ c, ... ]`
    pub(crate) fn parse_list_literal(&mut self) -> Result<CollectionLiteral> {
        let start = self.start();
        self.consume(TokenKind::LBracket)?;
        let items = self.parse_constant_items(TokenKind::RBracket)?;
        self.consume(TokenKind::RBracket)?;
        Ok(CollectionLiteral {
            items,
            span: self.finish(start),
        })
    }

    /// `{ c, ... }`
    pub(crate) fn parse_set_literal(&mut self) -> Result<CollectionLiteral> {
        let start = self.start();
        self.consume(TokenKind::LBrace)?;
        let items = self.parse_constant_items(TokenKind::RBrace)?;
        self.consume(TokenKind::RBrace)?;
        Ok(CollectionLiteral {
            items,
            span: self.finish(start),
        })
    }

    /// `{ k : v, ... }`
    pub(crate) fn parse_map_literal(&mut self) -> Result<MapLiteral> {
        let map = self.parse_option_map()?;
        Ok(MapLiteral {
            entries: map.entries,
            span: map.span,
        })
    }

    /// Braces hold either a set or a map; the first `:` decides.
    /// An empty `{}` is a set.
    pub(crate) fn parse_brace_literal(&mut self) -> Result<Term> {
        let mark = self.mark();
        self.consume(TokenKind::LBrace)?;
        let is_map = if self.at(TokenKind::RBrace) {
            false
        } else {
            self.parse_constant()?;
            self.at(TokenKind::Colon)
        };
        self.reset(mark);
        if is_map {
            Ok(Term::Map(self.parse_map_literal()?))
        } else {
            Ok(Term::Set(self.parse_set_literal()?))
        }
    }

    fn parse_constant_items(&mut self, close: TokenKind) -> Result<Vec<Constant>> {
        let mut items = Vec::new();
        if self.at(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_constant()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// `( term, ... )`
    pub(crate) fn parse_tuple_literal(&mut self) -> Result<TupleLiteral> {
        let start = self.start();
        self.consume(TokenKind::LParen)?;
        let mut items = vec![self.parse_term()?];
        while self.eat(TokenKind::Comma) {
            items.push(self.parse_term()?);
        }
        self.consume(TokenKind::RParen)?;
        Ok(TupleLiteral {
            items,
            span: self.finish(start),
        })
    }

    // ===== Relations =====

    pub(crate) fn parse_compare_op(&mut self) -> Result<CompareOp> {
        let op = match self.peek() {
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::Le => CompareOp::Le,
            TokenKind::Ge => CompareOp::Ge,
            _ => return Err(self.expected("comparison operator")),
        };
        self.advance();
        Ok(op)
    }

    fn at_compare_op(&self) -> bool {
        self.at_any(&[
            TokenKind::Eq,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Le,
            TokenKind::Ge,
        ])
    }

    /// `WHERE relation AND relation ...`
    pub(crate) fn parse_where_clause(&mut self) -> Result<WhereClause> {
        let start = self.start();
        self.consume(TokenKind::Where)?;
        let mut relations = vec![self.parse_relation()?];
        while self.eat(TokenKind::And) {
            relations.push(self.parse_relation()?);
        }
        Ok(WhereClause {
            relations,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_relation(&mut self) -> Result<Relation> {
        self.rule("relationElement", |p| {
            let start = p.start();
            let kind = if p.at(TokenKind::LParen) {
                p.parse_tuple_relation()?
            } else if p.at_function_call() {
                let call = p.parse_function_call()?;
                let op = p.parse_compare_op()?;
                if p.at_function_call() {
                    RelationKind::CallToCall {
                        left: call,
                        op,
                        right: p.parse_function_call()?,
                    }
                } else {
                    RelationKind::CallCompare {
                        call,
                        op,
                        value: p.parse_constant()?,
                    }
                }
            } else {
                let column = p.parse_column_ref()?;
                if p.eat(TokenKind::In) {
                    p.consume(TokenKind::LParen)?;
                    let values = p.parse_function_args(TokenKind::RParen)?;
                    p.consume(TokenKind::RParen)?;
                    RelationKind::In { column, values }
                } else if p.eat(TokenKind::Contains) {
                    if p.eat(TokenKind::Key) {
                        RelationKind::ContainsKey {
                            column,
                            value: p.parse_constant()?,
                        }
                    } else {
                        RelationKind::Contains {
                            column,
                            value: p.parse_constant()?,
                        }
                    }
                } else if p.at_compare_op() {
                    let op = p.parse_compare_op()?;
                    RelationKind::Compare {
                        column,
                        op,
                        value: p.parse_constant()?,
                    }
                } else {
                    return Err(p.expected("relation operator"));
                }
            };
            Ok(Relation {
                kind,
                span: p.finish(start),
            })
        })
    }

    /// `(a, b) IN ((..), ..)` or `(a, b) op (..), ..`
    fn parse_tuple_relation(&mut self) -> Result<RelationKind> {
        self.consume(TokenKind::LParen)?;
        let columns = self.parse_identifier_list("column name")?;
        self.consume(TokenKind::RParen)?;
        if self.eat(TokenKind::In) {
            self.consume(TokenKind::LParen)?;
            let mut tuples = vec![self.parse_tuple_literal()?];
            while self.eat(TokenKind::Comma) {
                tuples.push(self.parse_tuple_literal()?);
            }
            self.consume(TokenKind::RParen)?;
            return Ok(RelationKind::TupleIn { columns, tuples });
        }
        let op = self.parse_compare_op()?;
        let mut tuples = vec![self.parse_tuple_literal()?];
        while self.eat(TokenKind::Comma) {
            tuples.push(self.parse_tuple_literal()?);
        }
        Ok(RelationKind::TupleCompare {
            columns,
            op,
            tuples,
        })
    }

    // ===== Assignments =====

    fn parse_arith_op(&mut self) -> Result<ArithOp> {
        match self.peek() {
            TokenKind::Plus => {
                self.advance();
                Ok(ArithOp::Add)
            }
            TokenKind::Minus => {
                self.advance();
                Ok(ArithOp::Sub)
            }
            _ => Err(self.expected("'+' or '-'")),
        }
    }

    pub(crate) fn parse_assignments(&mut self) -> Result<Vec<Assignment>> {
        let mut assignments = vec![self.parse_assignment()?];
        while self.eat(TokenKind::Comma) {
            assignments.push(self.parse_assignment()?);
        }
        Ok(assignments)
    }

    /// One `SET` element. All forms start with `column =`; the token after
    /// `=` and the token after the operator pick the form.
    pub(crate) fn parse_assignment(&mut self) -> Result<Assignment> {
        self.rule("assignmentElement", |p| {
            let start = p.start();
            let column = p.parse_identifier("column name")?;

            if p.eat(TokenKind::LBracket) {
                let index = p.parse_constant()?;
                p.consume(TokenKind::RBracket)?;
                p.consume(TokenKind::Eq)?;
                let value = p.parse_constant()?;
                return Ok(Assignment {
                    column,
                    kind: AssignmentKind::Indexed { index, value },
                    span: p.finish(start),
                });
            }

            p.consume(TokenKind::Eq)?;
            let kind = match p.peek() {
                TokenKind::LBrace => match p.parse_brace_literal()? {
                    Term::Set(set) if p.at_any(&[TokenKind::Plus, TokenKind::Minus]) => {
                        let op = p.parse_arith_op()?;
                        let source = p.parse_identifier("column name")?;
                        AssignmentKind::SetPrepend { set, op, source }
                    }
                    Term::Map(map) if p.at_any(&[TokenKind::Plus, TokenKind::Minus]) => {
                        let op = p.parse_arith_op()?;
                        let source = p.parse_identifier("column name")?;
                        AssignmentKind::MapPrepend { map, op, source }
                    }
                    term => AssignmentKind::Value(term),
                },
                TokenKind::LBracket => {
                    let list = p.parse_list_literal()?;
                    if p.at_any(&[TokenKind::Plus, TokenKind::Minus]) {
                        let op = p.parse_arith_op()?;
                        let source = p.parse_identifier("column name")?;
                        AssignmentKind::ListPrepend { list, op, source }
                    } else {
                        AssignmentKind::Value(Term::List(list))
                    }
                }
                _ if p.at_constant() || p.at_function_call() || p.at(TokenKind::LParen) => {
                    AssignmentKind::Value(p.parse_term()?)
                }
                _ if p.at_name() => {
                    let source = p.parse_identifier("column name")?;
                    let op = p.parse_arith_op()?;
                    p.parse_append(source, op)?
                }
                _ => return Err(p.expected("value")),
            };
            Ok(Assignment {
                column,
                kind,
                span: p.finish(start),
            })
        })
    }

    /// Right-hand side of `column = source op ...`
    fn parse_append(&mut self, source: Identifier, op: ArithOp) -> Result<AssignmentKind> {
        match self.peek() {
            TokenKind::DecimalLiteral => Ok(AssignmentKind::Counter {
                source,
                op,
                amount: self.parse_decimal()?,
            }),
            TokenKind::LBrace => match self.parse_brace_literal()? {
                Term::Map(map) => Ok(AssignmentKind::MapAppend { source, op, map }),
                Term::Set(set) => Ok(AssignmentKind::SetAppend { source, op, set }),
                _ => Err(self.expected("set or map literal")),
            },
            TokenKind::LBracket => Ok(AssignmentKind::ListAppend {
                source,
                op,
                list: self.parse_list_literal()?,
            }),
            _ => Err(self.expected("number, set, map or list")),
        }
    }

    // ===== IF clauses =====

    /// `IF EXISTS` or `IF col op value AND ...`; `None` when no IF follows
    pub(crate) fn parse_condition(&mut self) -> Result<Option<Condition>> {
        if !self.at(TokenKind::If) {
            return Ok(None);
        }
        let start = self.start();
        self.advance();
        if self.eat(TokenKind::Exists) {
            return Ok(Some(Condition::IfExists(self.finish(start))));
        }
        let mut conditions = vec![self.parse_if_condition()?];
        while self.eat(TokenKind::And) {
            conditions.push(self.parse_if_condition()?);
        }
        Ok(Some(Condition::If(conditions)))
    }

    fn parse_if_condition(&mut self) -> Result<IfCondition> {
        let start = self.start();
        let column = self.parse_identifier("column name")?;
        let op = self.parse_compare_op()?;
        let value = self.parse_constant()?;
        Ok(IfCondition {
            column,
            op,
            value,
            span: self.finish(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use cqlparse_ast::*;
    use cqlparse_lexer::tokenize;

    fn parser(source: &str) -> Parser<'_> {
        Parser::new(source, tokenize(source))
    }

    fn assignment(source: &str) -> Assignment {
        parser(source).parse_assignment().unwrap()
    }

    #[test]
    fn test_assignment_forms() {
        let cases = [
            ("a = 1", "value"),
            ("a = now()", "value"),
            ("hits = hits + 1", "counter"),
            ("tags = tags + {'x'}", "setAppend"),
            ("tags = {'x'} + tags", "setPrepend"),
            ("m = m + {'k': 'v'}", "mapAppend"),
            ("m = {'k': 'v'} + m", "mapPrepend"),
            ("l = l - [1, 2]", "listAppend"),
            ("l = [1] + l", "listPrepend"),
            ("m['k'] = 'v'", "indexed"),
        ];
        for (source, form) in cases {
            assert_eq!(assignment(source).kind.form_name(), form, "{}", source);
        }
    }

    #[test]
    fn test_assignment_span_covers_rhs() {
        let a = assignment("hits = hits + 1");
        assert_eq!(a.span, Span::new(0, 15));
    }

    #[test]
    fn test_assignment_missing_operand() {
        let err = parser("hits = hits +").parse_assignment().unwrap_err();
        assert_eq!(err.rule(), Some("assignmentElement"));
    }

    #[test]
    fn test_empty_braces_are_a_set() {
        let term = parser("{}").parse_term().unwrap();
        assert!(matches!(term, Term::Set(ref s) if s.items.is_empty()));
    }

    #[test]
    fn test_relation_forms() {
        let kinds: Vec<_> = [
            "id = 5",
            "t.id >= -1",
            "token(id) > token(5)",
            "ttl(v) < 100",
            "id IN (1, 2, 3)",
            "(a, b) IN ((1, 2), (3, 4))",
            "(a, b) > (1, 2)",
            "tags CONTAINS 'x'",
            "m CONTAINS KEY 'k'",
        ]
        .iter()
        .map(|s| parser(s).parse_relation().unwrap().kind)
        .collect();
        assert!(matches!(kinds[0], RelationKind::Compare { op: CompareOp::Eq, .. }));
        assert!(matches!(kinds[1], RelationKind::Compare { ref column, .. } if column.table.is_some()));
        assert!(matches!(kinds[2], RelationKind::CallToCall { .. }));
        assert!(matches!(kinds[3], RelationKind::CallCompare { .. }));
        assert!(matches!(kinds[4], RelationKind::In { ref values, .. } if values.len() == 3));
        assert!(matches!(kinds[5], RelationKind::TupleIn { ref tuples, .. } if tuples.len() == 2));
        assert!(matches!(kinds[6], RelationKind::TupleCompare { .. }));
        assert!(matches!(kinds[7], RelationKind::Contains { .. }));
        assert!(matches!(kinds[8], RelationKind::ContainsKey { .. }));
    }

    #[test]
    fn test_relation_without_operator() {
        let err = parser("id 5").parse_relation().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected token: expected relation operator, found integer"
        );
    }

    #[test]
    fn test_function_call_star_and_nested() {
        let call = parser("count(*)").parse_function_call().unwrap();
        assert_eq!(call.args, FunctionArgs::Star);
        let call = parser("ks.f(a, g(1), 'x')").parse_function_call().unwrap();
        assert!(call.name.is_qualified());
        assert!(matches!(call.args, FunctionArgs::List(ref a) if a.len() == 3));
    }

    #[test]
    fn test_if_conditions() {
        let cond = parser("IF EXISTS").parse_condition().unwrap();
        assert!(matches!(cond, Some(Condition::IfExists(_))));
        let cond = parser("IF a = 1 AND b < 'x'").parse_condition().unwrap();
        assert!(matches!(cond, Some(Condition::If(ref c)) if c.len() == 2));
        assert_eq!(parser("WHERE").parse_condition().unwrap(), None);
    }
}
