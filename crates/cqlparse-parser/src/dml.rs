//! SELECT, INSERT, UPDATE, DELETE, batches, TRUNCATE and USE

use cqlparse_ast::*;
use cqlparse_lexer::TokenKind;

use crate::parser::{Parser, Result};

/// Keywords that may directly follow the FROM clause of a SELECT
const SELECT_TAIL: &[TokenKind] = &[
    TokenKind::Where,
    TokenKind::Order,
    TokenKind::Per,
    TokenKind::Limit,
    TokenKind::Allow,
];

impl<'a> Parser<'a> {
    /// `;`, end of input, or a comment marker (the stream keeps one only
    /// directly before `;` or end of input)
    pub(crate) fn at_terminator(&self) -> bool {
        self.at_any(&[TokenKind::Semicolon, TokenKind::Eof, TokenKind::CommentMarker])
    }

    /// Zero-width span just after the last consumed token
    fn gap_point(&self) -> Span {
        let end = self.stream.previous().span.end;
        Span::new(end, end)
    }

    // ===== SELECT =====

    pub(crate) fn parse_select(&mut self) -> Result<SelectStatement> {
        let start = self.start();
        self.consume(TokenKind::Select)?;
        let json = self.eat(TokenKind::Json);
        let distinct = self.eat(TokenKind::Distinct);

        let elements = if self.at(TokenKind::Star) {
            Some(SelectElements::Star(self.advance().span))
        } else if self.at_name() || self.at_function_call() {
            Some(SelectElements::List(self.parse_select_elements()?))
        } else if self.at(TokenKind::From) || self.at_terminator() {
            self.gap(
                GAP_SELECT_ELEMENTS,
                "missing select element list",
                self.gap_point(),
            );
            None
        } else {
            return Err(self.expected("select elements or '*'"));
        };

        let from = if self.at(TokenKind::From) {
            let from_start = self.start();
            self.advance();
            let table = if self.at_name() {
                Some(self.parse_qualified_name("table name")?)
            } else if self.at_terminator() || self.at_any(SELECT_TAIL) {
                self.gap(
                    GAP_SELECT_FROM_TABLE,
                    "missing table name after FROM",
                    self.gap_point(),
                );
                None
            } else {
                return Err(self.expected("table name"));
            };
            Some(FromSpec {
                table,
                span: self.finish(from_start),
            })
        } else if self.at_terminator() || self.at_any(SELECT_TAIL) {
            self.gap(GAP_SELECT_FROM, "missing FROM clause", self.gap_point());
            None
        } else {
            return Err(self.expected("'FROM'"));
        };

        let where_clause = if self.at(TokenKind::Where) {
            Some(self.parse_where_clause()?)
        } else {
            None
        };
        let order_by = if self.at(TokenKind::Order) {
            Some(self.parse_order_by()?)
        } else {
            None
        };
        let per_partition_limit = if self.eat(TokenKind::Per) {
            self.consume(TokenKind::Partition)?;
            self.consume(TokenKind::Limit)?;
            Some(self.parse_decimal()?)
        } else {
            None
        };
        let limit = if self.eat(TokenKind::Limit) {
            Some(self.parse_decimal()?)
        } else {
            None
        };
        let allow_filtering = if self.eat(TokenKind::Allow) {
            self.consume(TokenKind::Filtering)?;
            true
        } else {
            false
        };

        Ok(SelectStatement {
            distinct,
            json,
            elements,
            from,
            where_clause,
            order_by,
            per_partition_limit,
            limit,
            allow_filtering,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_select_elements(&mut self) -> Result<Vec<SelectElement>> {
        self.rule("selectElements", |p| {
            let mut elements = vec![p.parse_select_element()?];
            while p.eat(TokenKind::Comma) {
                elements.push(p.parse_select_element()?);
            }
            Ok(elements)
        })
    }

    fn parse_select_element(&mut self) -> Result<SelectElement> {
        let start = self.start();
        let kind = if self.at_function_call() {
            SelectElementKind::Call(self.parse_function_call()?)
        } else if self.peek_at(1) == TokenKind::Dot && self.peek_at(2) == TokenKind::Star {
            let table = self.parse_identifier("table name")?;
            self.advance();
            self.advance();
            SelectElementKind::TableStar(table)
        } else {
            SelectElementKind::Column(self.parse_identifier("column name")?)
        };
        let alias = if self.eat(TokenKind::As) {
            Some(self.parse_identifier("alias")?)
        } else {
            None
        };
        Ok(SelectElement {
            kind,
            alias,
            span: self.finish(start),
        })
    }

    fn parse_order_by(&mut self) -> Result<OrderBy> {
        let start = self.start();
        self.consume(TokenKind::Order)?;
        self.consume(TokenKind::By)?;
        let mut items = vec![self.parse_order_item()?];
        while self.eat(TokenKind::Comma) {
            items.push(self.parse_order_item()?);
        }
        Ok(OrderBy {
            items,
            span: self.finish(start),
        })
    }

    fn parse_order_item(&mut self) -> Result<OrderItem> {
        let start = self.start();
        let column = self.parse_identifier("column name")?;
        let direction = self.parse_order_direction();
        Ok(OrderItem {
            column,
            direction,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_order_direction(&mut self) -> Option<OrderDirection> {
        if self.eat(TokenKind::Asc) {
            Some(OrderDirection::Asc)
        } else if self.eat(TokenKind::Desc) {
            Some(OrderDirection::Desc)
        } else {
            None
        }
    }

    // ===== Batches =====

    /// `BEGIN [LOGGED | UNLOGGED] BATCH [USING TIMESTAMP n]`
    pub(crate) fn parse_begin_batch(&mut self) -> Result<BeginBatch> {
        self.rule("beginBatch", |p| {
            let start = p.start();
            p.consume(TokenKind::Begin)?;
            let kind = if p.eat(TokenKind::Logged) {
                Some(BatchKind::Logged)
            } else if p.eat(TokenKind::Unlogged) {
                Some(BatchKind::Unlogged)
            } else {
                None
            };
            p.consume(TokenKind::Batch)?;
            let timestamp = if p.eat(TokenKind::Using) {
                p.consume(TokenKind::Timestamp)?;
                Some(p.parse_decimal()?)
            } else {
                None
            };
            Ok(BeginBatch {
                kind,
                timestamp,
                span: p.finish(start),
            })
        })
    }

    pub(crate) fn parse_apply_batch(&mut self) -> Result<ApplyBatchStatement> {
        let start = self.start();
        self.consume(TokenKind::Apply)?;
        self.consume(TokenKind::Batch)?;
        Ok(ApplyBatchStatement {
            span: self.finish(start),
        })
    }

    fn statement_start(&self, begin_batch: &Option<BeginBatch>) -> Span {
        match begin_batch {
            Some(batch) => batch.span,
            None => self.start(),
        }
    }

    /// `USING TTL n AND TIMESTAMP n`; `None` when no USING follows
    fn parse_using(&mut self) -> Result<Option<UsingClause>> {
        if !self.at(TokenKind::Using) {
            return Ok(None);
        }
        let start = self.start();
        self.advance();
        let mut items = vec![self.parse_using_item()?];
        while self.eat(TokenKind::And) {
            items.push(self.parse_using_item()?);
        }
        Ok(Some(UsingClause {
            items,
            span: self.finish(start),
        }))
    }

    fn parse_using_item(&mut self) -> Result<UsingItem> {
        if self.eat(TokenKind::Ttl) {
            Ok(UsingItem::Ttl(self.parse_decimal()?))
        } else if self.eat(TokenKind::Timestamp) {
            Ok(UsingItem::Timestamp(self.parse_decimal()?))
        } else {
            Err(self.expected("'TTL' or 'TIMESTAMP'"))
        }
    }

    // ===== INSERT =====

    pub(crate) fn parse_insert(&mut self, begin_batch: Option<BeginBatch>) -> Result<InsertStatement> {
        let start = self.statement_start(&begin_batch);
        self.consume(TokenKind::Insert)?;
        self.consume(TokenKind::Into)?;
        let table = self.parse_qualified_name("table name")?;

        let (columns, values) = if self.eat(TokenKind::Json) {
            (None, InsertValues::Json(self.parse_string()?))
        } else {
            self.consume(TokenKind::LParen)?;
            let columns = self.parse_identifier_list("column name")?;
            self.consume(TokenKind::RParen)?;
            self.consume(TokenKind::Values)?;
            self.consume(TokenKind::LParen)?;
            let mut values = vec![self.parse_term()?];
            while self.eat(TokenKind::Comma) {
                values.push(self.parse_term()?);
            }
            self.consume(TokenKind::RParen)?;
            (Some(columns), InsertValues::Values(values))
        };

        let if_not_exists = self.parse_if_not_exists()?;
        let using = self.parse_using()?;
        Ok(InsertStatement {
            begin_batch,
            table,
            columns,
            values,
            if_not_exists,
            using,
            span: self.finish(start),
        })
    }

    // ===== UPDATE =====

    pub(crate) fn parse_update(&mut self, begin_batch: Option<BeginBatch>) -> Result<UpdateStatement> {
        let start = self.statement_start(&begin_batch);
        self.consume(TokenKind::Update)?;
        let table = self.parse_qualified_name("table name")?;
        let using = self.parse_using()?;
        self.consume(TokenKind::Set)?;
        let assignments = self.parse_assignments()?;
        let where_clause = self.parse_where_clause()?;
        let condition = self.parse_condition()?;
        Ok(UpdateStatement {
            begin_batch,
            table,
            using,
            assignments,
            where_clause,
            condition,
            span: self.finish(start),
        })
    }

    // ===== DELETE =====

    pub(crate) fn parse_delete(&mut self, begin_batch: Option<BeginBatch>) -> Result<DeleteStatement> {
        let start = self.statement_start(&begin_batch);
        self.consume(TokenKind::Delete)?;
        let mut columns = Vec::new();
        if !self.at(TokenKind::From) {
            columns.push(self.parse_delete_column()?);
            while self.eat(TokenKind::Comma) {
                columns.push(self.parse_delete_column()?);
            }
        }
        self.consume(TokenKind::From)?;
        let table = self.parse_qualified_name("table name")?;
        let timestamp = if self.eat(TokenKind::Using) {
            self.consume(TokenKind::Timestamp)?;
            Some(self.parse_decimal()?)
        } else {
            None
        };
        let where_clause = self.parse_where_clause()?;
        let condition = self.parse_condition()?;
        Ok(DeleteStatement {
            begin_batch,
            columns,
            table,
            timestamp,
            where_clause,
            condition,
            span: self.finish(start),
        })
    }

    fn parse_delete_column(&mut self) -> Result<DeleteColumn> {
        let start = self.start();
        let column = self.parse_identifier("column name")?;
        let index = if self.eat(TokenKind::LBracket) {
            let index = self.parse_constant()?;
            self.consume(TokenKind::RBracket)?;
            Some(index)
        } else {
            None
        };
        Ok(DeleteColumn {
            column,
            index,
            span: self.finish(start),
        })
    }

    // ===== TRUNCATE / USE =====

    pub(crate) fn parse_truncate(&mut self) -> Result<TruncateStatement> {
        let start = self.start();
        self.consume(TokenKind::Truncate)?;
        let table_keyword = self.eat(TokenKind::Table);
        let table = self.parse_qualified_name("table name")?;
        Ok(TruncateStatement {
            table_keyword,
            table,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_use(&mut self) -> Result<UseStatement> {
        let start = self.start();
        self.consume(TokenKind::Use)?;
        let keyspace = self.parse_identifier("keyspace name")?;
        Ok(UseStatement {
            keyspace,
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

    #[test]
    fn test_select_full() {
        let source = "SELECT DISTINCT a, count(*) AS n, t.* FROM ks.t WHERE a = 1 \
                      ORDER BY b DESC PER PARTITION LIMIT 2 LIMIT 10 ALLOW FILTERING";
        let mut p = parser(source);
        let select = p.parse_select().unwrap();
        assert!(p.gaps.is_empty());
        assert!(select.distinct);
        assert_eq!(select.elements.as_ref().map(|e| e.len()), Some(3));
        let table = select.from.and_then(|f| f.table).unwrap();
        assert!(table.is_qualified());
        assert_eq!(select.order_by.unwrap().items[0].direction, Some(OrderDirection::Desc));
        assert_eq!(select.per_partition_limit.and_then(|c| c.as_i64()), Some(2));
        assert_eq!(select.limit.and_then(|c| c.as_i64()), Some(10));
        assert!(select.allow_filtering);
        assert_eq!(select.span, Span::new(0, source.len()));
    }

    #[test]
    fn test_select_missing_elements_is_a_gap() {
        let mut p = parser("SELECT FROM users");
        let select = p.parse_select().unwrap();
        assert!(select.elements.is_none());
        assert_eq!(p.gaps.len(), 1);
        assert!(p.gaps[0].is_gap(GAP_SELECT_ELEMENTS));
        assert_eq!(p.gaps[0].span, Span::new(6, 6));
    }

    #[test]
    fn test_select_missing_from_is_a_gap() {
        let mut p = parser("SELECT a, b");
        let select = p.parse_select().unwrap();
        assert!(select.from.is_none());
        assert!(p.gaps[0].is_gap(GAP_SELECT_FROM));
    }

    #[test]
    fn test_inner_comment_marker_does_not_end_select() {
        let mut p = parser("SELECT a --\nFROM t --\nWHERE k = 1");
        let select = p.parse_select().unwrap();
        assert!(p.gaps.is_empty());
        assert!(select.from.is_some_and(|f| f.table.is_some()));
        assert!(select.where_clause.is_some());
    }

    #[test]
    fn test_comment_marker_before_separator_still_ends_select() {
        let mut p = parser("SELECT a --\n;");
        let select = p.parse_select().unwrap();
        assert!(select.from.is_none());
        assert_eq!(p.gaps.len(), 1);
        assert!(p.gaps[0].is_gap(GAP_SELECT_FROM));
    }

    #[test]
    fn test_select_from_without_table_is_a_gap() {
        let mut p = parser("SELECT * FROM WHERE a = 1");
        let select = p.parse_select().unwrap();
        assert!(select.from.is_some_and(|f| f.table.is_none()));
        assert!(p.gaps[0].is_gap(GAP_SELECT_FROM_TABLE));
        assert!(select.where_clause.is_some());
    }

    #[test]
    fn test_select_garbage_elements_is_a_mismatch() {
        let err = parser("SELECT 5 FROM t").parse_select().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected token: expected select elements or '*', found integer"
        );
    }

    #[test]
    fn test_insert_values_and_json() {
        let insert = parser("INSERT INTO t (a, b) VALUES (1, {'x': 2}) IF NOT EXISTS USING TTL 60 AND TIMESTAMP 5")
            .parse_insert(None)
            .unwrap();
        assert_eq!(insert.columns.map(|c| c.len()), Some(2));
        assert!(insert.if_not_exists);
        let using = insert.using.unwrap();
        assert_eq!(using.ttl().and_then(Constant::as_i64), Some(60));
        assert_eq!(using.timestamp().and_then(Constant::as_i64), Some(5));

        let insert = parser("INSERT INTO t JSON '{\"a\": 1}'").parse_insert(None).unwrap();
        assert!(matches!(insert.values, InsertValues::Json(_)));
    }

    #[test]
    fn test_update_counter() {
        let update = parser("UPDATE t SET counter = counter + 1 WHERE id = 3")
            .parse_update(None)
            .unwrap();
        assert_eq!(update.assignments.len(), 1);
        assert!(matches!(
            update.assignments[0].kind,
            AssignmentKind::Counter { op: ArithOp::Add, .. }
        ));
    }

    #[test]
    fn test_delete_with_batch_prefix() {
        let source = "BEGIN UNLOGGED BATCH DELETE m['k'] FROM t USING TIMESTAMP 9 WHERE id = 1 IF EXISTS";
        let mut p = parser(source);
        let batch = p.parse_begin_batch().unwrap();
        let delete = p.parse_delete(Some(batch)).unwrap();
        assert_eq!(delete.begin_batch.as_ref().and_then(|b| b.kind), Some(BatchKind::Unlogged));
        assert!(delete.columns[0].index.is_some());
        assert!(matches!(delete.condition, Some(Condition::IfExists(_))));
        assert_eq!(delete.span, Span::new(0, source.len()));
    }

    #[test]
    fn test_update_requires_where() {
        let err = parser("UPDATE t SET a = 1").parse_update(None).unwrap_err();
        assert!(err.to_string().contains("expected 'WHERE'"));
    }
}
