//! Keyspaces, tables, user-defined types, indexes, triggers and materialized views

use cqlparse_ast::*;
use cqlparse_lexer::TokenKind;

use crate::parser::{Parser, Result};

impl<'a> Parser<'a> {
    /// `KEYSPACE` or its `SCHEMA` synonym
    fn consume_keyspace_keyword(&mut self) -> Result<()> {
        if self.eat(TokenKind::Keyspace) || self.eat(TokenKind::Schema) {
            Ok(())
        } else {
            Err(self.expected("'KEYSPACE'"))
        }
    }

    /// `TABLE` or its `COLUMNFAMILY` synonym
    fn consume_table_keyword(&mut self) -> Result<()> {
        if self.eat(TokenKind::Table) || self.eat(TokenKind::Columnfamily) {
            Ok(())
        } else {
            Err(self.expected("'TABLE'"))
        }
    }

    // ===== Shared clauses =====

    /// `WITH REPLICATION = {..} [AND DURABLE_WRITES = bool]`
    fn parse_replication(&mut self) -> Result<(OptionMap, Option<bool>)> {
        self.consume(TokenKind::With)?;
        self.consume(TokenKind::Replication)?;
        self.consume(TokenKind::Eq)?;
        let replication = self.parse_option_map()?;
        let durable_writes = if self.eat(TokenKind::And) {
            self.consume(TokenKind::DurableWrites)?;
            self.consume(TokenKind::Eq)?;
            Some(self.parse_boolean()?)
        } else {
            None
        };
        Ok((replication, durable_writes))
    }

    /// `WITH property AND property ...`
    pub(crate) fn parse_with_options(&mut self) -> Result<WithOptions> {
        self.rule("withElement", |p| {
            let start = p.start();
            p.consume(TokenKind::With)?;
            let mut properties = vec![p.parse_table_property()?];
            while p.eat(TokenKind::And) {
                properties.push(p.parse_table_property()?);
            }
            Ok(WithOptions {
                properties,
                span: p.finish(start),
            })
        })
    }

    fn parse_table_property(&mut self) -> Result<TableProperty> {
        let start = self.start();
        if self.eat(TokenKind::Clustering) {
            self.consume(TokenKind::Order)?;
            self.consume(TokenKind::By)?;
            self.consume(TokenKind::LParen)?;
            let mut columns = Vec::new();
            loop {
                let column = self.parse_identifier("column name")?;
                let direction = self
                    .parse_order_direction()
                    .ok_or_else(|| self.expected("'ASC' or 'DESC'"))?;
                columns.push((column, direction));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.consume(TokenKind::RParen)?;
            return Ok(TableProperty::ClusteringOrder {
                columns,
                span: self.finish(start),
            });
        }
        if self.eat(TokenKind::Compact) {
            self.consume(TokenKind::Storage)?;
            return Ok(TableProperty::CompactStorage(self.finish(start)));
        }
        let name = self.parse_identifier("table option")?;
        let value = if self.eat(TokenKind::Eq) {
            if self.at(TokenKind::LBrace) {
                Some(PropertyValue::Map(self.parse_option_map()?))
            } else {
                Some(PropertyValue::Constant(self.parse_constant()?))
            }
        } else {
            None
        };
        Ok(TableProperty::Option {
            name,
            value,
            span: self.finish(start),
        })
    }

    /// `name type, ...` optionally wrapped in parentheses
    fn parse_column_type_list(&mut self) -> Result<Vec<(Identifier, DataType)>> {
        let parenthesized = self.eat(TokenKind::LParen);
        let mut columns = Vec::new();
        loop {
            let name = self.parse_identifier("column name")?;
            let data_type = self.parse_data_type()?;
            columns.push((name, data_type));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if parenthesized {
            self.consume(TokenKind::RParen)?;
        }
        Ok(columns)
    }

    /// `a TO b AND c TO d`
    fn parse_renames(&mut self) -> Result<Vec<(Identifier, Identifier)>> {
        let mut pairs = Vec::new();
        loop {
            let from = self.parse_identifier("column name")?;
            self.consume(TokenKind::To)?;
            let to = self.parse_identifier("column name")?;
            pairs.push((from, to));
            if !self.eat(TokenKind::And) {
                break;
            }
        }
        Ok(pairs)
    }

    // ===== Keyspaces =====

    pub(crate) fn parse_create_keyspace(&mut self) -> Result<CreateKeyspaceStatement> {
        let start = self.start();
        self.consume(TokenKind::Create)?;
        self.consume_keyspace_keyword()?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_identifier("keyspace name")?;
        let (replication, durable_writes) = self.parse_replication()?;
        Ok(CreateKeyspaceStatement {
            if_not_exists,
            name,
            replication,
            durable_writes,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_alter_keyspace(&mut self) -> Result<AlterKeyspaceStatement> {
        let start = self.start();
        self.consume(TokenKind::Alter)?;
        self.consume_keyspace_keyword()?;
        let name = self.parse_identifier("keyspace name")?;
        let (replication, durable_writes) = self.parse_replication()?;
        Ok(AlterKeyspaceStatement {
            name,
            replication,
            durable_writes,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_drop_keyspace(&mut self) -> Result<DropKeyspaceStatement> {
        let start = self.start();
        self.consume(TokenKind::Drop)?;
        self.consume_keyspace_keyword()?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_identifier("keyspace name")?;
        Ok(DropKeyspaceStatement {
            if_exists,
            name,
            span: self.finish(start),
        })
    }

    // ===== Tables =====

    pub(crate) fn parse_create_table(&mut self) -> Result<CreateTableStatement> {
        let start = self.start();
        self.consume(TokenKind::Create)?;
        self.consume_table_keyword()?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name("table name")?;
        self.consume(TokenKind::LParen)?;

        let mut columns = Vec::new();
        let mut primary_key = None;
        loop {
            if self.at(TokenKind::Primary) {
                primary_key = Some(self.parse_primary_key()?);
            } else {
                columns.push(self.parse_column_definition()?);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RParen)?;

        let options = if self.at(TokenKind::With) {
            Some(self.parse_with_options()?)
        } else {
            None
        };
        Ok(CreateTableStatement {
            if_not_exists,
            name,
            columns,
            primary_key,
            options,
            span: self.finish(start),
        })
    }

    fn parse_column_definition(&mut self) -> Result<ColumnDefinition> {
        self.rule("columnDefinition", |p| {
            let start = p.start();
            let name = p.parse_identifier("column name")?;
            let data_type = p.parse_data_type()?;
            let is_static = p.eat(TokenKind::Static);
            let primary_key = if p.eat(TokenKind::Primary) {
                p.consume(TokenKind::Key)?;
                true
            } else {
                false
            };
            Ok(ColumnDefinition {
                name,
                data_type,
                is_static,
                primary_key,
                span: p.finish(start),
            })
        })
    }

    /// `PRIMARY KEY (pk, ck, ...)` or `PRIMARY KEY ((pk1, pk2), ck, ...)`
    pub(crate) fn parse_primary_key(&mut self) -> Result<PrimaryKey> {
        self.rule("primaryKeyElement", |p| {
            let start = p.start();
            p.consume(TokenKind::Primary)?;
            p.consume(TokenKind::Key)?;
            p.consume(TokenKind::LParen)?;
            let (partition, composite) = if p.eat(TokenKind::LParen) {
                let names = p.parse_identifier_list("partition key column")?;
                p.consume(TokenKind::RParen)?;
                (names, true)
            } else {
                (vec![p.parse_identifier("partition key column")?], false)
            };
            let mut clustering = Vec::new();
            while p.eat(TokenKind::Comma) {
                clustering.push(p.parse_identifier("clustering column")?);
            }
            p.consume(TokenKind::RParen)?;
            Ok(PrimaryKey {
                partition,
                clustering,
                composite,
                span: p.finish(start),
            })
        })
    }

    pub(crate) fn parse_alter_table(&mut self) -> Result<AlterTableStatement> {
        let start = self.start();
        self.consume(TokenKind::Alter)?;
        self.consume_table_keyword()?;
        let name = self.parse_qualified_name("table name")?;
        let operation = self.rule("alterTableOperation", |p| match p.peek() {
            TokenKind::Add => {
                p.advance();
                Ok(AlterTableOperation::Add(p.parse_column_type_list()?))
            }
            TokenKind::Drop
                if p.peek_at(1) == TokenKind::Compact && p.peek_at(2) == TokenKind::Storage =>
            {
                p.advance();
                p.advance();
                p.advance();
                Ok(AlterTableOperation::DropCompactStorage)
            }
            TokenKind::Drop => {
                p.advance();
                let parenthesized = p.eat(TokenKind::LParen);
                let columns = p.parse_identifier_list("column name")?;
                if parenthesized {
                    p.consume(TokenKind::RParen)?;
                }
                Ok(AlterTableOperation::Drop(columns))
            }
            TokenKind::Rename => {
                p.advance();
                Ok(AlterTableOperation::Rename(p.parse_renames()?))
            }
            TokenKind::With => Ok(AlterTableOperation::With(p.parse_with_options()?)),
            TokenKind::Alter => {
                p.advance();
                let column = p.parse_identifier("column name")?;
                p.consume(TokenKind::Type)?;
                let data_type = p.parse_data_type()?;
                Ok(AlterTableOperation::AlterType { column, data_type })
            }
            _ => Err(p.expected("'ADD', 'DROP', 'RENAME', 'WITH' or 'ALTER'")),
        })?;
        Ok(AlterTableStatement {
            name,
            operation,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_drop_table(&mut self) -> Result<DropTableStatement> {
        let start = self.start();
        self.consume(TokenKind::Drop)?;
        self.consume_table_keyword()?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_qualified_name("table name")?;
        Ok(DropTableStatement {
            if_exists,
            name,
            span: self.finish(start),
        })
    }

    // ===== User-defined types =====

    pub(crate) fn parse_create_type(&mut self) -> Result<CreateTypeStatement> {
        let start = self.start();
        self.consume(TokenKind::Create)?;
        self.consume(TokenKind::Type)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name("type name")?;
        if !self.at(TokenKind::LParen) {
            return Err(self.expected("'('"));
        }
        let fields = self.parse_column_type_list()?;
        Ok(CreateTypeStatement {
            if_not_exists,
            name,
            fields,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_alter_type(&mut self) -> Result<AlterTypeStatement> {
        let start = self.start();
        self.consume(TokenKind::Alter)?;
        self.consume(TokenKind::Type)?;
        let name = self.parse_qualified_name("type name")?;
        let operation = match self.peek() {
            TokenKind::Alter => {
                self.advance();
                let field = self.parse_identifier("field name")?;
                self.consume(TokenKind::Type)?;
                let data_type = self.parse_data_type()?;
                AlterTypeOperation::AlterType { field, data_type }
            }
            TokenKind::Add => {
                self.advance();
                AlterTypeOperation::Add(self.parse_column_type_list()?)
            }
            TokenKind::Rename => {
                self.advance();
                AlterTypeOperation::Rename(self.parse_renames()?)
            }
            _ => return Err(self.expected("'ALTER', 'ADD' or 'RENAME'")),
        };
        Ok(AlterTypeStatement {
            name,
            operation,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_drop_type(&mut self) -> Result<DropTypeStatement> {
        let start = self.start();
        self.consume(TokenKind::Drop)?;
        self.consume(TokenKind::Type)?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_qualified_name("type name")?;
        Ok(DropTypeStatement {
            if_exists,
            name,
            span: self.finish(start),
        })
    }

    // ===== Indexes =====

    pub(crate) fn parse_create_index(&mut self) -> Result<CreateIndexStatement> {
        let start = self.start();
        self.consume(TokenKind::Create)?;
        let custom = self.eat(TokenKind::Custom);
        self.consume(TokenKind::Index)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = if self.at(TokenKind::On) {
            None
        } else {
            Some(self.parse_identifier("index name")?)
        };
        self.consume(TokenKind::On)?;
        let table = self.parse_qualified_name("table name")?;
        self.consume(TokenKind::LParen)?;
        let target = self.parse_index_target()?;
        self.consume(TokenKind::RParen)?;
        let using = if self.eat(TokenKind::Using) {
            Some(self.parse_string()?)
        } else {
            None
        };
        Ok(CreateIndexStatement {
            custom,
            if_not_exists,
            name,
            table,
            target,
            using,
            span: self.finish(start),
        })
    }

    fn parse_index_target(&mut self) -> Result<IndexTarget> {
        let start = self.start();
        let kind = match self.peek() {
            TokenKind::Keys => IndexTargetKind::Keys,
            TokenKind::Entries => IndexTargetKind::Entries,
            TokenKind::Full => IndexTargetKind::Full,
            TokenKind::Values => IndexTargetKind::Values,
            _ => {
                let column = self.parse_identifier("column name")?;
                return Ok(IndexTarget {
                    kind: IndexTargetKind::Column,
                    column,
                    span: self.finish(start),
                });
            }
        };
        self.advance();
        self.consume(TokenKind::LParen)?;
        let column = self.parse_identifier("column name")?;
        self.consume(TokenKind::RParen)?;
        Ok(IndexTarget {
            kind,
            column,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_drop_index(&mut self) -> Result<DropIndexStatement> {
        let start = self.start();
        self.consume(TokenKind::Drop)?;
        self.consume(TokenKind::Index)?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_qualified_name("index name")?;
        Ok(DropIndexStatement {
            if_exists,
            name,
            span: self.finish(start),
        })
    }

    // ===== Triggers =====

    pub(crate) fn parse_create_trigger(&mut self) -> Result<CreateTriggerStatement> {
        let start = self.start();
        self.consume(TokenKind::Create)?;
        self.consume(TokenKind::Trigger)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_identifier("trigger name")?;
        self.consume(TokenKind::On)?;
        let table = self.parse_qualified_name("table name")?;
        self.consume(TokenKind::Using)?;
        let class = self.parse_string()?;
        Ok(CreateTriggerStatement {
            if_not_exists,
            name,
            table,
            class,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_drop_trigger(&mut self) -> Result<DropTriggerStatement> {
        let start = self.start();
        self.consume(TokenKind::Drop)?;
        self.consume(TokenKind::Trigger)?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_identifier("trigger name")?;
        self.consume(TokenKind::On)?;
        let table = self.parse_qualified_name("table name")?;
        Ok(DropTriggerStatement {
            if_exists,
            name,
            table,
            span: self.finish(start),
        })
    }

    // ===== Materialized views =====

    fn consume_materialized_view(&mut self) -> Result<()> {
        self.consume(TokenKind::Materialized)?;
        self.consume(TokenKind::View)?;
        Ok(())
    }

    pub(crate) fn parse_create_materialized_view(
        &mut self,
    ) -> Result<CreateMaterializedViewStatement> {
        let start = self.start();
        self.consume(TokenKind::Create)?;
        self.consume_materialized_view()?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name("view name")?;
        self.consume(TokenKind::As)?;
        self.consume(TokenKind::Select)?;
        let columns = if self.at(TokenKind::Star) {
            SelectElements::Star(self.advance().span)
        } else {
            SelectElements::List(self.parse_select_elements()?)
        };
        self.consume(TokenKind::From)?;
        let base_table = self.parse_qualified_name("table name")?;
        let where_clause = self.parse_view_where()?;
        let primary_key = self.parse_primary_key()?;
        let options = if self.at(TokenKind::With) {
            Some(self.parse_with_options()?)
        } else {
            None
        };
        Ok(CreateMaterializedViewStatement {
            if_not_exists,
            name,
            columns,
            base_table,
            where_clause,
            primary_key,
            options,
            span: self.finish(start),
        })
    }

    fn parse_view_where(&mut self) -> Result<ViewWhere> {
        let start = self.start();
        self.consume(TokenKind::Where)?;
        let mut conditions = vec![self.parse_view_condition()?];
        while self.eat(TokenKind::And) {
            conditions.push(self.parse_view_condition()?);
        }
        Ok(ViewWhere {
            conditions,
            span: self.finish(start),
        })
    }

    /// `col IS NOT NULL` or an ordinary relation
    fn parse_view_condition(&mut self) -> Result<ViewCondition> {
        if self.at_name() && self.peek_at(1) == TokenKind::Is {
            let start = self.start();
            let column = self.parse_identifier("column name")?;
            self.consume(TokenKind::Is)?;
            self.consume(TokenKind::Not)?;
            self.consume(TokenKind::Null)?;
            return Ok(ViewCondition::NotNull {
                column,
                span: self.finish(start),
            });
        }
        Ok(ViewCondition::Relation(self.parse_relation()?))
    }

    pub(crate) fn parse_alter_materialized_view(
        &mut self,
    ) -> Result<AlterMaterializedViewStatement> {
        let start = self.start();
        self.consume(TokenKind::Alter)?;
        self.consume_materialized_view()?;
        let name = self.parse_qualified_name("view name")?;
        let options = if self.at(TokenKind::With) {
            Some(self.parse_with_options()?)
        } else {
            None
        };
        Ok(AlterMaterializedViewStatement {
            name,
            options,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_drop_materialized_view(
        &mut self,
    ) -> Result<DropMaterializedViewStatement> {
        let start = self.start();
        self.consume(TokenKind::Drop)?;
        self.consume_materialized_view()?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_qualified_name("view name")?;
        Ok(DropMaterializedViewStatement {
            if_exists,
            name,
            span: self.finish(start),
        })
    }
}
