//! Canonical CQL printer
//!
//! Renders trees back to CQL text with upper-case keywords and single spaces.
//! Re-parsing the output yields the same tree modulo spans.

use std::fmt::{self, Display, Formatter};

use crate::*;

/// Write `items` separated by `sep`
fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_pairs<A: Display, B: Display>(
    f: &mut Formatter<'_>,
    items: &[(A, B)],
    inner: &str,
    sep: &str,
) -> fmt::Result {
    for (i, (a, b)) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}{}{}", a, inner, b)?;
    }
    Ok(())
}

fn if_not_exists(flag: bool) -> &'static str {
    if flag {
        " IF NOT EXISTS"
    } else {
        ""
    }
}

fn if_exists(flag: bool) -> &'static str {
    if flag {
        " IF EXISTS"
    } else {
        ""
    }
}

// ===== Names and types =====

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "\"{}\"", self.name.replace('"', "\"\""))
        } else {
            f.write_str(&self.name)
        }
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ks) = &self.keyspace {
            write!(f, "{}.", ks)?;
        }
        write!(f, "{}", self.name)
    }
}

impl Display for ColumnRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            write!(f, "{}.", table)?;
        }
        write!(f, "{}", self.column)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DataTypeKind::Primitive(p) => f.write_str(p.name()),
            DataTypeKind::List(inner) => write!(f, "list<{}>", inner),
            DataTypeKind::Set(inner) => write!(f, "set<{}>", inner),
            DataTypeKind::Frozen(inner) => write!(f, "frozen<{}>", inner),
            DataTypeKind::Map(k, v) => write!(f, "map<{}, {}>", k, v),
            DataTypeKind::Tuple(items) => {
                f.write_str("tuple<")?;
                write_list(f, items, ", ")?;
                f.write_str(">")
            }
            DataTypeKind::UserDefined(name) => write!(f, "{}", name),
        }
    }
}

// ===== Expressions =====

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConstantKind::Uuid(s)
            | ConstantKind::Decimal(s)
            | ConstantKind::Float(s)
            | ConstantKind::Hex(s) => f.write_str(s),
            ConstantKind::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            ConstantKind::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            ConstantKind::Null => f.write_str("NULL"),
            ConstantKind::CodeBlock(s) => write!(f, "$${}$$", s),
        }
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        match &self.args {
            FunctionArgs::Star => f.write_str("*")?,
            FunctionArgs::List(args) => write_list(f, args, ", ")?,
        }
        f.write_str(")")
    }
}

impl Display for FunctionArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FunctionArg::Constant(c) => write!(f, "{}", c),
            FunctionArg::Column(c) => write!(f, "{}", c),
            FunctionArg::Call(c) => write!(f, "{}", c),
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(c) => write!(f, "{}", c),
            Term::Call(c) => write!(f, "{}", c),
            Term::List(l) => {
                f.write_str("[")?;
                write_list(f, &l.items, ", ")?;
                f.write_str("]")
            }
            Term::Set(s) => write_set(f, s),
            Term::Map(m) => write!(f, "{}", m),
            Term::Tuple(t) => write!(f, "{}", t),
        }
    }
}

fn write_set(f: &mut Formatter<'_>, set: &CollectionLiteral) -> fmt::Result {
    f.write_str("{")?;
    write_list(f, &set.items, ", ")?;
    f.write_str("}")
}

fn write_list_literal(f: &mut Formatter<'_>, list: &CollectionLiteral) -> fmt::Result {
    f.write_str("[")?;
    write_list(f, &list.items, ", ")?;
    f.write_str("]")
}

impl Display for MapLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        write_pairs(f, &self.entries, ": ", ", ")?;
        f.write_str("}")
    }
}

impl Display for TupleLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_list(f, &self.items, ", ")?;
        f.write_str(")")
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RelationKind::Compare { column, op, value } => {
                write!(f, "{} {} {}", column, op.symbol(), value)
            }
            RelationKind::CallCompare { call, op, value } => {
                write!(f, "{} {} {}", call, op.symbol(), value)
            }
            RelationKind::CallToCall { left, op, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
            RelationKind::In { column, values } => {
                write!(f, "{} IN (", column)?;
                write_list(f, values, ", ")?;
                f.write_str(")")
            }
            RelationKind::TupleIn { columns, tuples } => {
                f.write_str("(")?;
                write_list(f, columns, ", ")?;
                f.write_str(") IN (")?;
                write_list(f, tuples, ", ")?;
                f.write_str(")")
            }
            RelationKind::TupleCompare { columns, op, tuples } => {
                f.write_str("(")?;
                write_list(f, columns, ", ")?;
                write!(f, ") {} ", op.symbol())?;
                write_list(f, tuples, ", ")
            }
            RelationKind::Contains { column, value } => write!(f, "{} CONTAINS {}", column, value),
            RelationKind::ContainsKey { column, value } => {
                write!(f, "{} CONTAINS KEY {}", column, value)
            }
        }
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let col = &self.column;
        match &self.kind {
            AssignmentKind::Value(term) => write!(f, "{} = {}", col, term),
            AssignmentKind::Counter { source, op, amount } => {
                write!(f, "{} = {} {} {}", col, source, op.symbol(), amount)
            }
            AssignmentKind::SetAppend { source, op, set } => {
                write!(f, "{} = {} {} ", col, source, op.symbol())?;
                write_set(f, set)
            }
            AssignmentKind::SetPrepend { set, op, source } => {
                write!(f, "{} = ", col)?;
                write_set(f, set)?;
                write!(f, " {} {}", op.symbol(), source)
            }
            AssignmentKind::MapAppend { source, op, map } => {
                write!(f, "{} = {} {} {}", col, source, op.symbol(), map)
            }
            AssignmentKind::MapPrepend { map, op, source } => {
                write!(f, "{} = {} {} {}", col, map, op.symbol(), source)
            }
            AssignmentKind::ListAppend { source, op, list } => {
                write!(f, "{} = {} {} ", col, source, op.symbol())?;
                write_list_literal(f, list)
            }
            AssignmentKind::ListPrepend { list, op, source } => {
                write!(f, "{} = ", col)?;
                write_list_literal(f, list)?;
                write!(f, " {} {}", op.symbol(), source)
            }
            AssignmentKind::Indexed { index, value } => write!(f, "{}[{}] = {}", col, index, value),
        }
    }
}

// ===== DML =====

impl Display for SelectElements {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SelectElements::Star(_) => f.write_str("*"),
            SelectElements::List(items) => write_list(f, items, ", "),
        }
    }
}

impl Display for SelectElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SelectElementKind::Column(c) => write!(f, "{}", c)?,
            SelectElementKind::TableStar(t) => write!(f, "{}.*", t)?,
            SelectElementKind::Call(c) => write!(f, "{}", c)?,
        }
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        Ok(())
    }
}

impl Display for WhereClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("WHERE ")?;
        write_list(f, &self.relations, " AND ")
    }
}

impl Display for OrderItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)?;
        if let Some(dir) = self.direction {
            write!(f, " {}", dir.keyword())?;
        }
        Ok(())
    }
}

impl Display for SelectStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT")?;
        if self.json {
            f.write_str(" JSON")?;
        }
        if self.distinct {
            f.write_str(" DISTINCT")?;
        }
        if let Some(elements) = &self.elements {
            write!(f, " {}", elements)?;
        }
        if let Some(from) = &self.from {
            f.write_str(" FROM")?;
            if let Some(table) = &from.table {
                write!(f, " {}", table)?;
            }
        }
        if let Some(w) = &self.where_clause {
            write!(f, " {}", w)?;
        }
        if let Some(order) = &self.order_by {
            f.write_str(" ORDER BY ")?;
            write_list(f, &order.items, ", ")?;
        }
        if let Some(limit) = &self.per_partition_limit {
            write!(f, " PER PARTITION LIMIT {}", limit)?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        if self.allow_filtering {
            f.write_str(" ALLOW FILTERING")?;
        }
        Ok(())
    }
}

impl Display for BeginBatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("BEGIN ")?;
        match self.kind {
            Some(BatchKind::Logged) => f.write_str("LOGGED ")?,
            Some(BatchKind::Unlogged) => f.write_str("UNLOGGED ")?,
            None => {}
        }
        f.write_str("BATCH")?;
        if let Some(ts) = &self.timestamp {
            write!(f, " USING TIMESTAMP {}", ts)?;
        }
        Ok(())
    }
}

impl Display for UsingItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UsingItem::Ttl(c) => write!(f, "TTL {}", c),
            UsingItem::Timestamp(c) => write!(f, "TIMESTAMP {}", c),
        }
    }
}

impl Display for UsingClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("USING ")?;
        write_list(f, &self.items, " AND ")
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Condition::IfExists(_) => f.write_str("IF EXISTS"),
            Condition::If(conditions) => {
                f.write_str("IF ")?;
                write_list(f, conditions, " AND ")
            }
        }
    }
}

impl Display for IfCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.op.symbol(), self.value)
    }
}

impl Display for InsertStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(batch) = &self.begin_batch {
            write!(f, "{} ", batch)?;
        }
        write!(f, "INSERT INTO {}", self.table)?;
        if let Some(columns) = &self.columns {
            f.write_str(" (")?;
            write_list(f, columns, ", ")?;
            f.write_str(")")?;
        }
        match &self.values {
            InsertValues::Values(values) => {
                f.write_str(" VALUES (")?;
                write_list(f, values, ", ")?;
                f.write_str(")")?;
            }
            InsertValues::Json(json) => write!(f, " JSON {}", json)?,
        }
        f.write_str(if_not_exists(self.if_not_exists))?;
        if let Some(using) = &self.using {
            write!(f, " {}", using)?;
        }
        Ok(())
    }
}

impl Display for UpdateStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(batch) = &self.begin_batch {
            write!(f, "{} ", batch)?;
        }
        write!(f, "UPDATE {}", self.table)?;
        if let Some(using) = &self.using {
            write!(f, " {}", using)?;
        }
        f.write_str(" SET ")?;
        write_list(f, &self.assignments, ", ")?;
        write!(f, " {}", self.where_clause)?;
        if let Some(cond) = &self.condition {
            write!(f, " {}", cond)?;
        }
        Ok(())
    }
}

impl Display for DeleteColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)?;
        if let Some(index) = &self.index {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

impl Display for DeleteStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(batch) = &self.begin_batch {
            write!(f, "{} ", batch)?;
        }
        f.write_str("DELETE")?;
        if !self.columns.is_empty() {
            f.write_str(" ")?;
            write_list(f, &self.columns, ", ")?;
        }
        write!(f, " FROM {}", self.table)?;
        if let Some(ts) = &self.timestamp {
            write!(f, " USING TIMESTAMP {}", ts)?;
        }
        write!(f, " {}", self.where_clause)?;
        if let Some(cond) = &self.condition {
            write!(f, " {}", cond)?;
        }
        Ok(())
    }
}

// ===== DDL =====

impl Display for OptionMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        write_pairs(f, &self.entries, ": ", ", ")?;
        f.write_str("}")
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Constant(c) => write!(f, "{}", c),
            PropertyValue::Map(m) => write!(f, "{}", m),
        }
    }
}

impl Display for TableProperty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TableProperty::Option { name, value, .. } => {
                write!(f, "{}", name)?;
                if let Some(value) = value {
                    write!(f, " = {}", value)?;
                }
                Ok(())
            }
            TableProperty::ClusteringOrder { columns, .. } => {
                f.write_str("CLUSTERING ORDER BY (")?;
                for (i, (column, dir)) in columns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} {}", column, dir.keyword())?;
                }
                f.write_str(")")
            }
            TableProperty::CompactStorage(_) => f.write_str("COMPACT STORAGE"),
        }
    }
}

impl Display for WithOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("WITH ")?;
        write_list(f, &self.properties, " AND ")
    }
}

fn write_replication(
    f: &mut Formatter<'_>,
    replication: &OptionMap,
    durable_writes: Option<bool>,
) -> fmt::Result {
    write!(f, " WITH REPLICATION = {}", replication)?;
    if let Some(durable) = durable_writes {
        write!(f, " AND DURABLE_WRITES = {}", durable)?;
    }
    Ok(())
}

impl Display for CreateKeyspaceStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE KEYSPACE{} {}", if_not_exists(self.if_not_exists), self.name)?;
        write_replication(f, &self.replication, self.durable_writes)
    }
}

impl Display for AlterKeyspaceStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER KEYSPACE {}", self.name)?;
        write_replication(f, &self.replication, self.durable_writes)
    }
}

impl Display for DropKeyspaceStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DROP KEYSPACE{} {}", if_exists(self.if_exists), self.name)
    }
}

impl Display for ColumnDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if self.is_static {
            f.write_str(" STATIC")?;
        }
        if self.primary_key {
            f.write_str(" PRIMARY KEY")?;
        }
        Ok(())
    }
}

impl Display for PrimaryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("PRIMARY KEY (")?;
        if self.composite {
            f.write_str("(")?;
            write_list(f, &self.partition, ", ")?;
            f.write_str(")")?;
        } else {
            write_list(f, &self.partition, ", ")?;
        }
        for column in &self.clustering {
            write!(f, ", {}", column)?;
        }
        f.write_str(")")
    }
}

impl Display for CreateTableStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE TABLE{} {} (", if_not_exists(self.if_not_exists), self.name)?;
        write_list(f, &self.columns, ", ")?;
        if let Some(pk) = &self.primary_key {
            write!(f, ", {}", pk)?;
        }
        f.write_str(")")?;
        if let Some(options) = &self.options {
            write!(f, " {}", options)?;
        }
        Ok(())
    }
}

impl Display for AlterTableStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {} ", self.name)?;
        match &self.operation {
            AlterTableOperation::Add(columns) => {
                f.write_str("ADD ")?;
                write_pairs(f, columns, " ", ", ")
            }
            AlterTableOperation::Drop(columns) => {
                f.write_str("DROP ")?;
                write_list(f, columns, ", ")
            }
            AlterTableOperation::DropCompactStorage => f.write_str("DROP COMPACT STORAGE"),
            AlterTableOperation::Rename(pairs) => {
                f.write_str("RENAME ")?;
                write_pairs(f, pairs, " TO ", " AND ")
            }
            AlterTableOperation::With(options) => write!(f, "{}", options),
            AlterTableOperation::AlterType { column, data_type } => {
                write!(f, "ALTER {} TYPE {}", column, data_type)
            }
        }
    }
}

impl Display for DropTableStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DROP TABLE{} {}", if_exists(self.if_exists), self.name)
    }
}

impl Display for CreateTypeStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE TYPE{} {} (", if_not_exists(self.if_not_exists), self.name)?;
        write_pairs(f, &self.fields, " ", ", ")?;
        f.write_str(")")
    }
}

impl Display for AlterTypeStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TYPE {} ", self.name)?;
        match &self.operation {
            AlterTypeOperation::AlterType { field, data_type } => {
                write!(f, "ALTER {} TYPE {}", field, data_type)
            }
            AlterTypeOperation::Add(fields) => {
                f.write_str("ADD ")?;
                write_pairs(f, fields, " ", ", ")
            }
            AlterTypeOperation::Rename(pairs) => {
                f.write_str("RENAME ")?;
                write_pairs(f, pairs, " TO ", " AND ")
            }
        }
    }
}

impl Display for DropTypeStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DROP TYPE{} {}", if_exists(self.if_exists), self.name)
    }
}

impl Display for IndexTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            IndexTargetKind::Column => write!(f, "{}", self.column),
            IndexTargetKind::Keys => write!(f, "KEYS({})", self.column),
            IndexTargetKind::Entries => write!(f, "ENTRIES({})", self.column),
            IndexTargetKind::Full => write!(f, "FULL({})", self.column),
            IndexTargetKind::Values => write!(f, "VALUES({})", self.column),
        }
    }
}

impl Display for CreateIndexStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.custom {
            f.write_str("CUSTOM ")?;
        }
        write!(f, "INDEX{}", if_not_exists(self.if_not_exists))?;
        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }
        write!(f, " ON {} ({})", self.table, self.target)?;
        if let Some(using) = &self.using {
            write!(f, " USING {}", using)?;
        }
        Ok(())
    }
}

impl Display for DropIndexStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DROP INDEX{} {}", if_exists(self.if_exists), self.name)
    }
}

impl Display for CreateTriggerStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE TRIGGER{} {} ON {} USING {}",
            if_not_exists(self.if_not_exists),
            self.name,
            self.table,
            self.class
        )
    }
}

impl Display for DropTriggerStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DROP TRIGGER{} {} ON {}", if_exists(self.if_exists), self.name, self.table)
    }
}

impl Display for ViewCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ViewCondition::NotNull { column, .. } => write!(f, "{} IS NOT NULL", column),
            ViewCondition::Relation(r) => write!(f, "{}", r),
        }
    }
}

impl Display for CreateMaterializedViewStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE MATERIALIZED VIEW{} {} AS SELECT {} FROM {} WHERE ",
            if_not_exists(self.if_not_exists),
            self.name,
            self.columns,
            self.base_table
        )?;
        write_list(f, &self.where_clause.conditions, " AND ")?;
        write!(f, " {}", self.primary_key)?;
        if let Some(options) = &self.options {
            write!(f, " {}", options)?;
        }
        Ok(())
    }
}

impl Display for AlterMaterializedViewStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER MATERIALIZED VIEW {}", self.name)?;
        if let Some(options) = &self.options {
            write!(f, " {}", options)?;
        }
        Ok(())
    }
}

impl Display for DropMaterializedViewStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DROP MATERIALIZED VIEW{} {}", if_exists(self.if_exists), self.name)
    }
}

fn or_replace(flag: bool) -> &'static str {
    if flag {
        " OR REPLACE"
    } else {
        ""
    }
}

impl Display for CreateFunctionStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE{} FUNCTION{} {} (",
            or_replace(self.or_replace),
            if_not_exists(self.if_not_exists),
            self.name
        )?;
        write_pairs(f, &self.params, " ", ", ")?;
        f.write_str(") ")?;
        match self.on_null_input {
            NullInputBehavior::Called => f.write_str("CALLED")?,
            NullInputBehavior::ReturnsNull => f.write_str("RETURNS NULL")?,
        }
        write!(
            f,
            " ON NULL INPUT RETURNS {} LANGUAGE {} AS {}",
            self.returns, self.language, self.body
        )
    }
}

fn write_signature(f: &mut Formatter<'_>, signature: &Option<Vec<DataType>>) -> fmt::Result {
    if let Some(types) = signature {
        f.write_str(" (")?;
        write_list(f, types, ", ")?;
        f.write_str(")")?;
    }
    Ok(())
}

impl Display for DropFunctionStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DROP FUNCTION{} {}", if_exists(self.if_exists), self.name)?;
        write_signature(f, &self.signature)
    }
}

impl Display for InitCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InitCondition::Constant(c) => write!(f, "{}", c),
            InitCondition::List { items, .. } => {
                f.write_str("(")?;
                write_list(f, items, ", ")?;
                f.write_str(")")
            }
            InitCondition::Hash { entries, .. } => {
                f.write_str("{")?;
                write_pairs(f, entries, ": ", ", ")?;
                f.write_str("}")
            }
        }
    }
}

impl Display for CreateAggregateStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE{} AGGREGATE{} {} (",
            or_replace(self.or_replace),
            if_not_exists(self.if_not_exists),
            self.name
        )?;
        write_list(f, &self.arg_types, ", ")?;
        write!(f, ") SFUNC {} STYPE {}", self.sfunc, self.stype)?;
        if let Some(finalfunc) = &self.finalfunc {
            write!(f, " FINALFUNC {}", finalfunc)?;
        }
        if let Some(initcond) = &self.initcond {
            write!(f, " INITCOND {}", initcond)?;
        }
        Ok(())
    }
}

impl Display for DropAggregateStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DROP AGGREGATE{} {}", if_exists(self.if_exists), self.name)?;
        write_signature(f, &self.signature)
    }
}

// ===== DCL =====

impl Display for RoleOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RoleOption::Password(p) => write!(f, "PASSWORD = {}", p),
            RoleOption::Login(b) => write!(f, "LOGIN = {}", b),
            RoleOption::Superuser(b) => write!(f, "SUPERUSER = {}", b),
            RoleOption::Options(m) => write!(f, "OPTIONS = {}", m),
        }
    }
}

fn write_role_options(f: &mut Formatter<'_>, options: &[RoleOption]) -> fmt::Result {
    if !options.is_empty() {
        f.write_str(" WITH ")?;
        write_list(f, options, " AND ")?;
    }
    Ok(())
}

impl Display for CreateRoleStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE ROLE{} {}", if_not_exists(self.if_not_exists), self.name)?;
        write_role_options(f, &self.options)
    }
}

impl Display for AlterRoleStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER ROLE {}", self.name)?;
        write_role_options(f, &self.options)
    }
}

impl Display for DropRoleStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DROP ROLE{} {}", if_exists(self.if_exists), self.name)
    }
}

fn write_superuser(f: &mut Formatter<'_>, superuser: Option<bool>) -> fmt::Result {
    match superuser {
        Some(true) => f.write_str(" SUPERUSER"),
        Some(false) => f.write_str(" NOSUPERUSER"),
        None => Ok(()),
    }
}

impl Display for CreateUserStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE USER{} {} WITH PASSWORD {}",
            if_not_exists(self.if_not_exists),
            self.name,
            self.password
        )?;
        write_superuser(f, self.superuser)
    }
}

impl Display for AlterUserStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER USER {} WITH PASSWORD {}", self.name, self.password)?;
        write_superuser(f, self.superuser)
    }
}

impl Display for DropUserStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DROP USER{} {}", if_exists(self.if_exists), self.name)
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Resource::AllFunctions => f.write_str("ALL FUNCTIONS"),
            Resource::AllFunctionsInKeyspace(ks) => write!(f, "ALL FUNCTIONS IN KEYSPACE {}", ks),
            Resource::Function(name) => write!(f, "FUNCTION {}", name),
            Resource::AllKeyspaces => f.write_str("ALL KEYSPACES"),
            Resource::Keyspace(ks) => write!(f, "KEYSPACE {}", ks),
            Resource::Table { name, table_keyword } => {
                if *table_keyword {
                    f.write_str("TABLE ")?;
                }
                write!(f, "{}", name)
            }
            Resource::AllRoles => f.write_str("ALL ROLES"),
            Resource::Role(role) => write!(f, "ROLE {}", role),
        }
    }
}

impl Display for GrantStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GRANT {} ON {} TO {}",
            self.privilege.keyword(),
            self.resource,
            self.role
        )
    }
}

impl Display for RevokeStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "REVOKE {} ON {} FROM {}",
            self.privilege.keyword(),
            self.resource,
            self.role
        )
    }
}

impl Display for ListPermissionsStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "LIST {}", self.privilege.keyword())?;
        if let Some(resource) = &self.resource {
            write!(f, " ON {}", resource)?;
        }
        if let Some(of) = &self.of {
            write!(f, " OF {}", of)?;
        }
        if self.norecursive {
            f.write_str(" NORECURSIVE")?;
        }
        Ok(())
    }
}

impl Display for ListRolesStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("LIST ROLES")?;
        if let Some(of) = &self.of {
            write!(f, " OF {}", of)?;
        }
        if self.norecursive {
            f.write_str(" NORECURSIVE")?;
        }
        Ok(())
    }
}

// ===== Statements =====

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::AlterKeyspace(s) => write!(f, "{}", s),
            Statement::AlterMaterializedView(s) => write!(f, "{}", s),
            Statement::AlterRole(s) => write!(f, "{}", s),
            Statement::AlterTable(s) => write!(f, "{}", s),
            Statement::AlterType(s) => write!(f, "{}", s),
            Statement::AlterUser(s) => write!(f, "{}", s),
            Statement::ApplyBatch(_) => f.write_str("APPLY BATCH"),
            Statement::CreateAggregate(s) => write!(f, "{}", s),
            Statement::CreateFunction(s) => write!(f, "{}", s),
            Statement::CreateIndex(s) => write!(f, "{}", s),
            Statement::CreateKeyspace(s) => write!(f, "{}", s),
            Statement::CreateMaterializedView(s) => write!(f, "{}", s),
            Statement::CreateRole(s) => write!(f, "{}", s),
            Statement::CreateTable(s) => write!(f, "{}", s),
            Statement::CreateTrigger(s) => write!(f, "{}", s),
            Statement::CreateType(s) => write!(f, "{}", s),
            Statement::CreateUser(s) => write!(f, "{}", s),
            Statement::Delete(s) => write!(f, "{}", s),
            Statement::DropAggregate(s) => write!(f, "{}", s),
            Statement::DropFunction(s) => write!(f, "{}", s),
            Statement::DropIndex(s) => write!(f, "{}", s),
            Statement::DropKeyspace(s) => write!(f, "{}", s),
            Statement::DropMaterializedView(s) => write!(f, "{}", s),
            Statement::DropRole(s) => write!(f, "{}", s),
            Statement::DropTable(s) => write!(f, "{}", s),
            Statement::DropTrigger(s) => write!(f, "{}", s),
            Statement::DropType(s) => write!(f, "{}", s),
            Statement::DropUser(s) => write!(f, "{}", s),
            Statement::Grant(s) => write!(f, "{}", s),
            Statement::Insert(s) => write!(f, "{}", s),
            Statement::ListPermissions(s) => write!(f, "{}", s),
            Statement::ListRoles(s) => write!(f, "{}", s),
            Statement::Revoke(s) => write!(f, "{}", s),
            Statement::Select(s) => write!(f, "{}", s),
            Statement::Truncate(s) => {
                f.write_str("TRUNCATE ")?;
                if s.table_keyword {
                    f.write_str("TABLE ")?;
                }
                write!(f, "{}", s.table)
            }
            Statement::Update(s) => write!(f, "{}", s),
            Statement::Use(s) => write!(f, "USE {}", s.keyspace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Identifier {
        Identifier::new(name, Span::dummy())
    }

    fn decimal(text: &str) -> Constant {
        Constant::new(ConstantKind::Decimal(text.to_string()), Span::dummy())
    }

    #[test]
    fn test_quoted_identifier_escapes() {
        let id = Identifier::quoted("say \"hi\"", Span::dummy());
        assert_eq!(id.to_string(), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_string_constant_escapes() {
        let c = Constant::new(ConstantKind::String("it's".to_string()), Span::dummy());
        assert_eq!(c.to_string(), "'it''s'");
    }

    #[test]
    fn test_counter_assignment() {
        let a = Assignment {
            column: ident("hits"),
            kind: AssignmentKind::Counter {
                source: ident("hits"),
                op: ArithOp::Add,
                amount: decimal("1"),
            },
            span: Span::dummy(),
        };
        assert_eq!(a.to_string(), "hits = hits + 1");
    }

    #[test]
    fn test_composite_primary_key() {
        let pk = PrimaryKey {
            partition: vec![ident("a"), ident("b")],
            clustering: vec![ident("c")],
            composite: true,
            span: Span::dummy(),
        };
        assert_eq!(pk.to_string(), "PRIMARY KEY ((a, b), c)");
    }
}
