//! Schema definition statements

use serde::{Deserialize, Serialize};
use crate::{
    Constant, DataType, Identifier, OrderDirection, QualifiedName, Relation, SelectElements, Span,
};

// ===== Shared clauses =====

/// `{'class': 'SimpleStrategy', 'replication_factor': 3}` entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionMap {
    pub entries: Vec<(Constant, Constant)>,
    pub span: Span,
}

/// `WITH prop AND prop ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithOptions {
    pub properties: Vec<TableProperty>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableProperty {
    /// `name = value` or a bare `name`
    Option {
        name: Identifier,
        value: Option<PropertyValue>,
        span: Span,
    },
    /// `CLUSTERING ORDER BY (c ASC, ...)`
    ClusteringOrder {
        columns: Vec<(Identifier, OrderDirection)>,
        span: Span,
    },
    /// `COMPACT STORAGE`
    CompactStorage(Span),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Constant(Constant),
    Map(OptionMap),
}

impl WithOptions {
    pub fn option(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.iter().find_map(|p| match p {
            TableProperty::Option { name: n, value, .. } if n.normalized() == name => value.as_ref(),
            _ => None,
        })
    }
}

// ===== Keyspaces =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateKeyspaceStatement {
    pub if_not_exists: bool,
    pub name: Identifier,
    pub replication: OptionMap,
    pub durable_writes: Option<bool>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterKeyspaceStatement {
    pub name: Identifier,
    pub replication: OptionMap,
    pub durable_writes: Option<bool>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropKeyspaceStatement {
    pub if_exists: bool,
    pub name: Identifier,
    pub span: Span,
}

// ===== Tables =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableStatement {
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub columns: Vec<ColumnDefinition>,
    /// Trailing `PRIMARY KEY (...)` element, if any
    pub primary_key: Option<PrimaryKey>,
    pub options: Option<WithOptions>,
    pub span: Span,
}

impl CreateTableStatement {
    /// Names of the partition key columns, whichever way they were declared
    pub fn partition_key(&self) -> Vec<&Identifier> {
        if let Some(pk) = &self.primary_key {
            return pk.partition.iter().collect();
        }
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| &c.name)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: Identifier,
    pub data_type: DataType,
    pub is_static: bool,
    /// Inline `PRIMARY KEY`
    pub primary_key: bool,
    pub span: Span,
}

/// `PRIMARY KEY (p, c1, c2)` or `PRIMARY KEY ((p1, p2), c1)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub partition: Vec<Identifier>,
    pub clustering: Vec<Identifier>,
    /// Partition key written in its own parentheses
    pub composite: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterTableStatement {
    pub name: QualifiedName,
    pub operation: AlterTableOperation,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlterTableOperation {
    Add(Vec<(Identifier, DataType)>),
    Drop(Vec<Identifier>),
    DropCompactStorage,
    Rename(Vec<(Identifier, Identifier)>),
    With(WithOptions),
    AlterType { column: Identifier, data_type: DataType },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTableStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
    pub span: Span,
}

// ===== User-defined types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTypeStatement {
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub fields: Vec<(Identifier, DataType)>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterTypeStatement {
    pub name: QualifiedName,
    pub operation: AlterTypeOperation,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlterTypeOperation {
    AlterType { field: Identifier, data_type: DataType },
    Add(Vec<(Identifier, DataType)>),
    Rename(Vec<(Identifier, Identifier)>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTypeStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
    pub span: Span,
}

// ===== Indexes and triggers =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexStatement {
    pub custom: bool,
    pub if_not_exists: bool,
    pub name: Option<Identifier>,
    pub table: QualifiedName,
    pub target: IndexTarget,
    /// `USING 'class'` for custom indexes
    pub using: Option<Constant>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexTarget {
    pub kind: IndexTargetKind,
    pub column: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexTargetKind {
    Column,
    Keys,
    Entries,
    Full,
    Values,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropIndexStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTriggerStatement {
    pub if_not_exists: bool,
    pub name: Identifier,
    pub table: QualifiedName,
    pub class: Constant,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTriggerStatement {
    pub if_exists: bool,
    pub name: Identifier,
    pub table: QualifiedName,
    pub span: Span,
}

// ===== Materialized views =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMaterializedViewStatement {
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub columns: SelectElements,
    pub base_table: QualifiedName,
    pub where_clause: ViewWhere,
    pub primary_key: PrimaryKey,
    pub options: Option<WithOptions>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewWhere {
    pub conditions: Vec<ViewCondition>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewCondition {
    /// `col IS NOT NULL`
    NotNull { column: Identifier, span: Span },
    Relation(Relation),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterMaterializedViewStatement {
    pub name: QualifiedName,
    pub options: Option<WithOptions>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropMaterializedViewStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
    pub span: Span,
}

// ===== Functions and aggregates =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFunctionStatement {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub params: Vec<(Identifier, DataType)>,
    pub on_null_input: NullInputBehavior,
    pub returns: DataType,
    pub language: Identifier,
    /// `$$ ... $$` code block or string literal
    pub body: Constant,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullInputBehavior {
    /// `CALLED ON NULL INPUT`
    Called,
    /// `RETURNS NULL ON NULL INPUT`
    ReturnsNull,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropFunctionStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
    /// Argument types selecting one overload
    pub signature: Option<Vec<DataType>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAggregateStatement {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub arg_types: Vec<DataType>,
    pub sfunc: Identifier,
    pub stype: DataType,
    pub finalfunc: Option<Identifier>,
    pub initcond: Option<InitCondition>,
    pub span: Span,
}

/// INITCOND value: a constant, a parenthesized (possibly nested) list, or a hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InitCondition {
    Constant(Constant),
    List { items: Vec<InitCondition>, span: Span },
    Hash { entries: Vec<(Identifier, InitCondition)>, span: Span },
}

impl InitCondition {
    pub fn span(&self) -> Span {
        match self {
            InitCondition::Constant(c) => c.span,
            InitCondition::List { span, .. } | InitCondition::Hash { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropAggregateStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
    pub signature: Option<Vec<DataType>>,
    pub span: Span,
}
