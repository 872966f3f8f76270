//! Data manipulation statements: SELECT, INSERT, UPDATE, DELETE, BATCH, TRUNCATE, USE

use serde::{Deserialize, Serialize};
use crate::{
    Assignment, CompareOp, Constant, FunctionCall, Identifier, QualifiedName, Relation, Span, Term,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    pub distinct: bool,
    pub json: bool,
    /// `None` when the element list is missing (reported as a structural gap)
    pub elements: Option<SelectElements>,
    /// `None` when FROM is missing (reported as a structural gap)
    pub from: Option<FromSpec>,
    pub where_clause: Option<WhereClause>,
    pub order_by: Option<OrderBy>,
    pub per_partition_limit: Option<Constant>,
    pub limit: Option<Constant>,
    pub allow_filtering: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectElements {
    Star(Span),
    List(Vec<SelectElement>),
}

impl SelectElements {
    pub fn len(&self) -> usize {
        match self {
            SelectElements::Star(_) => 1,
            SelectElements::List(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectElement {
    pub kind: SelectElementKind,
    pub alias: Option<Identifier>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectElementKind {
    Column(Identifier),
    /// `t.*`
    TableStar(Identifier),
    Call(FunctionCall),
}

/// `FROM ks.table`; `table` is `None` when the name after FROM is missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromSpec {
    pub table: Option<QualifiedName>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    pub relations: Vec<Relation>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub items: Vec<OrderItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub column: Identifier,
    pub direction: Option<OrderDirection>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// `BEGIN [UNLOGGED|LOGGED] BATCH [USING TIMESTAMP n]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeginBatch {
    pub kind: Option<BatchKind>,
    pub timestamp: Option<Constant>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchKind {
    Logged,
    Unlogged,
}

/// `USING TTL n AND TIMESTAMP n`, items kept in source order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsingClause {
    pub items: Vec<UsingItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UsingItem {
    Ttl(Constant),
    Timestamp(Constant),
}

impl UsingClause {
    pub fn ttl(&self) -> Option<&Constant> {
        self.items.iter().find_map(|item| match item {
            UsingItem::Ttl(c) => Some(c),
            UsingItem::Timestamp(_) => None,
        })
    }

    pub fn timestamp(&self) -> Option<&Constant> {
        self.items.iter().find_map(|item| match item {
            UsingItem::Timestamp(c) => Some(c),
            UsingItem::Ttl(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStatement {
    pub begin_batch: Option<BeginBatch>,
    pub table: QualifiedName,
    pub columns: Option<Vec<Identifier>>,
    pub values: InsertValues,
    pub if_not_exists: bool,
    pub using: Option<UsingClause>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InsertValues {
    Values(Vec<Term>),
    Json(Constant),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatement {
    pub begin_batch: Option<BeginBatch>,
    pub table: QualifiedName,
    pub using: Option<UsingClause>,
    pub assignments: Vec<Assignment>,
    pub where_clause: WhereClause,
    pub condition: Option<Condition>,
    pub span: Span,
}

/// Lightweight-transaction guard on UPDATE / DELETE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    IfExists(Span),
    If(Vec<IfCondition>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfCondition {
    pub column: Identifier,
    pub op: CompareOp,
    pub value: Constant,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatement {
    pub begin_batch: Option<BeginBatch>,
    pub columns: Vec<DeleteColumn>,
    pub table: QualifiedName,
    pub timestamp: Option<Constant>,
    pub where_clause: WhereClause,
    pub condition: Option<Condition>,
    pub span: Span,
}

/// `col` or `col[key]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteColumn {
    pub column: Identifier,
    pub index: Option<Constant>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyBatchStatement {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruncateStatement {
    /// Whether the optional TABLE keyword was written
    pub table_keyword: bool,
    pub table: QualifiedName,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseStatement {
    pub keyspace: Identifier,
    pub span: Span,
}
