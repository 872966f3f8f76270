//! CQL data types

use serde::{Deserialize, Serialize};
use crate::{QualifiedName, Span};

/// A data type expression: `int`, `map<text, frozen<list<int>>>`, `ks.address`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataType {
    pub kind: DataTypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataTypeKind {
    Primitive(PrimitiveType),
    List(Box<DataType>),
    Set(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    Tuple(Vec<DataType>),
    Frozen(Box<DataType>),
    /// Any identifier-shaped name that is not a built-in type
    UserDefined(QualifiedName),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    Date,
    Decimal,
    Double,
    Duration,
    Float,
    Inet,
    Int,
    Smallint,
    Text,
    Time,
    Timestamp,
    Timeuuid,
    Tinyint,
    Uuid,
    Varchar,
    Varint,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 21] = [
        PrimitiveType::Ascii,
        PrimitiveType::Bigint,
        PrimitiveType::Blob,
        PrimitiveType::Boolean,
        PrimitiveType::Counter,
        PrimitiveType::Date,
        PrimitiveType::Decimal,
        PrimitiveType::Double,
        PrimitiveType::Duration,
        PrimitiveType::Float,
        PrimitiveType::Inet,
        PrimitiveType::Int,
        PrimitiveType::Smallint,
        PrimitiveType::Text,
        PrimitiveType::Time,
        PrimitiveType::Timestamp,
        PrimitiveType::Timeuuid,
        PrimitiveType::Tinyint,
        PrimitiveType::Uuid,
        PrimitiveType::Varchar,
        PrimitiveType::Varint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Ascii => "ascii",
            PrimitiveType::Bigint => "bigint",
            PrimitiveType::Blob => "blob",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Counter => "counter",
            PrimitiveType::Date => "date",
            PrimitiveType::Decimal => "decimal",
            PrimitiveType::Double => "double",
            PrimitiveType::Duration => "duration",
            PrimitiveType::Float => "float",
            PrimitiveType::Inet => "inet",
            PrimitiveType::Int => "int",
            PrimitiveType::Smallint => "smallint",
            PrimitiveType::Text => "text",
            PrimitiveType::Time => "time",
            PrimitiveType::Timestamp => "timestamp",
            PrimitiveType::Timeuuid => "timeuuid",
            PrimitiveType::Tinyint => "tinyint",
            PrimitiveType::Uuid => "uuid",
            PrimitiveType::Varchar => "varchar",
            PrimitiveType::Varint => "varint",
        }
    }
}

impl DataType {
    pub fn new(kind: DataTypeKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self.kind,
            DataTypeKind::List(_) | DataTypeKind::Set(_) | DataTypeKind::Map(_, _)
        )
    }

    /// Nesting depth; a primitive is depth 1
    pub fn depth(&self) -> usize {
        match &self.kind {
            DataTypeKind::Primitive(_) | DataTypeKind::UserDefined(_) => 1,
            DataTypeKind::List(inner) | DataTypeKind::Set(inner) | DataTypeKind::Frozen(inner) => {
                1 + inner.depth()
            }
            DataTypeKind::Map(k, v) => 1 + k.depth().max(v.depth()),
            DataTypeKind::Tuple(items) => 1 + items.iter().map(DataType::depth).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(p: PrimitiveType) -> DataType {
        DataType::new(DataTypeKind::Primitive(p), Span::dummy())
    }

    #[test]
    fn test_depth_of_nested_collections() {
        let inner = DataType::new(DataTypeKind::List(Box::new(prim(PrimitiveType::Int))), Span::dummy());
        let frozen = DataType::new(DataTypeKind::Frozen(Box::new(inner)), Span::dummy());
        let map = DataType::new(
            DataTypeKind::Map(Box::new(prim(PrimitiveType::Text)), Box::new(frozen)),
            Span::dummy(),
        );
        assert_eq!(map.depth(), 4);
        assert!(map.is_collection());
    }
}
