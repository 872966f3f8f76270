//! Identifiers and keyspace-qualified names

use serde::{Deserialize, Serialize};
use crate::Span;

/// A name as written in the source.
///
/// Unquoted names are case-insensitive in CQL; `"Quoted"` names keep their case.
/// Contextual keywords used as names (`key`, `ttl`, ...) land here as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// Name without surrounding quotes, `""` escapes resolved
    pub name: String,
    pub quoted: bool,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            quoted: false,
            span,
        }
    }

    pub fn quoted(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            quoted: true,
            span,
        }
    }

    /// The name as Cassandra would resolve it
    pub fn normalized(&self) -> String {
        if self.quoted {
            self.name.clone()
        } else {
            self.name.to_ascii_lowercase()
        }
    }

    /// Compare ignoring spans
    pub fn same_name(&self, other: &Identifier) -> bool {
        self.normalized() == other.normalized()
    }
}

/// `keyspace.name` or a bare `name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedName {
    pub keyspace: Option<Identifier>,
    pub name: Identifier,
    pub span: Span,
}

impl QualifiedName {
    pub fn unqualified(name: Identifier) -> Self {
        let span = name.span;
        Self {
            keyspace: None,
            name,
            span,
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.keyspace.is_some()
    }
}

/// A column reference, optionally prefixed by its table: `t.col`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: Option<Identifier>,
    pub column: Identifier,
    pub span: Span,
}

impl ColumnRef {
    pub fn bare(column: Identifier) -> Self {
        let span = column.span;
        Self {
            table: None,
            column,
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_respects_quotes() {
        let plain = Identifier::new("Users", Span::dummy());
        let quoted = Identifier::quoted("Users", Span::dummy());
        assert_eq!(plain.normalized(), "users");
        assert_eq!(quoted.normalized(), "Users");
        assert!(!plain.same_name(&quoted));
        assert!(plain.same_name(&Identifier::new("USERS", Span::new(3, 8))));
    }
}
