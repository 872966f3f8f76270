//! Constants, function calls, relations and assignments

use serde::{Deserialize, Serialize};
use crate::{ColumnRef, Identifier, QualifiedName, Span};

/// A literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub kind: ConstantKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstantKind {
    Uuid(String),
    /// String contents with `''` escapes resolved
    String(String),
    /// Integer literal text, sign included
    Decimal(String),
    /// Float literal text, sign included; also `NaN` and `Infinity`
    Float(String),
    /// `0x...` literal text
    Hex(String),
    Boolean(bool),
    Null,
    /// Body of a `$$ ... $$` block
    CodeBlock(String),
}

impl Constant {
    pub fn new(kind: ConstantKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self.kind, ConstantKind::Decimal(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ConstantKind::String(s) | ConstantKind::CodeBlock(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match &self.kind {
            ConstantKind::Decimal(text) => text.parse().ok(),
            _ => None,
        }
    }
}

/// `name(args)`, `name(*)` or `ks.name(args)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: QualifiedName,
    pub args: FunctionArgs,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FunctionArgs {
    /// `count(*)`
    Star,
    List(Vec<FunctionArg>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FunctionArg {
    Constant(Constant),
    Column(Identifier),
    Call(FunctionCall),
}

impl FunctionArg {
    pub fn span(&self) -> Span {
        match self {
            FunctionArg::Constant(c) => c.span,
            FunctionArg::Column(c) => c.span,
            FunctionArg::Call(c) => c.span,
        }
    }
}

/// A value expression in VALUES lists and SET clauses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    Constant(Constant),
    Call(FunctionCall),
    List(CollectionLiteral),
    Set(CollectionLiteral),
    Map(MapLiteral),
    Tuple(TupleLiteral),
}

impl Term {
    pub fn span(&self) -> Span {
        match self {
            Term::Constant(c) => c.span,
            Term::Call(c) => c.span,
            Term::List(l) | Term::Set(l) => l.span,
            Term::Map(m) => m.span,
            Term::Tuple(t) => t.span,
        }
    }
}

/// `[a, b]` or `{a, b}` depending on where it appears
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionLiteral {
    pub items: Vec<Constant>,
    pub span: Span,
}

/// `{k: v, ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLiteral {
    pub entries: Vec<(Constant, Constant)>,
    pub span: Span,
}

/// `(t1, t2, ...)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleLiteral {
    pub items: Vec<Term>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithOp {
    Add,
    Sub,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
        }
    }
}

/// One predicate of a WHERE clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub kind: RelationKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RelationKind {
    /// `col OP constant`
    Compare {
        column: ColumnRef,
        op: CompareOp,
        value: Constant,
    },
    /// `fn(..) OP constant`
    CallCompare {
        call: FunctionCall,
        op: CompareOp,
        value: Constant,
    },
    /// `fn(..) OP fn(..)`, typically `token(a) > token(b)`
    CallToCall {
        left: FunctionCall,
        op: CompareOp,
        right: FunctionCall,
    },
    /// `col IN (args)`
    In {
        column: ColumnRef,
        values: Vec<FunctionArg>,
    },
    /// `(a, b) IN ((..), (..))`
    TupleIn {
        columns: Vec<Identifier>,
        tuples: Vec<TupleLiteral>,
    },
    /// `(a, b) OP (..)`
    TupleCompare {
        columns: Vec<Identifier>,
        op: CompareOp,
        tuples: Vec<TupleLiteral>,
    },
    /// `col CONTAINS constant`
    Contains { column: ColumnRef, value: Constant },
    /// `col CONTAINS KEY constant`
    ContainsKey { column: ColumnRef, value: Constant },
}

/// One element of an UPDATE's SET clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub column: Identifier,
    pub kind: AssignmentKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssignmentKind {
    /// `col = value`
    Value(Term),
    /// `col = col + 1`
    Counter {
        source: Identifier,
        op: ArithOp,
        amount: Constant,
    },
    /// `col = col + {..}`
    SetAppend {
        source: Identifier,
        op: ArithOp,
        set: CollectionLiteral,
    },
    /// `col = {..} + col`
    SetPrepend {
        set: CollectionLiteral,
        op: ArithOp,
        source: Identifier,
    },
    /// `col = col + {k: v}`
    MapAppend {
        source: Identifier,
        op: ArithOp,
        map: MapLiteral,
    },
    /// `col = {k: v} + col`
    MapPrepend {
        map: MapLiteral,
        op: ArithOp,
        source: Identifier,
    },
    /// `col = col + [..]`
    ListAppend {
        source: Identifier,
        op: ArithOp,
        list: CollectionLiteral,
    },
    /// `col = [..] + col`
    ListPrepend {
        list: CollectionLiteral,
        op: ArithOp,
        source: Identifier,
    },
    /// `col[index] = value`
    Indexed { index: Constant, value: Constant },
}

impl AssignmentKind {
    pub fn form_name(&self) -> &'static str {
        match self {
            AssignmentKind::Value(_) => "value",
            AssignmentKind::Counter { .. } => "counter",
            AssignmentKind::SetAppend { .. } => "setAppend",
            AssignmentKind::SetPrepend { .. } => "setPrepend",
            AssignmentKind::MapAppend { .. } => "mapAppend",
            AssignmentKind::MapPrepend { .. } => "mapPrepend",
            AssignmentKind::ListAppend { .. } => "listAppend",
            AssignmentKind::ListPrepend { .. } => "listPrepend",
            AssignmentKind::Indexed { .. } => "indexed",
        }
    }
}
