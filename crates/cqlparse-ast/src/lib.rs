//! cqlparse AST - Syntax tree types for CQL3 statements
//!
//! This crate defines the statement and clause nodes, source spans,
//! diagnostics and the canonical printer. Every node records the span
//! of all tokens it consumed so editor tooling can map positions back.

mod span;
mod names;
mod types;
mod expr;
mod dml;
mod ddl;
mod dcl;
mod stmt;
mod diagnostic;
mod printer;

pub use span::*;
pub use names::*;
pub use types::*;
pub use expr::*;
pub use dml::*;
pub use ddl::*;
pub use dcl::*;
pub use stmt::*;
pub use diagnostic::*;
