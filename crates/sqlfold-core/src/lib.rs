//! # sqlfold-core
//!
//! A SQL syntax tree with dialect-aware rendering and literal parameter
//! extraction.
//!
//! This crate provides:
//! - A hand-written lexer and Pratt parser producing an arena-backed tree
//! - Read-only and mutating visitors with one visit/end-visit pair per node kind
//! - Parameter extraction: literals are replaced by `?` and collected in order
//! - Dialect-bound export visitors selected by database-type tag
//!
//! ## Parameter Extraction
//!
//! Two statements that differ only in their literals normalize to the same text:
//!
//! ```rust
//! use sqlfold_core::{parameterize, ParamValue, ParameterizeOptions};
//!
//! let result = parameterize(
//!     "SELECT id FROM users WHERE name = 'alice' AND age BETWEEN 18 AND 30",
//!     "mysql",
//!     ParameterizeOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(result.sql, "SELECT id FROM users WHERE name = ? AND age BETWEEN ? AND ?");
//! assert_eq!(
//!     result.parameters,
//!     vec![ParamValue::from("alice"), ParamValue::Int(18), ParamValue::Int(30)]
//! );
//! ```
//!
//! ## Working With the Tree
//!
//! ```rust
//! use sqlfold_core::ast::{BinaryOp, SqlTree};
//! use sqlfold_core::export::export_binary;
//!
//! let mut tree = SqlTree::new();
//! let column = tree.column("status");
//! let value = tree.string("open");
//! let cmp = tree.binary(column, BinaryOp::Eq, value).unwrap();
//!
//! let mut parameters = Vec::new();
//! export_binary(&mut tree, &mut parameters, cmp);
//! assert_eq!(tree.expr(cmp).to_string(), "status = ?");
//! ```

pub mod ast;
pub mod dialect;
pub mod error;
pub mod export;
pub mod fingerprint;
pub mod lexer;
pub mod parameterize;
pub mod parser;
pub mod visitor;

pub use ast::{ExprRef, Node, NodeId, SqlTree};
pub use dialect::{DbType, Dialect};
pub use error::Error;
pub use export::{create_export_parameter_visitor, ExportParameterVisitor, ExportVisitorKind, ParamValue};
pub use fingerprint::hash64;
pub use lexer::{Lexer, Token, TokenKind};
pub use parameterize::{parameterize, ParameterizeOptions, Parameterized};
pub use parser::{ParseError, Parser};
pub use visitor::{OutputVisitor, Visitor, VisitorMut};
