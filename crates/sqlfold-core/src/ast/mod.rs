//! Abstract Syntax Tree (AST) types for SQL statements and expressions.

mod compare;
mod error;
mod infer;
mod node;
mod operator;
mod tree;
mod types;

pub use compare::ExprRef;
pub use error::AstError;
pub use node::{
    AggregateExpr, BetweenExpr, BinaryExpr, CastExpr, Column, FunctionCall, GroupByClause,
    InListExpr, IsNullExpr, KeepClause, Literal, Node, OrderByClause, OrderByItem, OverClause,
    ParenExpr, Placeholder, SelectColumn, SelectStatement, TableRef, UnaryExpr, Wildcard,
};
pub use operator::{AggregateOption, BinaryOp, KeepPosition, OrderDirection, UnaryOp};
pub use tree::{NodeId, SqlTree};
pub use types::DataType;
