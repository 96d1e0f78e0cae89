//! Crate-level error type.

use core::fmt;

use crate::ast::AstError;
use crate::parser::ParseError;

/// Errors returned by the one-call entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The SQL text did not parse.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A tree operation broke the tree shape.
    #[error("tree error: {0}")]
    Tree(#[from] AstError),

    /// The rendering sink failed.
    #[error("render error")]
    Render(#[from] fmt::Error),
}
