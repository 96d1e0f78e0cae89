//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing. The
//! parser builds its result directly into a [`SqlTree`](crate::ast::SqlTree).

mod error;
mod parser;
mod pratt;

pub use error::ParseError;
pub use parser::Parser;
pub use pratt::{infix_left_bp, NOT_BP, PREDICATE_BP, PREFIX_BP};
