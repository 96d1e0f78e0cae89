//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for SQL that produces a stream of tokens.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;

/// Returns true if `name` can be written as a bare identifier: it lexes as a
/// single identifier token and is not a keyword.
#[must_use]
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && Keyword::from_str(name).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_plain_identifier() {
        assert!(is_plain_identifier("users"));
        assert!(is_plain_identifier("_tmp$1"));
        assert!(!is_plain_identifier("order"));
        assert!(!is_plain_identifier("1abc"));
        assert!(!is_plain_identifier("my col"));
        assert!(!is_plain_identifier(""));
    }
}
