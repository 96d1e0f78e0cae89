//! Token types for the SQL lexer.

use rust_decimal::Decimal;

use super::Span;

macro_rules! keywords {
    ($($variant:ident = $text:literal,)*) => {
        /// Reserved words the parser matches on.
        ///
        /// Function names, aggregate names among them, are plain identifiers.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            const ALL: &'static [(&'static str, Self)] = &[$(($text, Self::$variant),)*];

            /// Looks up a keyword, ignoring ASCII case.
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .find(|(text, _)| text.eq_ignore_ascii_case(s))
                    .map(|&(_, keyword)| keyword)
            }

            /// The upper-case spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    // Query clauses
    Select = "SELECT",
    From = "FROM",
    Where = "WHERE",
    Group = "GROUP",
    Having = "HAVING",
    Order = "ORDER",
    By = "BY",
    Limit = "LIMIT",
    Distinct = "DISTINCT",
    All = "ALL",
    As = "AS",
    // Predicates and constants
    And = "AND",
    Or = "OR",
    Not = "NOT",
    Is = "IS",
    In = "IN",
    Like = "LIKE",
    Between = "BETWEEN",
    Null = "NULL",
    True = "TRUE",
    False = "FALSE",
    Cast = "CAST",
    // Sort order
    Asc = "ASC",
    Desc = "DESC",
    First = "FIRST",
    Last = "LAST",
    // Aggregate and window clauses
    Over = "OVER",
    Partition = "PARTITION",
    Keep = "KEEP",
    Within = "WITHIN",
    Ignore = "IGNORE",
    Nulls = "NULLS",
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Exact decimal literal (e.g., 3.14, 1e3, or an integer too large for i64)
    Decimal(Decimal),
    /// String literal (e.g., 'hello')
    String(String),
    /// Hex literal (e.g., X'1234' or 0x1234), upper-case digits
    Hex(String),

    // Identifiers and keywords
    /// Identifier (e.g., column_name)
    Identifier(String),
    /// Quoted identifier (e.g., "order" or `order`)
    QuotedIdentifier(String),
    /// SQL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ~
    BitNot,
    /// <<
    LeftShift,
    /// >>
    RightShift,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// ?
    Question,
    /// :name
    NamedParameter(String),

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("within"), Some(Keyword::Within));
        assert_eq!(Keyword::from_str("KeEp"), Some(Keyword::Keep));
        assert_eq!(Keyword::from_str("count"), None);
        assert_eq!(Keyword::from_str("not_a_keyword"), None);
    }

    #[test]
    fn test_keyword_as_str() {
        assert_eq!(Keyword::Select.as_str(), "SELECT");
        assert_eq!(Keyword::Partition.as_str(), "PARTITION");
        assert_eq!(Keyword::Nulls.as_str(), "NULLS");
    }

    #[test]
    fn test_token_is_eof() {
        let eof = Token::new(TokenKind::Eof, Span::new(0, 0));
        let select = Token::new(TokenKind::Keyword(Keyword::Select), Span::new(0, 6));
        assert!(eof.is_eof());
        assert!(!select.is_eof());
    }

    #[test]
    fn test_keyword_table_matches_spelling() {
        for &(text, keyword) in Keyword::ALL {
            assert_eq!(keyword.as_str(), text);
            assert_eq!(Keyword::from_str(&text.to_ascii_lowercase()), Some(keyword));
        }
    }
}
