//! SQL Dialect support.
//!
//! Different databases spell some literals and clauses differently. This module
//! provides a trait for dialect-specific rendering, one implementation per
//! supported family, and the database-type tags that select them.

mod db_type;
mod generic;
mod vendor;

pub use db_type::DbType;
pub use generic::GenericDialect;
pub use vendor::{Db2Dialect, MySqlDialect, OracleDialect, PostgreSqlDialect, SqlServerDialect};

/// How a dialect restricts the number of returned rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStyle {
    /// `LIMIT n`
    Limit,
    /// `FETCH FIRST n ROWS ONLY`
    FetchFirst,
    /// `OFFSET 0 ROWS FETCH NEXT n ROWS ONLY`
    OffsetFetch,
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the string escape character.
    fn string_escape(&self) -> &'static str {
        "''"
    }

    /// Returns the parameter placeholder style.
    fn parameter_placeholder(&self) -> &'static str {
        "?"
    }

    /// Returns the spelling of a boolean literal.
    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Renders a hex string literal from its digits.
    fn hex_literal(&self, digits: &str) -> String {
        format!("X'{digits}'")
    }

    /// Returns the row-limit clause style.
    fn limit_style(&self) -> LimitStyle {
        LimitStyle::Limit
    }

    /// Quotes an identifier, doubling embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }
}
