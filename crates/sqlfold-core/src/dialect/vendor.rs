//! Vendor dialects.

use super::{Dialect, LimitStyle};

/// MySQL and its compatibles (MariaDB, H2 in MySQL mode).
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn hex_literal(&self, digits: &str) -> String {
        format!("0x{digits}")
    }
}

/// Oracle.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleDialect;

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::FetchFirst
    }
}

/// IBM DB2.
#[derive(Debug, Default, Clone, Copy)]
pub struct Db2Dialect;

impl Dialect for Db2Dialect {
    fn name(&self) -> &'static str {
        "db2"
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::FetchFirst
    }
}

/// PostgreSQL and EnterpriseDB.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgreSqlDialect;

impl Dialect for PostgreSqlDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }
}

/// Microsoft SQL Server (native and jTDS drivers).
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServerDialect;

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::OffsetFetch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_hex_and_quote() {
        assert_eq!(MySqlDialect.hex_literal("FF"), "0xFF");
        assert_eq!(MySqlDialect.quote_identifier("order"), "`order`");
        assert_eq!(MySqlDialect.boolean_literal(false), "FALSE");
    }

    #[test]
    fn test_numeric_booleans() {
        assert_eq!(OracleDialect.boolean_literal(true), "1");
        assert_eq!(Db2Dialect.boolean_literal(false), "0");
        assert_eq!(SqlServerDialect.boolean_literal(true), "1");
        assert_eq!(PostgreSqlDialect.boolean_literal(true), "TRUE");
    }

    #[test]
    fn test_limit_styles() {
        assert_eq!(OracleDialect.limit_style(), LimitStyle::FetchFirst);
        assert_eq!(SqlServerDialect.limit_style(), LimitStyle::OffsetFetch);
        assert_eq!(PostgreSqlDialect.limit_style(), LimitStyle::Limit);
        assert_eq!(PostgreSqlDialect.hex_literal("01"), "X'01'");
    }
}
