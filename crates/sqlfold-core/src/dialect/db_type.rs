//! Database-type tags.

use core::fmt;

/// A declared database type.
///
/// Tags are matched exactly, including case; anything unrecognized is kept as
/// [`DbType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DbType {
    MySql,
    MariaDb,
    H2,
    Oracle,
    AliOracle,
    Db2,
    PostgreSql,
    Edb,
    SqlServer,
    Jtds,
    Other(String),
}

impl DbType {
    /// Parses a tag such as `mysql` or `AliOracle`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "mysql" => Self::MySql,
            "mariadb" => Self::MariaDb,
            "h2" => Self::H2,
            "oracle" => Self::Oracle,
            "AliOracle" => Self::AliOracle,
            "db2" => Self::Db2,
            "postgresql" => Self::PostgreSql,
            "edb" => Self::Edb,
            "sqlserver" => Self::SqlServer,
            "jtds" => Self::Jtds,
            other => Self::Other(String::from(other)),
        }
    }

    /// Returns the tag this type was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::H2 => "h2",
            Self::Oracle => "oracle",
            Self::AliOracle => "AliOracle",
            Self::Db2 => "db2",
            Self::PostgreSql => "postgresql",
            Self::Edb => "edb",
            Self::SqlServer => "sqlserver",
            Self::Jtds => "jtds",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
