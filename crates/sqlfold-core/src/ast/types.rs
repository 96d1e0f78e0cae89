//! SQL data type definitions.

use core::fmt;

/// SQL data types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    // Integer types
    /// Small integer (2 bytes).
    Smallint,
    /// Integer (4 bytes).
    Integer,
    /// Big integer (8 bytes).
    Bigint,

    // Floating point
    /// Double precision (8-byte float).
    Double,
    /// Decimal with precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },

    // String types
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Text (variable length, no limit).
    Text,

    // Binary types
    /// Binary large object.
    Blob,

    // Date/time types
    /// Date.
    Date,
    /// Timestamp.
    Timestamp,

    // Boolean
    /// Boolean.
    Boolean,

    // Custom type (for database-specific types).
    Custom(String),
}

impl DataType {
    /// Looks up a type by its SQL name (case-insensitive).
    ///
    /// Unknown names become [`DataType::Custom`]; length, precision and scale
    /// are supplied by the caller.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "SMALLINT" => Self::Smallint,
            "INT" | "INTEGER" => Self::Integer,
            "BIGINT" => Self::Bigint,
            "DOUBLE" | "FLOAT" | "REAL" => Self::Double,
            "DECIMAL" | "NUMERIC" | "NUMBER" => Self::Decimal {
                precision: None,
                scale: None,
            },
            "CHAR" => Self::Char(None),
            "VARCHAR" | "VARCHAR2" => Self::Varchar(None),
            "TEXT" | "CLOB" => Self::Text,
            "BLOB" | "BINARY" | "VARBINARY" => Self::Blob,
            "DATE" => Self::Date,
            "TIMESTAMP" | "DATETIME" => Self::Timestamp,
            "BOOLEAN" | "BOOL" => Self::Boolean,
            _ => Self::Custom(String::from(name)),
        }
    }

    /// Returns true for the integer family.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Smallint | Self::Integer | Self::Bigint)
    }

    /// Returns true for the character family.
    #[must_use]
    pub const fn is_character(&self) -> bool {
        matches!(self, Self::Char(_) | Self::Varchar(_) | Self::Text)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Smallint => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::Bigint => "BIGINT",
            Self::Double => "DOUBLE",
            Self::Decimal { precision, scale } => {
                f.write_str("DECIMAL")?;
                return match (precision, scale) {
                    (Some(p), Some(s)) => write!(f, "({p}, {s})"),
                    (Some(p), None) => write!(f, "({p})"),
                    _ => Ok(()),
                };
            }
            Self::Char(len) | Self::Varchar(len) => {
                f.write_str(if matches!(self, Self::Char(_)) { "CHAR" } else { "VARCHAR" })?;
                return len.map_or(Ok(()), |n| write!(f, "({n})"));
            }
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::Date => "DATE",
            Self::Timestamp => "TIMESTAMP",
            Self::Boolean => "BOOLEAN",
            Self::Custom(name) => name.as_str(),
        };
        f.write_str(name)
    }
}
