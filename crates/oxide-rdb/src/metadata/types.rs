//! Engine-level type tags and column defaults.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Engine-level SQL type tag of a column.
///
/// The tag is product-neutral: each dialect turns it, together with the
/// column's length, precision and scale, into its own type literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlType {
    /// 8-bit integer.
    TinyInt,
    /// 16-bit integer.
    SmallInt,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    BigInt,
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Exact numeric with precision and scale.
    Numeric,
    /// Exact decimal with precision and scale.
    Decimal,
    /// Fixed-length character string.
    Char,
    /// Variable-length character string.
    Varchar,
    /// Fixed-length national character string.
    NChar,
    /// Variable-length national character string.
    NVarchar,
    /// Character large object.
    Clob,
    /// Binary large object.
    Blob,
    /// Variable-length binary.
    VarBinary,
    /// Boolean.
    Boolean,
    /// Date only.
    Date,
    /// Time only.
    Time,
    /// Date and time.
    Timestamp,
}

impl SqlType {
    /// Returns true for character types, whose length is the character count.
    #[must_use]
    pub const fn is_character(self) -> bool {
        matches!(
            self,
            Self::Char | Self::Varchar | Self::NChar | Self::NVarchar | Self::Clob
        )
    }

    /// Returns true for exact numeric types that carry precision and scale.
    #[must_use]
    pub const fn is_exact_numeric(self) -> bool {
        matches!(self, Self::Numeric | Self::Decimal)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Numeric => "NUMERIC",
            Self::Decimal => "DECIMAL",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::NChar => "NCHAR",
            Self::NVarchar => "NVARCHAR",
            Self::Clob => "CLOB",
            Self::Blob => "BLOB",
            Self::VarBinary => "VARBINARY",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
        };
        f.write_str(name)
    }
}

/// Default value of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default, rendered as an escaped literal.
    String(String),
    /// SQL expression rendered verbatim (e.g., `CURRENT_TIMESTAMP`).
    Expression(String),
}

/// Whether a column owner is a table or a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// A base table.
    #[default]
    Table,
    /// A view.
    View,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => f.write_str("table"),
            Self::View => f.write_str("view"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_families() {
        assert!(SqlType::Varchar.is_character());
        assert!(!SqlType::Integer.is_character());
        assert!(SqlType::Decimal.is_exact_numeric());
        assert!(!SqlType::Double.is_exact_numeric());
    }

    #[test]
    fn test_serde_names() {
        let ty: SqlType = serde_json::from_str("\"nvarchar\"").unwrap();
        assert_eq!(ty, SqlType::NVarchar);
        let default: DefaultValue =
            serde_json::from_str(r#"{"kind":"expression","value":"CURRENT_TIMESTAMP"}"#).unwrap();
        assert_eq!(
            default,
            DefaultValue::Expression("CURRENT_TIMESTAMP".to_string())
        );
    }
}
