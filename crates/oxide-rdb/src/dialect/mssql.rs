//! Microsoft SQL Server dialect.

use super::{exact, sized, Dialect};
use crate::metadata::SqlType;

/// SQL Server dialect: bracket quoting and national character types.
#[derive(Debug, Default, Clone, Copy)]
pub struct MssqlDialect;

impl MssqlDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MssqlDialect {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn quote_chars(&self) -> (char, char) {
        ('[', ']')
    }

    fn type_literal(&self, sql_type: SqlType, length: u32, precision: u32, scale: u32) -> String {
        match sql_type {
            SqlType::TinyInt => "tinyint".to_string(),
            SqlType::SmallInt => "smallint".to_string(),
            SqlType::Integer => "int".to_string(),
            SqlType::BigInt => "bigint".to_string(),
            SqlType::Float => "real".to_string(),
            SqlType::Double => "float".to_string(),
            SqlType::Numeric => exact("numeric", precision, scale),
            SqlType::Decimal => exact("decimal", precision, scale),
            SqlType::Char | SqlType::NChar => sized("nchar", length),
            SqlType::Varchar | SqlType::NVarchar => sized("nvarchar", length),
            SqlType::Clob => "nvarchar(max)".to_string(),
            SqlType::Blob => "varbinary(max)".to_string(),
            SqlType::VarBinary => sized("varbinary", length),
            SqlType::Boolean => "bit".to_string(),
            SqlType::Date => "date".to_string(),
            SqlType::Time => "time".to_string(),
            SqlType::Timestamp => "datetime2".to_string(),
        }
    }
}
