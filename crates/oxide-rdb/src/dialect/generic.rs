//! Generic SQL dialect.

use super::{exact, sized, Dialect};
use crate::metadata::SqlType;

/// A generic SQL dialect using ANSI SQL standards.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn type_literal(&self, sql_type: SqlType, length: u32, precision: u32, scale: u32) -> String {
        match sql_type {
            SqlType::TinyInt => "tinyint".to_string(),
            SqlType::SmallInt => "smallint".to_string(),
            SqlType::Integer => "integer".to_string(),
            SqlType::BigInt => "bigint".to_string(),
            SqlType::Float => "float".to_string(),
            SqlType::Double => "double precision".to_string(),
            SqlType::Numeric => exact("numeric", precision, scale),
            SqlType::Decimal => exact("decimal", precision, scale),
            SqlType::Char => sized("char", length),
            SqlType::Varchar => sized("varchar", length),
            SqlType::NChar => sized("nchar", length),
            SqlType::NVarchar => sized("nvarchar", length),
            SqlType::Clob => "clob".to_string(),
            SqlType::Blob => "blob".to_string(),
            SqlType::VarBinary => sized("varbinary", length),
            SqlType::Boolean => "boolean".to_string(),
            SqlType::Date => "date".to_string(),
            SqlType::Time => "time".to_string(),
            SqlType::Timestamp => "timestamp".to_string(),
        }
    }
}
