//! PostgreSQL dialect.

use super::{exact, sized, Dialect};
use crate::metadata::SqlType;

/// PostgreSQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn type_literal(&self, sql_type: SqlType, length: u32, precision: u32, scale: u32) -> String {
        match sql_type {
            // PostgreSQL has no 1-byte integer
            SqlType::TinyInt | SqlType::SmallInt => "smallint".to_string(),
            SqlType::Integer => "integer".to_string(),
            SqlType::BigInt => "bigint".to_string(),
            SqlType::Float => "real".to_string(),
            SqlType::Double => "double precision".to_string(),
            SqlType::Numeric | SqlType::Decimal => exact("numeric", precision, scale),
            SqlType::Char | SqlType::NChar => sized("char", length),
            SqlType::Varchar | SqlType::NVarchar => sized("varchar", length),
            SqlType::Clob => "text".to_string(),
            SqlType::Blob | SqlType::VarBinary => "bytea".to_string(),
            SqlType::Boolean => "boolean".to_string(),
            SqlType::Date => "date".to_string(),
            SqlType::Time => "time".to_string(),
            SqlType::Timestamp => "timestamp".to_string(),
        }
    }
}
