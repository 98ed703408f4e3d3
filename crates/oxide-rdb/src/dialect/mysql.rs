//! MySQL dialect.

use super::{exact, sized, Dialect};
use crate::metadata::SqlType;

/// MySQL dialect: backtick quoting.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_chars(&self) -> (char, char) {
        ('`', '`')
    }

    fn type_literal(&self, sql_type: SqlType, length: u32, precision: u32, scale: u32) -> String {
        match sql_type {
            SqlType::TinyInt => "tinyint".to_string(),
            SqlType::SmallInt => "smallint".to_string(),
            SqlType::Integer => "int".to_string(),
            SqlType::BigInt => "bigint".to_string(),
            SqlType::Float => "float".to_string(),
            SqlType::Double => "double".to_string(),
            SqlType::Numeric | SqlType::Decimal => exact("decimal", precision, scale),
            SqlType::Char | SqlType::NChar => sized("char", length),
            SqlType::Varchar | SqlType::NVarchar => sized("varchar", length),
            SqlType::Clob => "longtext".to_string(),
            SqlType::Blob => "longblob".to_string(),
            SqlType::VarBinary => sized("varbinary", length),
            SqlType::Boolean => "tinyint(1)".to_string(),
            SqlType::Date => "date".to_string(),
            SqlType::Time => "time".to_string(),
            SqlType::Timestamp => "datetime".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_quoting() {
        let dialect = MysqlDialect::new();
        assert_eq!(dialect.quote("select"), "`select`");
        assert_eq!(dialect.build_column_full_name("t", "name"), "t.`name`");
    }

    #[test]
    fn test_type_literals() {
        let dialect = MysqlDialect::new();
        assert_eq!(dialect.type_literal(SqlType::Numeric, 0, 10, 2), "decimal(10,2)");
        assert_eq!(dialect.type_literal(SqlType::Boolean, 0, 0, 0), "tinyint(1)");
        assert_eq!(dialect.type_literal(SqlType::Clob, 0, 0, 0), "longtext");
    }
}
