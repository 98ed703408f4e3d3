//! SQL dialect support.
//!
//! A dialect answers "how does this database product spell it": identifier
//! quoting, type literals synthesized from column attributes, and qualified
//! names. Dialects are stateless and shared behind `Arc`.

mod generic;
mod mssql;
mod mysql;
mod postgres;

use std::fmt;
use std::sync::Arc;

pub use generic::GenericDialect;
pub use mssql::MssqlDialect;
pub use mysql::MysqlDialect;
pub use postgres::PostgresDialect;

use crate::error::{RenderError, Result};
use crate::metadata::{ColumnMetadata, SqlType};

/// Names of the built-in dialects.
pub const DIALECT_NAMES: &[&str] = &["generic", "mssql", "mysql", "postgresql"];

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync + fmt::Debug {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the opening and closing identifier quote characters.
    fn quote_chars(&self) -> (char, char) {
        ('"', '"')
    }

    /// Quotes an identifier, doubling any embedded closing quote.
    ///
    /// Not idempotent: quoting an already quoted name quotes it again.
    fn quote(&self, identifier: &str) -> String {
        let (open, close) = self.quote_chars();
        let escaped = identifier.replace(close, &format!("{close}{close}"));
        format!("{open}{escaped}{close}")
    }

    /// Returns the type literal for an engine type and its size attributes.
    ///
    /// Zero length, precision or scale omits the corresponding clause.
    fn type_literal(&self, sql_type: SqlType, length: u32, precision: u32, scale: u32) -> String;

    /// Synthesizes the data type of a column from its attributes.
    fn build_data_type(&self, column: &ColumnMetadata) -> Result<String> {
        let sql_type = column
            .sql_type()
            .ok_or_else(|| RenderError::AmbiguousDataType {
                dialect: self.name().to_string(),
                column: column.name().to_string(),
            })?;
        Ok(self.type_literal(
            sql_type,
            column.length(),
            column.precision(),
            column.scale(),
        ))
    }

    /// Builds the qualified column reference used in generated SQL.
    ///
    /// The owner part is emitted as given, so it may be a table name or an alias.
    fn build_column_full_name(&self, owner: &str, column: &str) -> String {
        if column.contains('.') {
            return column.to_string();
        }
        if owner.is_empty() {
            return self.quote(column);
        }
        format!("{owner}.{}", self.quote(column))
    }

    /// Builds the (optionally schema-qualified) quoted table name.
    fn build_table_full_name(&self, schema: Option<&str>, table: &str) -> String {
        match schema {
            Some(schema) if !schema.is_empty() => {
                format!("{}.{}", self.quote(schema), self.quote(table))
            }
            _ => self.quote(table),
        }
    }

    /// Renders a string literal, escaping single quotes by doubling them.
    fn string_literal(&self, text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }
}

/// Resolves a built-in dialect by name.
pub fn by_name(name: &str) -> Result<Arc<dyn Dialect>> {
    match name.to_ascii_lowercase().as_str() {
        "generic" | "ansi" => Ok(Arc::new(GenericDialect::new())),
        "mssql" | "sqlserver" => Ok(Arc::new(MssqlDialect::new())),
        "mysql" => Ok(Arc::new(MysqlDialect::new())),
        "postgresql" | "postgres" => Ok(Arc::new(PostgresDialect::new())),
        _ => Err(RenderError::UnknownDialect(name.to_string())),
    }
}

/// Appends `(length)` when a length is set.
pub(crate) fn sized(name: &str, length: u32) -> String {
    if length == 0 {
        name.to_string()
    } else {
        format!("{name}({length})")
    }
}

/// Appends `(precision[,scale])` when a precision is set.
pub(crate) fn exact(name: &str, precision: u32, scale: u32) -> String {
    match (precision, scale) {
        (0, _) => name.to_string(),
        (p, 0) => format!("{name}({p})"),
        (p, s) => format!("{name}({p},{s})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_resolves_aliases() {
        assert_eq!(by_name("MSSQL").unwrap().name(), "mssql");
        assert_eq!(by_name("postgres").unwrap().name(), "postgresql");
        assert!(matches!(
            by_name("oracle"),
            Err(RenderError::UnknownDialect(name)) if name == "oracle"
        ));
    }

    #[test]
    fn test_size_helpers_omit_unset_clauses() {
        assert_eq!(sized("varchar", 0), "varchar");
        assert_eq!(sized("varchar", 32), "varchar(32)");
        assert_eq!(exact("numeric", 0, 2), "numeric");
        assert_eq!(exact("numeric", 10, 0), "numeric(10)");
        assert_eq!(exact("numeric", 10, 2), "numeric(10,2)");
    }

    #[test]
    fn test_missing_type_is_an_error() {
        let column = ColumnMetadata::new("mystery");
        let err = GenericDialect::new().build_data_type(&column).unwrap_err();
        assert!(matches!(err, RenderError::AmbiguousDataType { column, .. } if column == "mystery"));
    }

    #[test]
    fn test_every_listed_dialect_resolves() {
        for name in DIALECT_NAMES {
            assert_eq!(by_name(name).unwrap().name(), *name);
        }
    }
}
