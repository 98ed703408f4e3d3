//! Per-product DDL spelling.
//!
//! [`DdlSyntax`] generates the individual statements CREATE and ALTER
//! renderers assemble. Every method has an ANSI-flavored default; products
//! override only what they spell differently.

use std::fmt;

use crate::dialect::Dialect;
use crate::error::Result;
use crate::metadata::{ColumnRef, DefaultValue, TableRef};

/// Trait for product-specific DDL statement generation.
pub trait DdlSyntax: Send + Sync + fmt::Debug {
    /// Boolean literal used in DEFAULT clauses.
    fn bool_literal(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Renders a default value as SQL.
    fn default_literal(&self, dialect: &dyn Dialect, value: &DefaultValue) -> String {
        match value {
            DefaultValue::Null => "NULL".to_string(),
            DefaultValue::Bool(b) => self.bool_literal(*b).to_string(),
            DefaultValue::Integer(i) => i.to_string(),
            DefaultValue::Float(f) => f.to_string(),
            DefaultValue::String(s) => dialect.string_literal(s),
            DefaultValue::Expression(expr) => expr.clone(),
        }
    }

    /// Whether column comments are part of the column definition.
    ///
    /// When true, CREATE emits no separate column comment statements and
    /// ALTER folds comment changes into definition statements.
    fn inline_comments(&self) -> bool {
        false
    }

    /// Generates a column definition: quoted name followed by either the raw
    /// definition or the data type, nullability and default.
    fn column_definition(&self, column: &ColumnRef<'_>) -> Result<String> {
        let dialect = column.dialect();
        let mut parts = vec![column.quote_name()];

        if let Some(definition) = column.column_definition() {
            parts.push(definition.to_string());
        } else {
            parts.push(column.data_type()?);
            if column.is_not_null() {
                parts.push("NOT NULL".to_string());
            }
            if let Some(default) = column.default_value() {
                parts.push(format!("DEFAULT {}", self.default_literal(dialect, default)));
            }
        }

        if self.inline_comments() {
            if let Some(comment) = column.comment() {
                parts.push(format!("COMMENT {}", dialect.string_literal(comment)));
            }
        }

        Ok(parts.join(" "))
    }

    /// Trailing table options after the closing parenthesis of CREATE TABLE.
    fn table_options(&self, _table: TableRef<'_>) -> String {
        String::new()
    }

    /// Generates `ADD COLUMN`.
    fn add_column(&self, table: TableRef<'_>, column: &ColumnRef<'_>) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            table.full_name(),
            self.column_definition(column)?
        ))
    }

    /// Generates `DROP COLUMN`.
    fn drop_column(&self, table: TableRef<'_>, column: &ColumnRef<'_>) -> String {
        format!(
            "ALTER TABLE {} DROP COLUMN {}",
            table.full_name(),
            column.quote_name()
        )
    }

    /// Generates a column rename from `before`'s name to `after`'s.
    fn rename_column(
        &self,
        table: TableRef<'_>,
        before: &ColumnRef<'_>,
        after: &ColumnRef<'_>,
    ) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {}",
            table.full_name(),
            before.quote_name(),
            after.quote_name()
        ))
    }

    /// Generates a column type change.
    fn modify_column(
        &self,
        table: TableRef<'_>,
        _before: &ColumnRef<'_>,
        after: &ColumnRef<'_>,
    ) -> Result<String> {
        let data_type = match after.column_definition() {
            Some(definition) => definition.to_string(),
            None => after.data_type()?,
        };
        Ok(format!(
            "ALTER TABLE {} ALTER COLUMN {} TYPE {data_type}",
            table.full_name(),
            after.quote_name()
        ))
    }

    /// Generates the table comment statement when the comment differs from
    /// `previous`; `None` when there is nothing to change.
    fn comment_table(&self, table: TableRef<'_>, previous: Option<&str>) -> Result<Option<String>> {
        let comment = table.metadata().comment();
        if comment == previous {
            return Ok(None);
        }
        let dialect = table.dialect();
        let literal = comment.map_or_else(|| "NULL".to_string(), |c| dialect.string_literal(c));
        Ok(Some(format!("COMMENT ON TABLE {} IS {literal}", table.full_name())))
    }

    /// Generates the column comment statement when `column`'s comment differs
    /// from `before`'s.
    fn comment_column(
        &self,
        table: TableRef<'_>,
        before: Option<&ColumnRef<'_>>,
        column: &ColumnRef<'_>,
    ) -> Result<Option<String>> {
        let comment = column.comment();
        if comment == before.and_then(|b| b.comment()) {
            return Ok(None);
        }
        let dialect = table.dialect();
        let literal = comment.map_or_else(|| "NULL".to_string(), |c| dialect.string_literal(c));
        Ok(Some(format!(
            "COMMENT ON COLUMN {} IS {literal}",
            dialect.build_column_full_name(&table.full_name(), column.name())
        )))
    }
}

/// ANSI DDL, used by the generic and PostgreSQL registries.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDdl;

impl DdlSyntax for GenericDdl {}
