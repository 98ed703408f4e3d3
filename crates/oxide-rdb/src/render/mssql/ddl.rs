//! SQL Server DDL.

use crate::error::Result;
use crate::metadata::{ColumnRef, DatabaseMetadata, TableRef};
use crate::render::DdlSyntax;

/// SQL Server spelling: `ADD` without `COLUMN`, `ALTER COLUMN <type>`,
/// `sp_rename`, and comments stored as `MS_Description` extended properties.
#[derive(Debug, Default, Clone, Copy)]
pub struct MssqlDdl;

impl MssqlDdl {
    /// The `sp_*extendedproperty` call moving a description from `previous`
    /// to `comment` on a table or one of its columns.
    fn description(
        table: TableRef<'_>,
        column: Option<&str>,
        previous: Option<&str>,
        comment: Option<&str>,
    ) -> Option<String> {
        let dialect = table.dialect();
        let literal = |text: &str| dialect.string_literal(text);
        let schema = table
            .database()
            .and_then(DatabaseMetadata::schema)
            .unwrap_or("dbo");

        let mut target = format!(
            "'SCHEMA', {}, 'TABLE', {}",
            literal(schema),
            literal(table.name())
        );
        if let Some(column) = column {
            target.push_str(&format!(", 'COLUMN', {}", literal(column)));
        }

        match (previous, comment) {
            (None, Some(text)) => Some(format!(
                "EXEC sp_addextendedproperty 'MS_Description', N{}, {target}",
                literal(text)
            )),
            (Some(old), Some(text)) if old != text => Some(format!(
                "EXEC sp_updateextendedproperty 'MS_Description', N{}, {target}",
                literal(text)
            )),
            (Some(_), None) => Some(format!(
                "EXEC sp_dropextendedproperty 'MS_Description', {target}"
            )),
            _ => None,
        }
    }
}

impl DdlSyntax for MssqlDdl {
    fn bool_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn add_column(&self, table: TableRef<'_>, column: &ColumnRef<'_>) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD {}",
            table.full_name(),
            self.column_definition(column)?
        ))
    }

    fn rename_column(
        &self,
        table: TableRef<'_>,
        before: &ColumnRef<'_>,
        after: &ColumnRef<'_>,
    ) -> Result<String> {
        let dialect = table.dialect();
        let path = match table.database().and_then(DatabaseMetadata::schema) {
            Some(schema) => format!("{schema}.{}.{}", table.name(), before.name()),
            None => format!("{}.{}", table.name(), before.name()),
        };
        Ok(format!(
            "EXEC sp_rename {}, {}, 'COLUMN'",
            dialect.string_literal(&path),
            dialect.string_literal(after.name())
        ))
    }

    fn modify_column(
        &self,
        table: TableRef<'_>,
        _before: &ColumnRef<'_>,
        after: &ColumnRef<'_>,
    ) -> Result<String> {
        let definition = match after.column_definition() {
            Some(definition) => definition.to_string(),
            None if after.is_not_null() => format!("{} NOT NULL", after.data_type()?),
            None => after.data_type()?,
        };
        Ok(format!(
            "ALTER TABLE {} ALTER COLUMN {} {definition}",
            table.full_name(),
            after.quote_name()
        ))
    }

    fn comment_table(&self, table: TableRef<'_>, previous: Option<&str>) -> Result<Option<String>> {
        Ok(Self::description(table, None, previous, table.metadata().comment()))
    }

    fn comment_column(
        &self,
        table: TableRef<'_>,
        before: Option<&ColumnRef<'_>>,
        column: &ColumnRef<'_>,
    ) -> Result<Option<String>> {
        Ok(Self::description(
            table,
            Some(column.name()),
            before.and_then(|b| b.comment()),
            column.comment(),
        ))
    }
}
