//! CREATE TABLE rendering.

use crate::error::{RenderError, Result};
use crate::metadata::{ColumnRef, ObjectKind};
use crate::render::{DdlSyntax, OperationKind, RenderRequest, RenderedSql, SqlRender, SqlStatement};

/// Renders CREATE TABLE with columns in sort order and a table-level primary
/// key, followed by comment statements unless the syntax inlines them.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateTableRenderer<S> {
    syntax: S,
}

impl<S: DdlSyntax> CreateTableRenderer<S> {
    /// Creates a renderer using `syntax` for column definitions and comments.
    #[must_use]
    pub const fn new(syntax: S) -> Self {
        Self { syntax }
    }
}

impl<S: DdlSyntax> SqlRender for CreateTableRenderer<S> {
    fn kind(&self) -> OperationKind {
        OperationKind::CreateTable
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedSql> {
        let RenderRequest::CreateTable { table } = *request else {
            return Err(request.mismatch(OperationKind::CreateTable));
        };
        if table.metadata().kind() == ObjectKind::View {
            return Err(RenderError::Unsupported {
                dialect: table.dialect().name().to_string(),
                feature: "CREATE TABLE for a view".to_string(),
            });
        }

        let columns = table.sorted_columns();
        if columns.is_empty() {
            return Err(RenderError::InvalidRequest(format!(
                "table '{}' has no columns",
                table.name()
            )));
        }

        let mut lines = columns
            .iter()
            .map(|column| self.syntax.column_definition(column))
            .collect::<Result<Vec<_>>>()?;
        let primary_keys = table.primary_keys();
        if !primary_keys.is_empty() {
            let names: Vec<String> = primary_keys.iter().map(ColumnRef::quote_name).collect();
            lines.push(format!("PRIMARY KEY ({})", names.join(", ")));
        }

        let sql = format!(
            "CREATE TABLE {} (\n    {}\n){}",
            table.full_name(),
            lines.join(",\n    "),
            self.syntax.table_options(table)
        );
        let mut rendered = RenderedSql::single(SqlStatement::text(sql));

        if !self.syntax.inline_comments() {
            if let Some(sql) = self.syntax.comment_table(table, None)? {
                rendered.push(SqlStatement::text(sql));
            }
            for column in &columns {
                if let Some(sql) = self.syntax.comment_column(table, None, column)? {
                    rendered.push(SqlStatement::text(sql));
                }
            }
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{ColumnMetadata, DatabaseMetadata, SqlType, TableMetadata};
    use crate::render::GenericDdl;

    fn database() -> DatabaseMetadata {
        let mut db = DatabaseMetadata::for_dialect("app", "generic").unwrap();
        let mut users = TableMetadata::new("users", db.dialect().clone())
            .with_comment("Registered users");
        users
            .add_column(
                ColumnMetadata::new("name")
                    .with_sql_type(SqlType::Varchar)
                    .with_length(32)
                    .with_sort_index(1)
                    .with_comment("Login name"),
            )
            .unwrap();
        users
            .add_column(
                ColumnMetadata::new("id")
                    .with_sql_type(SqlType::Integer)
                    .primary_key(),
            )
            .unwrap();
        db.add_table(users).unwrap();
        db
    }

    #[test]
    fn test_columns_in_sort_order_with_primary_key() {
        let db = database();
        let users = db.require_table("users").unwrap();
        let rendered = CreateTableRenderer::new(GenericDdl)
            .render(&RenderRequest::create_table(users))
            .unwrap();
        assert_eq!(
            rendered.sql(),
            vec![
                "CREATE TABLE \"users\" (\n    \"id\" integer NOT NULL,\n    \"name\" varchar(32),\n    PRIMARY KEY (\"id\")\n)",
                "COMMENT ON TABLE \"users\" IS 'Registered users'",
                "COMMENT ON COLUMN \"users\".\"name\" IS 'Login name'",
            ]
        );
    }

    #[test]
    fn test_view_is_unsupported() {
        let mut db = DatabaseMetadata::for_dialect("app", "generic").unwrap();
        let mut view = TableMetadata::view("active_users", db.dialect().clone());
        view.add_column(ColumnMetadata::new("id").with_sql_type(SqlType::Integer))
            .unwrap();
        db.add_table(view).unwrap();
        let err = CreateTableRenderer::new(GenericDdl)
            .render(&RenderRequest::create_table(db.require_table("active_users").unwrap()))
            .unwrap_err();
        assert!(matches!(err, RenderError::Unsupported { .. }));
    }

    #[test]
    fn test_wrong_request_kind() {
        let db = database();
        let users = db.require_table("users").unwrap();
        let err = CreateTableRenderer::new(GenericDdl)
            .render(&RenderRequest::alter_table(users, users))
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::RequestMismatch {
                expected: OperationKind::CreateTable,
                actual: OperationKind::AlterTable
            }
        ));
    }
}
