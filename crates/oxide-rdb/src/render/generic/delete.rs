//! DELETE rendering.

use crate::dml::DeleteRequest;
use crate::error::{RenderError, Result};
use crate::fragment::SqlFragment;
use crate::metadata::TableRef;
use crate::render::{OperationKind, RenderRequest, RenderedSql, SqlRender};

/// Appends the ` WHERE <term>` clause of a delete, if any.
pub(crate) fn delete_filter(
    sql: &mut SqlFragment,
    table: TableRef<'_>,
    request: &DeleteRequest,
) -> Result<()> {
    if let Some(term) = request.where_clause() {
        sql.push_sql(" WHERE ");
        sql.append(term.render(table)?);
    }
    Ok(())
}

/// Renders `DELETE FROM <table>[ WHERE <term>]`. Row limits are unsupported.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeleteRenderer;

impl SqlRender for DeleteRenderer {
    fn kind(&self) -> OperationKind {
        OperationKind::Delete
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedSql> {
        let RenderRequest::Delete { table, request: delete } = *request else {
            return Err(request.mismatch(OperationKind::Delete));
        };
        if delete.row_limit().is_some() {
            return Err(RenderError::Unsupported {
                dialect: table.dialect().name().to_string(),
                feature: "DELETE row limit".to_string(),
            });
        }
        let mut sql = SqlFragment::raw(format!("DELETE FROM {}", table.full_name()));
        delete_filter(&mut sql, table, delete)?;
        Ok(RenderedSql::single(sql))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dml::term;
    use crate::metadata::{ColumnMetadata, DatabaseMetadata, SqlType, TableMetadata};

    fn database() -> DatabaseMetadata {
        let mut db = DatabaseMetadata::for_dialect("app", "generic").unwrap();
        let mut users = TableMetadata::new("users", db.dialect().clone());
        users
            .add_column(ColumnMetadata::new("id").with_sql_type(SqlType::Integer))
            .unwrap();
        db.add_table(users).unwrap();
        db
    }

    #[test]
    fn test_delete_with_in_list() {
        let db = database();
        let users = db.require_table("users").unwrap();
        let request = DeleteRequest::new().filter(term("id").in_list(vec![1, 2, 3]));
        let rendered = DeleteRenderer
            .render(&RenderRequest::delete(users, &request))
            .unwrap();
        assert_eq!(
            rendered.sql(),
            vec!["DELETE FROM \"users\" WHERE users.\"id\" IN (?, ?, ?)"]
        );
        assert_eq!(rendered.statements()[0].params.len(), 3);
    }

    #[test]
    fn test_row_limit_unsupported() {
        let db = database();
        let users = db.require_table("users").unwrap();
        let request = DeleteRequest::new().limit(10);
        let err = DeleteRenderer
            .render(&RenderRequest::delete(users, &request))
            .unwrap_err();
        assert!(matches!(err, RenderError::Unsupported { feature, .. } if feature == "DELETE row limit"));
    }
}
