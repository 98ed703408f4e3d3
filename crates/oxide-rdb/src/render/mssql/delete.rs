//! SQL Server DELETE with `TOP (?)` row limits.

use crate::error::Result;
use crate::fragment::SqlFragment;
use crate::render::generic::delete_filter;
use crate::render::{OperationKind, RenderRequest, RenderedSql, SqlRender};

/// Renders `DELETE [TOP (?)] FROM <table>[ WHERE <term>]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MssqlDeleteRenderer;

impl SqlRender for MssqlDeleteRenderer {
    fn kind(&self) -> OperationKind {
        OperationKind::Delete
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedSql> {
        let RenderRequest::Delete { table, request: delete } = *request else {
            return Err(request.mismatch(OperationKind::Delete));
        };
        let mut sql = SqlFragment::raw("DELETE ");
        if let Some(limit) = delete.row_limit() {
            sql.push_sql("TOP (").push_value(limit).push_sql(") ");
        }
        sql.push_sql("FROM ").push_sql(&table.full_name());
        delete_filter(&mut sql, table, delete)?;
        Ok(RenderedSql::single(sql))
    }
}
