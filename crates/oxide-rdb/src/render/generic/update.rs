//! UPDATE rendering.

use std::collections::BTreeSet;

use crate::error::{RenderError, Result};
use crate::fragment::SqlFragment;
use crate::render::{OperationKind, RenderRequest, RenderedSql, SqlRender};

/// Renders `UPDATE <table> SET <column> = ?, ...[ WHERE <term>]`.
///
/// Assignment targets are unqualified; the WHERE clause uses full names.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpdateRenderer;

impl SqlRender for UpdateRenderer {
    fn kind(&self) -> OperationKind {
        OperationKind::Update
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedSql> {
        let RenderRequest::Update { table, request: update } = *request else {
            return Err(request.mismatch(OperationKind::Update));
        };
        if update.assignments().is_empty() {
            return Err(RenderError::InvalidRequest("UPDATE without assignments".to_string()));
        }

        let mut targets = BTreeSet::new();
        let mut assignments = Vec::with_capacity(update.assignments().len());
        for assignment in update.assignments() {
            let column = table.require_column(&assignment.column)?;
            if !column.is_updatable() {
                return Err(RenderError::NotUpdatable {
                    table: table.name().to_string(),
                    column: column.name().to_string(),
                });
            }
            if !targets.insert(column.name()) {
                return Err(RenderError::InvalidRequest(format!(
                    "column '{}' assigned twice",
                    column.name()
                )));
            }
            let mut sql = SqlFragment::raw(format!("{} = ", column.quote_name()));
            sql.append(
                assignment.apply_function(&column, SqlFragment::value(assignment.value().clone()))?,
            );
            assignments.push(sql);
        }

        let mut sql = SqlFragment::raw(format!("UPDATE {} SET ", table.full_name()));
        sql.append(SqlFragment::join(assignments, ", "));
        if let Some(term) = update.where_clause() {
            sql.push_sql(" WHERE ");
            sql.append(term.render(table)?);
        }
        Ok(RenderedSql::single(sql))
    }
}
