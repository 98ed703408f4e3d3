//! INSERT rendering.

use crate::error::{RenderError, Result};
use crate::fragment::SqlFragment;
use crate::render::{OperationKind, RenderRequest, RenderedSql, SqlRender};

/// Renders a multi-row `INSERT INTO <table> (<columns>) VALUES (...), (...)`.
///
/// Column functions wrap each bound value: `LOWER(?)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InsertRenderer;

impl SqlRender for InsertRenderer {
    fn kind(&self) -> OperationKind {
        OperationKind::Insert
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedSql> {
        let RenderRequest::Insert { table, request: insert } = *request else {
            return Err(request.mismatch(OperationKind::Insert));
        };
        let columns = insert.insert_columns();
        if columns.is_empty() {
            return Err(RenderError::InvalidRequest("INSERT without columns".to_string()));
        }
        if insert.rows().is_empty() {
            return Err(RenderError::InvalidRequest("INSERT without rows".to_string()));
        }

        let bound = columns
            .iter()
            .map(|column| table.require_column(&column.column))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::with_capacity(insert.rows().len());
        for (i, row) in insert.rows().iter().enumerate() {
            if row.len() != columns.len() {
                return Err(RenderError::InvalidRequest(format!(
                    "row {i} has {} values for {} columns",
                    row.len(),
                    columns.len()
                )));
            }
            let values = columns
                .iter()
                .zip(&bound)
                .zip(row)
                .map(|((column, target), value)| {
                    column.apply_function(target, SqlFragment::value(value.clone()))
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(SqlFragment::join(values, ", ").paren());
        }

        let names: Vec<String> = bound.iter().map(|c| c.quote_name()).collect();
        let mut sql = SqlFragment::raw(format!(
            "INSERT INTO {} ({}) VALUES ",
            table.full_name(),
            names.join(", ")
        ));
        sql.append(SqlFragment::join(rows, ", "));
        Ok(RenderedSql::single(sql))
    }
}
