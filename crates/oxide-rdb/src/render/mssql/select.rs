//! SQL Server SELECT with OFFSET/FETCH paging.

use crate::error::Result;
use crate::fragment::SqlFragment;
use crate::render::generic::{select_body, select_orders};
use crate::render::{OperationKind, RenderRequest, RenderedSql, SqlRender};

/// Pages with `OFFSET ? ROWS FETCH NEXT ? ROWS ONLY`.
///
/// OFFSET requires an ORDER BY; without one the primary key is used, or
/// `(SELECT NULL)` for tables without a primary key.
#[derive(Debug, Default, Clone, Copy)]
pub struct MssqlSelectRenderer;

impl SqlRender for MssqlSelectRenderer {
    fn kind(&self) -> OperationKind {
        OperationKind::Select
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedSql> {
        let RenderRequest::Select { table, request: select } = *request else {
            return Err(request.mismatch(OperationKind::Select));
        };
        let mut sql = select_body(table, select)?;
        let orders = select_orders(table, select.orders())?;

        let Some(page) = select.page() else {
            if let Some(orders) = orders {
                sql.push_sql(" ORDER BY ");
                sql.append(orders);
            }
            return Ok(RenderedSql::single(sql));
        };

        let orders = orders.unwrap_or_else(|| {
            let keys: Vec<SqlFragment> = table
                .primary_keys()
                .iter()
                .map(|key| SqlFragment::raw(key.full_name(None)))
                .collect();
            if keys.is_empty() {
                SqlFragment::raw("(SELECT NULL)")
            } else {
                SqlFragment::join(keys, ", ")
            }
        });
        sql.push_sql(" ORDER BY ");
        sql.append(orders);
        sql.push_sql(" OFFSET ");
        sql.push_value(page.offset);
        sql.push_sql(" ROWS FETCH NEXT ");
        sql.push_value(page.limit);
        sql.push_sql(" ROWS ONLY");
        Ok(RenderedSql::single(sql))
    }
}
