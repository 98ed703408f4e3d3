//! SELECT rendering.

use crate::dml::{SelectRequest, SortOrder};
use crate::error::Result;
use crate::fragment::SqlFragment;
use crate::metadata::TableRef;
use crate::render::{OperationKind, RenderRequest, RenderedSql, SqlRender};

/// Renders `SELECT <columns> FROM <table>[ WHERE <term>]`.
///
/// An empty column list selects every column in sort order.
pub(crate) fn select_body(table: TableRef<'_>, request: &SelectRequest) -> Result<SqlFragment> {
    let columns = if request.columns().is_empty() {
        table
            .sorted_columns()
            .iter()
            .map(|column| SqlFragment::raw(column.full_name(None)))
            .collect()
    } else {
        request
            .columns()
            .iter()
            .map(|column| {
                let mut fragment = column.render(table)?;
                if let Some(alias) = column.alias_name() {
                    fragment.push_sql(" AS ");
                    fragment.push_sql(&table.dialect().quote(alias));
                }
                Ok(fragment)
            })
            .collect::<Result<Vec<_>>>()?
    };

    let mut sql = SqlFragment::raw("SELECT ");
    sql.append(SqlFragment::join(columns, ", "));
    sql.push_sql(" FROM ");
    sql.push_sql(&table.full_name());
    if let Some(term) = request.where_clause() {
        sql.push_sql(" WHERE ");
        sql.append(term.render(table)?);
    }
    Ok(sql)
}

/// Renders the ORDER BY list, or `None` when the request has no ordering.
pub(crate) fn select_orders(
    table: TableRef<'_>,
    orders: &[SortOrder],
) -> Result<Option<SqlFragment>> {
    if orders.is_empty() {
        return Ok(None);
    }
    let parts = orders
        .iter()
        .map(|order| {
            let mut fragment = order.column.render(table)?;
            fragment.push_sql(if order.descending { " DESC" } else { " ASC" });
            Ok(fragment)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(SqlFragment::join(parts, ", ")))
}

/// Generic SELECT with `LIMIT ? OFFSET ?` paging.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectRenderer;

impl SqlRender for SelectRenderer {
    fn kind(&self) -> OperationKind {
        OperationKind::Select
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedSql> {
        let RenderRequest::Select { table, request: select } = *request else {
            return Err(request.mismatch(OperationKind::Select));
        };
        let mut sql = select_body(table, select)?;
        if let Some(orders) = select_orders(table, select.orders())? {
            sql.push_sql(" ORDER BY ");
            sql.append(orders);
        }
        if let Some(page) = select.page() {
            sql.push_sql(" LIMIT ");
            sql.push_value(page.limit);
            sql.push_sql(" OFFSET ");
            sql.push_value(page.offset);
        }
        Ok(RenderedSql::single(sql))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dml::{term, SelectColumn};
    use crate::error::RenderError;
    use crate::metadata::{ColumnMetadata, DatabaseMetadata, SqlType, TableMetadata};
    use crate::value::SqlValue;

    fn database() -> DatabaseMetadata {
        let mut db = DatabaseMetadata::for_dialect("app", "postgresql").unwrap();
        let mut users = TableMetadata::new("users", db.dialect().clone());
        users
            .add_column(
                ColumnMetadata::new("id")
                    .with_sql_type(SqlType::Integer)
                    .primary_key(),
            )
            .unwrap();
        users
            .add_column(
                ColumnMetadata::new("name")
                    .with_sql_type(SqlType::Varchar)
                    .with_sort_index(1),
            )
            .unwrap();
        db.add_table(users).unwrap();
        db
    }

    fn render(db: &DatabaseMetadata, request: &SelectRequest) -> Result<RenderedSql> {
        let users = db.require_table("users").unwrap();
        SelectRenderer.render(&RenderRequest::select(users, request))
    }

    #[test]
    fn test_select_all_columns() {
        let db = database();
        let rendered = render(&db, &SelectRequest::new()).unwrap();
        assert_eq!(
            rendered.sql(),
            vec!["SELECT users.\"id\", users.\"name\" FROM \"users\""]
        );
    }

    #[test]
    fn test_select_with_filter_order_and_paging() {
        let db = database();
        let request = SelectRequest::new()
            .column("id")
            .column(SelectColumn::new("name").function("lower").alias("lname"))
            .filter(term("id").gt(10))
            .order_by(SortOrder::desc("id"))
            .paging(20, 10);
        let rendered = render(&db, &request).unwrap();
        let statement = &rendered.statements()[0];
        assert_eq!(
            statement.sql,
            "SELECT users.\"id\", LOWER(users.\"name\") AS \"lname\" FROM \"users\" \
             WHERE users.\"id\" > ? ORDER BY users.\"id\" DESC LIMIT ? OFFSET ?"
        );
        assert_eq!(
            statement.params,
            vec![SqlValue::Int(10), SqlValue::Int(10), SqlValue::Int(20)]
        );
    }

    #[test]
    fn test_unknown_column() {
        let db = database();
        let err = render(&db, &SelectRequest::new().column("email")).unwrap_err();
        assert!(matches!(err, RenderError::UnknownColumn { column, .. } if column == "email"));
    }
}
