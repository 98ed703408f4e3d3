//! MySQL DDL.

use crate::error::Result;
use crate::metadata::{ColumnRef, TableRef};
use crate::render::DdlSyntax;

/// MySQL spelling: inline `COMMENT` clauses, `MODIFY COLUMN` and
/// `CHANGE COLUMN` carrying full definitions.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDdl;

impl DdlSyntax for MysqlDdl {
    fn bool_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn inline_comments(&self) -> bool {
        true
    }

    fn table_options(&self, table: TableRef<'_>) -> String {
        table.metadata().comment().map_or_else(String::new, |comment| {
            format!(" COMMENT = {}", table.dialect().string_literal(comment))
        })
    }

    fn rename_column(
        &self,
        table: TableRef<'_>,
        before: &ColumnRef<'_>,
        after: &ColumnRef<'_>,
    ) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} CHANGE COLUMN {} {}",
            table.full_name(),
            before.quote_name(),
            self.column_definition(after)?
        ))
    }

    fn modify_column(
        &self,
        table: TableRef<'_>,
        _before: &ColumnRef<'_>,
        after: &ColumnRef<'_>,
    ) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} MODIFY COLUMN {}",
            table.full_name(),
            self.column_definition(after)?
        ))
    }

    fn comment_table(&self, table: TableRef<'_>, previous: Option<&str>) -> Result<Option<String>> {
        let comment = table.metadata().comment();
        if comment == previous {
            return Ok(None);
        }
        Ok(Some(format!(
            "ALTER TABLE {} COMMENT = {}",
            table.full_name(),
            table.dialect().string_literal(comment.unwrap_or_default())
        )))
    }

    /// A comment change re-declares the column with its new comment.
    fn comment_column(
        &self,
        table: TableRef<'_>,
        before: Option<&ColumnRef<'_>>,
        column: &ColumnRef<'_>,
    ) -> Result<Option<String>> {
        if column.comment() == before.and_then(|b| b.comment()) {
            return Ok(None);
        }
        let before = before.unwrap_or(column);
        self.modify_column(table, before, column).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{ColumnMetadata, DatabaseMetadata, SqlType, TableMetadata};

    fn database(comment: &str) -> DatabaseMetadata {
        let mut db = DatabaseMetadata::for_dialect("app", "mysql").unwrap();
        let mut users = TableMetadata::new("users", db.dialect().clone());
        users
            .add_column(
                ColumnMetadata::new("name")
                    .with_sql_type(SqlType::Varchar)
                    .with_length(32)
                    .not_null()
                    .with_comment(comment),
            )
            .unwrap();
        db.add_table(users).unwrap();
        db
    }

    #[test]
    fn test_inline_comment_in_definition() {
        let db = database("User's name");
        let name = db.require_table("users").unwrap().require_column("name").unwrap();
        assert_eq!(
            MysqlDdl.column_definition(&name).unwrap(),
            "`name` varchar(32) NOT NULL COMMENT 'User''s name'"
        );
    }

    #[test]
    fn test_comment_change_is_a_modify() {
        let before = database("Name");
        let after = database("Full name");
        let table = after.require_table("users").unwrap();
        let old = before.require_table("users").unwrap().require_column("name").unwrap();
        let new = table.require_column("name").unwrap();
        assert_eq!(
            MysqlDdl.comment_column(table, Some(&old), &new).unwrap().unwrap(),
            "ALTER TABLE `users` MODIFY COLUMN `name` varchar(32) NOT NULL COMMENT 'Full name'"
        );
        assert!(MysqlDdl.comment_column(table, Some(&new), &new).unwrap().is_none());
    }
}
