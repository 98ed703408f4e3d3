//! ALTER TABLE rendering from a table diff.

use tracing::warn;

use crate::diff::{ColumnChange, TableDiff};
use crate::error::Result;
use crate::render::{DdlSyntax, OperationKind, RenderRequest, RenderedSql, SqlRender, SqlStatement};

/// Renders the statements migrating one table definition into another.
///
/// One statement per change, in diff order. Statements address the target
/// table by its schema-qualified name. Identical tables render no statements.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlterTableRenderer<S> {
    syntax: S,
}

impl<S: DdlSyntax> AlterTableRenderer<S> {
    /// Creates a renderer using `syntax` for each statement.
    #[must_use]
    pub const fn new(syntax: S) -> Self {
        Self { syntax }
    }
}

impl<S: DdlSyntax> SqlRender for AlterTableRenderer<S> {
    fn kind(&self) -> OperationKind {
        OperationKind::AlterTable
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedSql> {
        let RenderRequest::AlterTable { before, after } = *request else {
            return Err(request.mismatch(OperationKind::AlterTable));
        };
        let diff = TableDiff::between(before, after);
        for warning in diff.warnings() {
            warn!(table = %after.name(), ?warning, "Change not applied by ALTER");
        }

        let syntax = &self.syntax;
        let mut rendered = RenderedSql::new();
        for change in diff.changes() {
            let sql = match change {
                ColumnChange::Drop { column } => Some(syntax.drop_column(after, column)),
                ColumnChange::Rename {
                    before: old,
                    after: new,
                } => Some(syntax.rename_column(after, old, new)?),
                ColumnChange::Modify {
                    before: old,
                    after: new,
                    ..
                } => Some(syntax.modify_column(after, old, new)?),
                ColumnChange::Add { column } => Some(syntax.add_column(after, column)?),
                ColumnChange::Comment {
                    before: old,
                    after: new,
                } => {
                    let covered = syntax.inline_comments()
                        && (old.is_none()
                            || diff.is_modified(new.name())
                            || diff.is_renamed(new.name()));
                    if covered {
                        None
                    } else {
                        syntax.comment_column(after, old.as_ref(), new)?
                    }
                }
            };
            if let Some(sql) = sql {
                rendered.push(SqlStatement::text(sql));
            }
        }

        if diff.table_comment_changed() {
            if let Some(sql) = syntax.comment_table(after, before.metadata().comment())? {
                rendered.push(SqlStatement::text(sql));
            }
        }
        Ok(rendered)
    }
}
