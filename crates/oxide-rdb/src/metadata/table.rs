//! Table and view metadata.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::column::{ColumnMetadata, ColumnRef};
use super::database::DatabaseMetadata;
use super::feature::{FeatureMap, FeatureProvider, FeatureRef};
use super::types::ObjectKind;
use crate::dialect::Dialect;
use crate::error::{RenderError, Result};

/// Metadata of a table or view: ordered, uniquely named columns plus features.
#[derive(Debug, Clone)]
pub struct TableMetadata {
    name: String,
    kind: ObjectKind,
    comment: Option<String>,
    dialect: Arc<dyn Dialect>,
    columns: Vec<ColumnMetadata>,
    features: FeatureMap,
    properties: BTreeMap<String, serde_json::Value>,
}

impl TableMetadata {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Table,
            comment: None,
            dialect,
            columns: Vec::new(),
            features: FeatureMap::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Creates an empty view.
    #[must_use]
    pub fn view(name: impl Into<String>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            kind: ObjectKind::View,
            ..Self::new(name, dialect)
        }
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    /// The dialect this table renders with.
    #[must_use]
    pub fn dialect(&self) -> &Arc<dyn Dialect> {
        &self.dialect
    }

    pub(crate) fn set_dialect(&mut self, dialect: Arc<dyn Dialect>) {
        self.dialect = dialect;
    }

    /// Adds a column and makes this table its owner.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DuplicateColumn`] if the name is taken.
    pub fn add_column(&mut self, mut column: ColumnMetadata) -> Result<()> {
        if self.get_column(column.name()).is_some() {
            return Err(RenderError::DuplicateColumn {
                table: self.name.clone(),
                column: column.name().to_string(),
            });
        }
        column.set_owner(Some(self.name.clone()));
        self.columns.push(column);
        Ok(())
    }

    /// Removes a column, detaching it from this table.
    pub fn remove_column(&mut self, name: &str) -> Option<ColumnMetadata> {
        let pos = self.columns.iter().position(|c| c.name() == name)?;
        let mut column = self.columns.remove(pos);
        column.set_owner(None);
        Some(column)
    }

    /// Renames a column, recording its previous name.
    ///
    /// # Errors
    ///
    /// Fails if `from` does not exist or `to` is already taken.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        if from != to && self.get_column(to).is_some() {
            return Err(RenderError::DuplicateColumn {
                table: self.name.clone(),
                column: to.to_string(),
            });
        }
        let table = self.name.clone();
        let column = self
            .get_column_mut(from)
            .ok_or_else(|| RenderError::UnknownColumn {
                table,
                column: from.to_string(),
            })?;
        column.set_name(to);
        Ok(())
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Gets a mutable column by name.
    pub fn get_column_mut(&mut self, name: &str) -> Option<&mut ColumnMetadata> {
        self.columns.iter_mut().find(|c| c.name() == name)
    }

    /// Columns in insertion order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    /// Gets a column bound to this table.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<ColumnRef<'_>> {
        self.bind().column(name)
    }

    /// A view of this table outside any database.
    #[must_use]
    pub const fn bind(&self) -> TableRef<'_> {
        TableRef {
            table: self,
            database: None,
        }
    }

    /// Attaches a table-level feature.
    pub fn add_feature(&mut self, feature: FeatureRef) -> Option<FeatureRef> {
        self.features.insert(feature)
    }

    #[must_use]
    pub const fn features(&self) -> &FeatureMap {
        &self.features
    }

    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut BTreeMap<String, serde_json::Value> {
        &mut self.properties
    }

    /// Clears pending renames on every column.
    pub fn mark_synced(&mut self) {
        for column in &mut self.columns {
            column.mark_synced();
        }
    }
}

impl FeatureProvider for TableMetadata {
    fn own_features(&self) -> &FeatureMap {
        &self.features
    }
}

/// A table borrowed together with the database that holds it, if any.
#[derive(Debug, Clone, Copy)]
pub struct TableRef<'a> {
    table: &'a TableMetadata,
    database: Option<&'a DatabaseMetadata>,
}

impl<'a> TableRef<'a> {
    pub(crate) const fn in_database(
        table: &'a TableMetadata,
        database: &'a DatabaseMetadata,
    ) -> Self {
        Self {
            table,
            database: Some(database),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.table.name
    }

    #[must_use]
    pub const fn metadata(&self) -> &'a TableMetadata {
        self.table
    }

    #[must_use]
    pub const fn database(&self) -> Option<&'a DatabaseMetadata> {
        self.database
    }

    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.table.dialect.as_ref()
    }

    /// Quoted table name, schema-qualified when the database has a schema.
    #[must_use]
    pub fn full_name(&self) -> String {
        let schema = self.database.and_then(DatabaseMetadata::schema);
        self.dialect().build_table_full_name(schema, &self.table.name)
    }

    /// Gets a bound column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<ColumnRef<'a>> {
        self.table
            .get_column(name)
            .map(|column| ColumnRef::new(*self, column))
    }

    /// Gets a bound column by name.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownColumn`] if the table has no such column.
    pub fn require_column(&self, name: &str) -> Result<ColumnRef<'a>> {
        self.column(name).ok_or_else(|| RenderError::UnknownColumn {
            table: self.table.name.clone(),
            column: name.to_string(),
        })
    }

    /// Bound columns in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = ColumnRef<'a>> + 'a {
        let owner = *self;
        self.table
            .columns
            .iter()
            .map(move |column| ColumnRef::new(owner, column))
    }

    /// Bound columns ordered by sort index.
    #[must_use]
    pub fn sorted_columns(&self) -> Vec<ColumnRef<'a>> {
        let mut columns: Vec<_> = self.columns().collect();
        columns.sort_by(|a, b| a.metadata().cmp_by_sort_index(b.metadata()));
        columns
    }

    /// Primary key columns ordered by sort index.
    #[must_use]
    pub fn primary_keys(&self) -> Vec<ColumnRef<'a>> {
        self.sorted_columns()
            .into_iter()
            .filter(|c| c.is_primary_key())
            .collect()
    }
}

impl FeatureProvider for TableRef<'_> {
    fn own_features(&self) -> &FeatureMap {
        &self.table.features
    }

    fn parent_scope(&self) -> Option<&dyn FeatureProvider> {
        self.database.map(|db| db as &dyn FeatureProvider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::metadata::SqlType;

    fn table() -> TableMetadata {
        let mut table = TableMetadata::new("users", Arc::new(GenericDialect::new()));
        table
            .add_column(
                ColumnMetadata::new("name")
                    .with_sql_type(SqlType::Varchar)
                    .with_sort_index(1),
            )
            .unwrap();
        table
            .add_column(
                ColumnMetadata::new("id")
                    .with_sql_type(SqlType::Integer)
                    .primary_key(),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_add_column_sets_owner() {
        let table = table();
        assert_eq!(table.get_column("id").unwrap().owner(), Some("users"));
        assert_eq!(table.kind(), ObjectKind::Table);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut table = table();
        let err = table.add_column(ColumnMetadata::new("id")).unwrap_err();
        assert!(matches!(err, RenderError::DuplicateColumn { column, .. } if column == "id"));
    }

    #[test]
    fn test_removed_column_is_detached() {
        let mut table = table();
        let removed = table.remove_column("name").unwrap();
        assert_eq!(removed.owner(), None);
        assert_eq!(table.columns().len(), 1);
    }

    #[test]
    fn test_rename_column_checks_names() {
        let mut table = table();
        assert!(matches!(
            table.rename_column("name", "id"),
            Err(RenderError::DuplicateColumn { .. })
        ));
        assert!(table.get_column("name").is_some());
        assert_eq!(table.columns().iter().filter(|c| c.name() == "id").count(), 1);
        assert!(matches!(
            table.rename_column("missing", "other"),
            Err(RenderError::UnknownColumn { .. })
        ));

        table.rename_column("name", "full_name").unwrap();
        let renamed = table.get_column("full_name").unwrap();
        assert_eq!(renamed.previous_name(), "name");

        table.mark_synced();
        assert_eq!(table.get_column("full_name").unwrap().previous_name(), "full_name");
    }

    #[test]
    fn test_sorted_columns_and_primary_keys() {
        let table = table();
        let bound = table.bind();
        let names: Vec<&str> = bound.sorted_columns().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(bound.primary_keys().len(), 1);
        assert_eq!(bound.full_name(), "\"users\"");
    }

    #[test]
    fn test_require_column_reports_table() {
        let table = table();
        let err = table.bind().require_column("email").unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnknownColumn { table, column } if table == "users" && column == "email"
        ));
    }

    #[test]
    fn test_view_kind() {
        let view = TableMetadata::view("active_users", Arc::new(GenericDialect::new()));
        assert_eq!(view.kind(), ObjectKind::View);
    }
}
