//! Column references used by DML requests.
//!
//! [`FunctionColumn`] is the common base: a target column plus an optional
//! function and its options. [`SelectColumn`], [`InsertColumn`] and
//! [`UpdateColumn`] extend it and dereference to it.

use std::collections::BTreeMap;
use std::ops::Deref;

use crate::error::{RenderError, Result};
use crate::fragment::SqlFragment;
use crate::metadata::{function_id, FeatureProvider, TableRef};
use crate::value::{SqlValue, ToSqlValue};

/// A column reference with optional function transformation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionColumn {
    /// Target column name.
    pub column: String,
    /// Function applied to the column, resolved as a `function:<name>` feature.
    pub function: Option<String>,
    /// Function options.
    pub opts: BTreeMap<String, SqlValue>,
}

impl FunctionColumn {
    /// Creates a plain column reference.
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            function: None,
            opts: BTreeMap::new(),
        }
    }

    /// Applies a function to the column.
    #[must_use]
    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Sets a function option.
    #[must_use]
    pub fn opt<T: ToSqlValue>(mut self, key: impl Into<String>, value: T) -> Self {
        self.opts.insert(key.into(), value.to_sql_value());
        self
    }

    /// Renders the column as a full name, wrapped in its function if any.
    ///
    /// # Errors
    ///
    /// Fails when the column is unknown or the function is not available on
    /// the column's feature chain.
    pub fn render(&self, table: TableRef<'_>) -> Result<SqlFragment> {
        let column = table.require_column(&self.column)?;
        let target = SqlFragment::raw(column.full_name(None));
        self.apply_function(&column, target)
    }

    /// Applies this column's function to an arbitrary fragment.
    ///
    /// The function is looked up on `column`'s feature chain.
    pub(crate) fn apply_function(
        &self,
        column: &dyn FeatureProvider,
        target: SqlFragment,
    ) -> Result<SqlFragment> {
        let Some(function) = &self.function else {
            return Ok(target);
        };
        let unknown = || RenderError::UnknownFunction {
            function: function.clone(),
            column: self.column.clone(),
        };
        let feature = column.find_feature(&function_id(function)).ok_or_else(unknown)?;
        let sql_function = feature.as_function().ok_or_else(unknown)?;
        sql_function.apply(target, &self.opts)
    }
}

impl From<&str> for FunctionColumn {
    fn from(column: &str) -> Self {
        Self::new(column)
    }
}

/// A selected column with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectColumn {
    base: FunctionColumn,
    alias: Option<String>,
}

impl SelectColumn {
    /// Selects a plain column.
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self::from(FunctionColumn::new(column))
    }

    /// Applies a function.
    #[must_use]
    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.base.function = Some(function.into());
        self
    }

    /// Sets a function option.
    #[must_use]
    pub fn opt<T: ToSqlValue>(mut self, key: impl Into<String>, value: T) -> Self {
        self.base = self.base.opt(key, value);
        self
    }

    /// Sets the output alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The output alias.
    #[must_use]
    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

impl From<FunctionColumn> for SelectColumn {
    fn from(base: FunctionColumn) -> Self {
        Self { base, alias: None }
    }
}

impl From<&str> for SelectColumn {
    fn from(column: &str) -> Self {
        Self::new(column)
    }
}

impl Deref for SelectColumn {
    type Target = FunctionColumn;

    fn deref(&self) -> &FunctionColumn {
        &self.base
    }
}

/// A column receiving values in an INSERT.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InsertColumn(FunctionColumn);

impl InsertColumn {
    /// Creates an insert column for `column`.
    #[must_use]
    pub fn of(column: impl Into<String>) -> Self {
        Self(FunctionColumn::new(column))
    }

    /// Applies a function to each inserted value.
    #[must_use]
    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.0.function = Some(function.into());
        self
    }
}

impl Deref for InsertColumn {
    type Target = FunctionColumn;

    fn deref(&self) -> &FunctionColumn {
        &self.0
    }
}

/// A column assignment in an UPDATE.
///
/// A function, if set, wraps the bound value: `"name" = LOWER(?)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpdateColumn {
    base: FunctionColumn,
    value: SqlValue,
}

impl UpdateColumn {
    /// Assigns `value` to `column`.
    #[must_use]
    pub fn new<T: ToSqlValue>(column: impl Into<String>, value: T) -> Self {
        Self {
            base: FunctionColumn::new(column),
            value: value.to_sql_value(),
        }
    }

    /// Applies a function to the assigned value.
    #[must_use]
    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.base.function = Some(function.into());
        self
    }

    /// The assigned value.
    #[must_use]
    pub const fn value(&self) -> &SqlValue {
        &self.value
    }
}

impl Deref for UpdateColumn {
    type Target = FunctionColumn;

    fn deref(&self) -> &FunctionColumn {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::metadata::{ColumnMetadata, DatabaseMetadata, SqlType, TableMetadata};

    fn database() -> DatabaseMetadata {
        let mut db = DatabaseMetadata::for_dialect("app", "generic").unwrap();
        let mut users = TableMetadata::new("users", db.dialect().clone());
        users
            .add_column(ColumnMetadata::new("id").with_sql_type(SqlType::Integer))
            .unwrap();
        users
            .add_column(ColumnMetadata::new("name").with_sql_type(SqlType::Varchar))
            .unwrap();
        db.add_table(users).unwrap();
        db
    }

    #[test]
    fn test_plain_column_renders_full_name() {
        let db = database();
        let users = db.require_table("users").unwrap();
        let sql = FunctionColumn::new("name").render(users).unwrap();
        assert_eq!(sql.sql(), "users.\"name\"");
    }

    #[test]
    fn test_function_resolves_through_database() {
        let db = database();
        let users = db.require_table("users").unwrap();
        let sql = FunctionColumn::new("id")
            .function("count")
            .opt("distinct", true)
            .render(users)
            .unwrap();
        assert_eq!(sql.sql(), "COUNT(DISTINCT users.\"id\")");
    }

    #[test]
    fn test_unknown_function() {
        let db = database();
        let users = db.require_table("users").unwrap();
        let err = FunctionColumn::new("id").function("median").render(users).unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnknownFunction { function, column } if function == "median" && column == "id"
        ));
    }

    #[test]
    fn test_function_requires_database_chain() {
        let mut table = TableMetadata::new("t", Arc::new(crate::dialect::GenericDialect::new()));
        table.add_column(ColumnMetadata::new("a")).unwrap();
        let err = FunctionColumn::new("a")
            .function("count")
            .render(table.bind())
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownFunction { .. }));
    }

    #[test]
    fn test_equality_includes_base() {
        let mut set = HashSet::new();
        set.insert(SelectColumn::new("id"));
        set.insert(SelectColumn::new("id"));
        set.insert(SelectColumn::new("id").function("count"));
        assert_eq!(set.len(), 2);

        assert_eq!(InsertColumn::of("id"), InsertColumn::of("id"));
        assert_ne!(UpdateColumn::new("id", 1), UpdateColumn::new("id", 2));
        assert_eq!(InsertColumn::of("name").column, "name");
    }
}
