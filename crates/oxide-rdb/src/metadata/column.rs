//! Column metadata.
//!
//! [`ColumnMetadata`] holds the schema facts of one column. It records its
//! owner by name only; every dialect-dependent operation goes through a
//! [`ColumnRef`], a borrowed view pairing the column with its owning table.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::feature::{Feature, FeatureMap, FeatureProvider, FeatureRef};
use super::table::TableRef;
use super::types::{DefaultValue, SqlType};
use crate::dialect::Dialect;
use crate::error::{RenderError, Result};

const fn default_updatable() -> bool {
    true
}

/// Schema facts of a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMetadata {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    /// Explicit data type; `None` means "derive from attributes via the dialect".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sql_type: Option<SqlType>,
    #[serde(default)]
    length: u32,
    #[serde(default)]
    precision: u32,
    #[serde(default)]
    scale: u32,
    #[serde(default)]
    primary_key: bool,
    #[serde(default)]
    not_null: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<DefaultValue>,
    /// Raw definition; replaces everything derived after the column name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    column_definition: Option<String>,
    #[serde(default = "default_updatable")]
    updatable: bool,
    #[serde(default)]
    sort_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    previous_name: Option<String>,
    #[serde(skip)]
    owner: Option<String>,
    #[serde(skip)]
    features: FeatureMap,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, serde_json::Value>,
}

impl ColumnMetadata {
    /// Creates a detached column with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            comment: None,
            data_type: None,
            sql_type: None,
            length: 0,
            precision: 0,
            scale: 0,
            primary_key: false,
            not_null: false,
            default_value: None,
            column_definition: None,
            updatable: true,
            sort_index: 0,
            previous_name: None,
            owner: None,
            features: FeatureMap::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Sets the engine type tag.
    #[must_use]
    pub fn with_sql_type(mut self, sql_type: SqlType) -> Self {
        self.sql_type = Some(sql_type);
        self
    }

    /// Sets the length.
    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Sets precision and scale.
    #[must_use]
    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }

    /// Sets an explicit data type, bypassing dialect synthesis.
    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Marks the column as primary key. Primary keys are always NOT NULL.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Marks the column as read-only for UPDATE statements.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.updatable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Sets a raw column definition.
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.column_definition = Some(definition.into());
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the sort index.
    #[must_use]
    pub fn with_sort_index(mut self, sort_index: i32) -> Self {
        self.sort_index = sort_index;
        self
    }

    /// Attaches a feature to the column.
    #[must_use]
    pub fn with_feature(mut self, feature: FeatureRef) -> Self {
        self.features.insert(feature);
        self
    }

    /// Sets a property.
    #[must_use]
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the column.
    ///
    /// When no previous name is recorded yet, the current name is captured as
    /// the previous name before it is overwritten, so the rename stays
    /// detectable by [`ColumnRef::is_changed`]. Owned columns are renamed
    /// through [`TableMetadata::rename_column`](super::TableMetadata::rename_column),
    /// which keeps names unique.
    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.previous_name.is_none() {
            self.previous_name = Some(std::mem::replace(&mut self.name, name));
        } else {
            self.name = name;
        }
    }

    /// Name the column had before pending renames; the current name if none.
    #[must_use]
    pub fn previous_name(&self) -> &str {
        self.previous_name.as_deref().unwrap_or(&self.name)
    }

    /// Explicitly records the name the column has in the deployed schema.
    pub fn set_previous_name(&mut self, previous_name: Option<String>) {
        self.previous_name = previous_name;
    }

    /// Forgets pending renames once the schema has been migrated.
    pub fn mark_synced(&mut self) {
        self.previous_name = None;
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    /// Explicit data type, if any. See [`ColumnRef::data_type`] for the resolved one.
    #[must_use]
    pub fn explicit_data_type(&self) -> Option<&str> {
        self.data_type.as_deref()
    }

    pub fn set_data_type(&mut self, data_type: Option<String>) {
        self.data_type = data_type;
    }

    /// Engine type tag.
    #[must_use]
    pub const fn sql_type(&self) -> Option<SqlType> {
        self.sql_type
    }

    pub fn set_sql_type(&mut self, sql_type: Option<SqlType>) {
        self.sql_type = sql_type;
    }

    /// Length (0 when unset).
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    pub fn set_length(&mut self, length: u32) {
        self.length = length;
    }

    /// Precision (0 when unset).
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Scale (0 when unset).
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    pub fn set_precision(&mut self, precision: u32, scale: u32) {
        self.precision = precision;
        self.scale = scale;
    }

    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Whether the column is NOT NULL. Primary keys always are.
    #[must_use]
    pub const fn is_not_null(&self) -> bool {
        self.not_null || self.primary_key
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&DefaultValue> {
        self.default_value.as_ref()
    }

    /// Raw column definition.
    #[must_use]
    pub fn column_definition(&self) -> Option<&str> {
        self.column_definition.as_deref()
    }

    pub fn set_column_definition(&mut self, definition: Option<String>) {
        self.column_definition = definition;
    }

    /// Whether UPDATE statements may assign this column.
    #[must_use]
    pub const fn is_updatable(&self) -> bool {
        self.updatable
    }

    /// Sort index among sibling columns.
    #[must_use]
    pub const fn sort_index(&self) -> i32 {
        self.sort_index
    }

    pub fn set_sort_index(&mut self, sort_index: i32) {
        self.sort_index = sort_index;
    }

    /// Name of the owning table or view.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub(crate) fn set_owner(&mut self, owner: Option<String>) {
        self.owner = owner;
    }

    /// Features attached directly to this column.
    #[must_use]
    pub const fn features(&self) -> &FeatureMap {
        &self.features
    }

    /// Attaches a feature, replacing one with the same id.
    pub fn add_feature(&mut self, feature: FeatureRef) -> Option<FeatureRef> {
        self.features.insert(feature)
    }

    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut BTreeMap<String, serde_json::Value> {
        &mut self.properties
    }

    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    /// Total order by sort index, ties broken by name.
    #[must_use]
    pub fn cmp_by_sort_index(&self, other: &Self) -> Ordering {
        self.sort_index
            .cmp(&other.sort_index)
            .then_with(|| self.name.cmp(&other.name))
    }

    /// Binds the column to its owner for dialect-dependent operations.
    ///
    /// Fails when the column is detached or owned by another table.
    pub fn bind<'a>(&'a self, owner: TableRef<'a>) -> Result<ColumnRef<'a>> {
        match self.owner.as_deref() {
            None => Err(RenderError::Unowned {
                column: self.name.clone(),
            }),
            Some(name) if name != owner.name() => Err(RenderError::OwnerMismatch {
                column: self.name.clone(),
                owner: name.to_string(),
                requested: owner.name().to_string(),
            }),
            Some(_) => Ok(ColumnRef {
                owner,
                column: self,
            }),
        }
    }
}

/// Which attribute made a column differ from its target definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeReason {
    /// The column was renamed.
    Renamed,
    /// The engine type tag differs.
    SqlType,
    /// The resolved data type differs.
    DataType,
    /// The length differs.
    Length,
    /// The scale differs.
    Scale,
    /// The raw column definition differs.
    Definition,
}

/// A column bound to its owning table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRef<'a> {
    owner: TableRef<'a>,
    column: &'a ColumnMetadata,
}

impl<'a> ColumnRef<'a> {
    /// Pairs a column with the table holding it; the caller guarantees ownership.
    pub(crate) const fn new(owner: TableRef<'a>, column: &'a ColumnMetadata) -> Self {
        Self { owner, column }
    }

    /// Column name, borrowed for the lifetime of the metadata.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.column.name
    }

    /// The owning table.
    #[must_use]
    pub const fn table(&self) -> TableRef<'a> {
        self.owner
    }

    /// The underlying column metadata.
    #[must_use]
    pub const fn metadata(&self) -> &'a ColumnMetadata {
        self.column
    }

    /// The owner's dialect.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.owner.dialect()
    }

    /// Explicit data type if set, otherwise synthesized by the dialect.
    pub fn data_type(&self) -> Result<String> {
        match &self.column.data_type {
            Some(data_type) => Ok(data_type.clone()),
            None => self.dialect().build_data_type(self.column),
        }
    }

    /// The column name quoted by the dialect.
    #[must_use]
    pub fn quote_name(&self) -> String {
        self.dialect().quote(&self.column.name)
    }

    /// Qualified column reference.
    ///
    /// Uses the owner's name unless a non-empty override is given.
    #[must_use]
    pub fn full_name(&self, owner_override: Option<&str>) -> String {
        let owner = match owner_override {
            Some(name) if !name.is_empty() => name,
            _ => self.owner.name(),
        };
        self.dialect().build_column_full_name(owner, &self.column.name)
    }

    /// Decides whether migrating this column to `after` needs a statement.
    ///
    /// A data type or raw definition missing on this side is never compared.
    #[must_use]
    pub fn is_changed(&self, after: &ColumnRef<'_>) -> bool {
        self.change_reason(after).is_some()
    }

    /// Returns the first attribute that differs from `after`, if any.
    #[must_use]
    pub fn change_reason(&self, after: &ColumnRef<'_>) -> Option<ChangeReason> {
        let reason = if self.column.name == self.column.previous_name() {
            self.attribute_change(after)
        } else {
            Some(ChangeReason::Renamed)
        };
        if let Some(reason) = reason {
            trace!(
                table = %self.owner.name(),
                column = %self.column.name,
                ?reason,
                "Column differs from target"
            );
        }
        reason
    }

    /// Like [`change_reason`](Self::change_reason), ignoring renames.
    #[must_use]
    pub fn attribute_change(&self, after: &ColumnRef<'_>) -> Option<ChangeReason> {
        let before = self.column;
        let target = after.column;

        if before.sql_type != target.sql_type {
            Some(ChangeReason::SqlType)
        } else if self.data_type_differs(after) {
            Some(ChangeReason::DataType)
        } else if before.length != target.length {
            Some(ChangeReason::Length)
        } else if before.scale != target.scale {
            Some(ChangeReason::Scale)
        } else if before
            .column_definition
            .as_deref()
            .is_some_and(|def| target.column_definition.as_deref() != Some(def))
        {
            Some(ChangeReason::Definition)
        } else {
            None
        }
    }

    fn data_type_differs(&self, after: &ColumnRef<'_>) -> bool {
        let Ok(before) = self.data_type() else {
            return false;
        };
        match after.data_type() {
            Ok(target) => before != target,
            Err(_) => true,
        }
    }
}

impl Deref for ColumnRef<'_> {
    type Target = ColumnMetadata;

    fn deref(&self) -> &Self::Target {
        self.column
    }
}

impl FeatureProvider for ColumnRef<'_> {
    fn own_features(&self) -> &FeatureMap {
        &self.column.features
    }

    fn parent_scope(&self) -> Option<&dyn FeatureProvider> {
        Some(&self.owner)
    }
}

/// Returns the features of `column` visible through its owner chain that match `predicate`.
///
/// Convenience for callers holding a concrete feature type predicate.
pub fn features_matching<F>(column: &ColumnRef<'_>, predicate: F) -> Vec<FeatureRef>
where
    F: Fn(&dyn Feature) -> bool,
{
    column.find_features(&predicate)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dialect::{GenericDialect, MssqlDialect};
    use crate::metadata::{FeatureMarker, TableMetadata};

    fn users(dialect: Arc<dyn Dialect>) -> TableMetadata {
        let mut table = TableMetadata::new("users", dialect);
        table
            .add_column(
                ColumnMetadata::new("id")
                    .with_sql_type(SqlType::Integer)
                    .primary_key(),
            )
            .unwrap();
        table
            .add_column(
                ColumnMetadata::new("name")
                    .with_sql_type(SqlType::Varchar)
                    .with_length(32)
                    .with_sort_index(1),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_derived_data_type_matches_dialect() {
        for dialect in [
            Arc::new(GenericDialect::new()) as Arc<dyn Dialect>,
            Arc::new(MssqlDialect::new()),
        ] {
            let table = users(dialect.clone());
            let name = table.column("name").unwrap();
            assert_eq!(
                name.data_type().unwrap(),
                dialect.build_data_type(name.metadata()).unwrap()
            );
        }
    }

    #[test]
    fn test_explicit_data_type_wins() {
        let mut table = users(Arc::new(MssqlDialect::new()));
        table
            .add_column(ColumnMetadata::new("bio").with_data_type("text").with_sql_type(SqlType::Clob))
            .unwrap();
        assert_eq!(table.column("bio").unwrap().data_type().unwrap(), "text");
    }

    #[test]
    fn test_quote_and_full_name() {
        let table = users(Arc::new(MssqlDialect::new()));
        let name = table.column("name").unwrap();
        assert_eq!(name.quote_name(), "[name]");
        assert_eq!(name.full_name(None), "users.[name]");
        assert_eq!(name.full_name(Some("u")), "u.[name]");
        assert_eq!(name.full_name(Some("")), "users.[name]");
    }

    #[test]
    fn test_detached_column_fails_fast() {
        let table = users(Arc::new(GenericDialect::new()));
        let detached = ColumnMetadata::new("ghost");
        assert!(matches!(
            detached.bind(table.bind()),
            Err(RenderError::Unowned { column }) if column == "ghost"
        ));
    }

    #[test]
    fn test_bind_to_wrong_owner_fails() {
        let users = users(Arc::new(GenericDialect::new()));
        let orders = TableMetadata::new("orders", Arc::new(GenericDialect::new()));
        let id = users.get_column("id").unwrap();
        assert!(matches!(
            id.bind(orders.bind()),
            Err(RenderError::OwnerMismatch { .. })
        ));
    }

    #[test]
    fn test_previous_name_defaults_to_name_and_detects_rename() {
        let mut before = users(Arc::new(GenericDialect::new()));
        let after = before.clone();
        assert_eq!(before.get_column("name").unwrap().previous_name(), "name");

        before.rename_column("name", "full_name").unwrap();
        let renamed = before.get_column("full_name").unwrap();
        assert_eq!(renamed.previous_name(), "name");

        let renamed = renamed.bind(before.bind()).unwrap();
        let target = after.column("name").unwrap();
        assert_eq!(renamed.change_reason(&target), Some(ChangeReason::Renamed));
    }

    #[test]
    fn test_is_changed_reflexive_false() {
        let table = users(Arc::new(GenericDialect::new()));
        for column in table.bind().columns() {
            assert!(!column.is_changed(&column));
        }
    }

    #[test]
    fn test_length_change_detected() {
        let before = users(Arc::new(GenericDialect::new()));
        let mut after = before.clone();
        after.get_column_mut("name").unwrap().set_length(64);

        let old = before.column("name").unwrap();
        let new = after.column("name").unwrap();
        // the derived type already differs
        assert_eq!(old.change_reason(&new), Some(ChangeReason::DataType));
    }

    #[test]
    fn test_missing_before_definition_is_skipped() {
        let before = users(Arc::new(GenericDialect::new()));
        let mut after = before.clone();
        after
            .get_column_mut("name")
            .unwrap()
            .set_column_definition(Some("varchar(32) collate nocase".into()));

        let old = before.column("name").unwrap();
        let new = after.column("name").unwrap();
        assert!(!old.is_changed(&new));
        assert_eq!(new.change_reason(&old), Some(ChangeReason::Definition));
    }

    #[test]
    fn test_data_type_comparison_is_exact() {
        let mut before = TableMetadata::new("t", Arc::new(GenericDialect::new()));
        before
            .add_column(ColumnMetadata::new("c").with_data_type("VARCHAR(32)"))
            .unwrap();
        let mut after = TableMetadata::new("t", Arc::new(GenericDialect::new()));
        after
            .add_column(ColumnMetadata::new("c").with_data_type("varchar(32)"))
            .unwrap();

        let old = before.column("c").unwrap();
        let new = after.column("c").unwrap();
        assert_eq!(old.change_reason(&new), Some(ChangeReason::DataType));
        assert!(!old.is_changed(&old));
    }

    #[test]
    fn test_unresolvable_before_type_is_skipped() {
        let mut before = TableMetadata::new("t", Arc::new(GenericDialect::new()));
        before.add_column(ColumnMetadata::new("c")).unwrap();
        let mut after = TableMetadata::new("t", Arc::new(GenericDialect::new()));
        after.add_column(ColumnMetadata::new("c").with_data_type("text")).unwrap();

        let old = before.column("c").unwrap();
        let new = after.column("c").unwrap();
        assert!(!old.is_changed(&new));
    }

    #[test]
    fn test_clone_deep_copies_bags() {
        let mut table = users(Arc::new(GenericDialect::new()));
        let column = table.get_column_mut("name").unwrap();
        column
            .properties_mut()
            .insert("label".into(), serde_json::json!("Name"));
        column.add_feature(Arc::new(FeatureMarker::new("searchable")));

        let original = table.get_column("name").unwrap();
        let mut copy = original.clone();
        assert_eq!(copy.properties(), original.properties());
        assert_eq!(copy.owner(), original.owner());

        copy.properties_mut()
            .insert("label".into(), serde_json::json!("Changed"));
        copy.add_feature(Arc::new(FeatureMarker::new("sortable")));

        assert_eq!(original.get_property("label"), Some(&serde_json::json!("Name")));
        assert_eq!(original.features().len(), 1);
        assert_eq!(copy.features().len(), 2);
    }

    #[test]
    fn test_sort_by_sort_index() {
        let mut columns: Vec<ColumnMetadata> = [3, 1, 2]
            .into_iter()
            .map(|i| ColumnMetadata::new(format!("c{i}")).with_sort_index(i))
            .collect();
        columns.sort_by(ColumnMetadata::cmp_by_sort_index);
        let order: Vec<i32> = columns.iter().map(ColumnMetadata::sort_index).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_find_features_owner_first() {
        let mut table = users(Arc::new(GenericDialect::new()));
        table.add_feature(Arc::new(FeatureMarker::new("audited")));
        table
            .get_column_mut("name")
            .unwrap()
            .add_feature(Arc::new(FeatureMarker::new("searchable")));

        let name = table.column("name").unwrap();
        let ids: Vec<String> = features_matching(&name, |_| true)
            .iter()
            .map(|f| f.id().to_string())
            .collect();
        assert_eq!(ids, vec!["audited", "searchable"]);
        assert!(name.find_feature("audited").is_some());
        assert!(table.column("id").unwrap().find_feature("searchable").is_none());
    }
}
