//! Database metadata: the root of the ownership chain.

use std::sync::Arc;

use tracing::debug;

use super::definition::SchemaDefinition;
use super::feature::{FeatureMap, FeatureProvider, FeatureRef};
use super::table::{TableMetadata, TableRef};
use super::types::ObjectKind;
use crate::dialect::{self, Dialect};
use crate::dml::functions;
use crate::error::{RenderError, Result};
use crate::render::{self, OperationKind, RenderRequest, RenderedSql, RendererRegistry};

/// A set of tables sharing a dialect, its renderers and database-level features.
#[derive(Debug, Clone)]
pub struct DatabaseMetadata {
    name: String,
    schema: Option<String>,
    dialect: Arc<dyn Dialect>,
    features: FeatureMap,
    tables: Vec<TableMetadata>,
    renderers: Arc<RendererRegistry>,
}

impl DatabaseMetadata {
    /// Creates a database with a custom dialect and renderer registry.
    ///
    /// The built-in SQL function features for the dialect are registered.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DialectMismatch`] when the registry was built for
    /// another dialect.
    pub fn new(
        name: impl Into<String>,
        dialect: Arc<dyn Dialect>,
        renderers: Arc<RendererRegistry>,
    ) -> Result<Self> {
        if renderers.dialect() != dialect.name() {
            return Err(RenderError::DialectMismatch {
                expected: dialect.name().to_string(),
                actual: renderers.dialect().to_string(),
            });
        }
        let mut features = FeatureMap::new();
        for function in functions::builtin(dialect.name()) {
            features.insert(function);
        }
        Ok(Self {
            name: name.into(),
            schema: None,
            dialect,
            features,
            tables: Vec::new(),
            renderers,
        })
    }

    /// Creates a database for one of the built-in dialects.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownDialect`] for an unknown dialect name.
    pub fn for_dialect(name: impl Into<String>, dialect_name: &str) -> Result<Self> {
        let dialect = dialect::by_name(dialect_name)?;
        let renderers = render::registry_for(dialect.name())?;
        Self::new(name, dialect, Arc::new(renderers))
    }

    /// Builds a database from a parsed schema definition.
    ///
    /// # Errors
    ///
    /// Fails on an unknown dialect or on duplicate table or column names.
    pub fn from_definition(dialect_name: &str, definition: SchemaDefinition) -> Result<Self> {
        let mut database = Self::for_dialect(definition.name, dialect_name)?;
        database.schema = definition.schema;
        for table_def in definition.tables {
            let dialect = database.dialect.clone();
            let mut table = match table_def.kind {
                ObjectKind::Table => TableMetadata::new(table_def.name, dialect),
                ObjectKind::View => TableMetadata::view(table_def.name, dialect),
            };
            table.set_comment(table_def.comment);
            for column in table_def.columns {
                table.add_column(column)?;
            }
            database.add_table(table)?;
        }
        debug!(
            database = %database.name,
            dialect = database.dialect.name(),
            tables = database.tables.len(),
            "Loaded schema definition"
        );
        Ok(database)
    }

    /// Sets the schema that qualifies table names.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    #[must_use]
    pub fn dialect(&self) -> &Arc<dyn Dialect> {
        &self.dialect
    }

    #[must_use]
    pub fn renderers(&self) -> &RendererRegistry {
        &self.renderers
    }

    /// Adds a table; it takes over this database's dialect.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DuplicateTable`] if the name is taken.
    pub fn add_table(&mut self, mut table: TableMetadata) -> Result<()> {
        if self.tables.iter().any(|t| t.name() == table.name()) {
            return Err(RenderError::DuplicateTable(table.name().to_string()));
        }
        table.set_dialect(self.dialect.clone());
        self.tables.push(table);
        Ok(())
    }

    /// Removes a table.
    pub fn remove_table(&mut self, name: &str) -> Option<TableMetadata> {
        let pos = self.tables.iter().position(|t| t.name() == name)?;
        Some(self.tables.remove(pos))
    }

    /// Gets a table bound to this database.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<TableRef<'_>> {
        self.tables
            .iter()
            .find(|t| t.name() == name)
            .map(|t| TableRef::in_database(t, self))
    }

    /// Gets a table bound to this database.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownTable`] if no table has this name.
    pub fn require_table(&self, name: &str) -> Result<TableRef<'_>> {
        self.table(name)
            .ok_or_else(|| RenderError::UnknownTable(name.to_string()))
    }

    /// Gets a mutable table by name, for alter planning.
    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut TableMetadata> {
        self.tables.iter_mut().find(|t| t.name() == name)
    }

    /// Tables bound to this database, in insertion order.
    pub fn tables(&self) -> impl Iterator<Item = TableRef<'_>> {
        self.tables.iter().map(|t| TableRef::in_database(t, self))
    }

    /// Attaches a database-level feature.
    pub fn add_feature(&mut self, feature: FeatureRef) -> Option<FeatureRef> {
        self.features.insert(feature)
    }

    #[must_use]
    pub const fn features(&self) -> &FeatureMap {
        &self.features
    }

    /// Renders `request` with this database's renderer for `kind`.
    ///
    /// # Errors
    ///
    /// Any failure is returned as [`RenderError::Render`], naming the dialect,
    /// the operation kind and the object being rendered.
    pub fn render(&self, kind: OperationKind, request: &RenderRequest<'_>) -> Result<RenderedSql> {
        self.renderers.render(kind, request)
    }
}

impl FeatureProvider for DatabaseMetadata {
    fn own_features(&self) -> &FeatureMap {
        &self.features
    }
}
