//! Features: named capabilities attached to metadata objects.
//!
//! A feature can live on a database, a table or a column. Lookups walk the
//! ownership chain from the nearest scope outwards: a column asks its table,
//! a table asks its database. Listing features returns the raw union of all
//! scopes, outermost first.

use std::fmt;
use std::sync::Arc;

use crate::dml::SqlFunction;

/// Feature id prefix for SQL function features.
pub const FUNCTION_PREFIX: &str = "function:";

/// A capability attached to a metadata object.
pub trait Feature: Send + Sync + fmt::Debug {
    /// Unique feature id within a scope.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str {
        self.id()
    }

    /// Returns this feature as a SQL function, if it renders one.
    fn as_function(&self) -> Option<&dyn SqlFunction> {
        None
    }
}

/// Shared handle to a feature.
pub type FeatureRef = Arc<dyn Feature>;

/// Returns the feature id of the SQL function `name`.
#[must_use]
pub fn function_id(name: &str) -> String {
    format!("{FUNCTION_PREFIX}{}", name.to_ascii_lowercase())
}

/// A plain named capability with no behavior of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMarker {
    id: String,
    name: String,
}

impl FeatureMarker {
    /// Creates a marker whose name equals its id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
        }
    }

    /// Sets a display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Feature for FeatureMarker {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Insertion-ordered feature map with unique ids.
///
/// Cloning the map copies the entries; the feature objects are shared.
#[derive(Debug, Clone, Default)]
pub struct FeatureMap {
    entries: Vec<FeatureRef>,
}

impl FeatureMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature, replacing (in place) any feature with the same id.
    ///
    /// Returns the replaced feature.
    pub fn insert(&mut self, feature: FeatureRef) -> Option<FeatureRef> {
        match self.entries.iter_mut().find(|f| f.id() == feature.id()) {
            Some(slot) => Some(std::mem::replace(slot, feature)),
            None => {
                self.entries.push(feature);
                None
            }
        }
    }

    /// Removes the feature with the given id.
    pub fn remove(&mut self, id: &str) -> Option<FeatureRef> {
        let pos = self.entries.iter().position(|f| f.id() == id)?;
        Some(self.entries.remove(pos))
    }

    /// Returns the feature with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FeatureRef> {
        self.entries.iter().find(|f| f.id() == id)
    }

    /// Iterates over features in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureRef> {
        self.entries.iter()
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A metadata object that carries features and may delegate to an owner.
pub trait FeatureProvider {
    /// Features attached directly to this object.
    fn own_features(&self) -> &FeatureMap;

    /// The next scope outwards in the ownership chain.
    fn parent_scope(&self) -> Option<&dyn FeatureProvider> {
        None
    }

    /// Finds a feature by id, nearest scope first.
    fn find_feature(&self, id: &str) -> Option<FeatureRef> {
        self.own_features()
            .get(id)
            .cloned()
            .or_else(|| self.parent_scope().and_then(|p| p.find_feature(id)))
    }

    /// Lists every feature matching `predicate`, outermost scope first.
    ///
    /// Unlike [`find_feature`](Self::find_feature), features sharing an id
    /// across scopes are all returned.
    fn find_features(&self, predicate: &dyn Fn(&dyn Feature) -> bool) -> Vec<FeatureRef> {
        let mut found = self
            .parent_scope()
            .map(|p| p.find_features(predicate))
            .unwrap_or_default();
        found.extend(
            self.own_features()
                .iter()
                .filter(|f| predicate(f.as_ref()))
                .cloned(),
        );
        found
    }

    /// Returns true if a feature with this id is visible from this scope.
    fn has_feature(&self, id: &str) -> bool {
        self.find_feature(id).is_some()
    }
}
