//! Relational metadata model.
//!
//! Metadata is owned top-down: a [`DatabaseMetadata`] holds tables, a
//! [`TableMetadata`] holds columns. Children record their owner by name; the
//! borrowed views [`TableRef`] and [`ColumnRef`] pair a child with its owner
//! so dialect lookups and feature inheritance can walk upwards.

mod column;
mod database;
mod definition;
mod feature;
mod table;
mod types;

pub use column::{features_matching, ChangeReason, ColumnMetadata, ColumnRef};
pub use database::DatabaseMetadata;
pub use definition::{SchemaDefinition, TableDefinition};
pub use feature::{
    function_id, Feature, FeatureMap, FeatureMarker, FeatureProvider, FeatureRef, FUNCTION_PREFIX,
};
pub use table::{TableMetadata, TableRef};
pub use types::{DefaultValue, ObjectKind, SqlType};
