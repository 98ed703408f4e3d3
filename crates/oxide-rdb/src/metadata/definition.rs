//! Serializable schema definitions.
//!
//! A definition file describes a database as JSON:
//!
//! ```json
//! {
//!   "name": "app",
//!   "schema": "public",
//!   "tables": [
//!     {
//!       "name": "users",
//!       "comment": "Registered users",
//!       "columns": [
//!         { "name": "id", "sql_type": "integer", "primary_key": true },
//!         { "name": "name", "sql_type": "varchar", "length": 32, "sort_index": 1 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::column::ColumnMetadata;
use super::database::DatabaseMetadata;
use super::types::ObjectKind;
use crate::error::Result;

/// A database described as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Database name.
    pub name: String,
    /// Schema qualifying table names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Tables and views.
    #[serde(default)]
    pub tables: Vec<TableDefinition>,
}

/// A table or view described as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table name.
    pub name: String,
    /// Table or view.
    #[serde(default)]
    pub kind: ObjectKind,
    /// Table comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Columns in definition order.
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

impl SchemaDefinition {
    /// Parses a definition from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::InvalidDefinition`] on malformed JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Captures a database back into a definition.
    #[must_use]
    pub fn from_database(database: &DatabaseMetadata) -> Self {
        Self {
            name: database.name().to_string(),
            schema: database.schema().map(str::to_string),
            tables: database
                .tables()
                .map(|table| {
                    let table = table.metadata();
                    TableDefinition {
                        name: table.name().to_string(),
                        kind: table.kind(),
                        comment: table.comment().map(str::to_string),
                        columns: table.columns().to_vec(),
                    }
                })
                .collect(),
        }
    }
}
