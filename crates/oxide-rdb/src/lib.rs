//! # oxide-rdb
//!
//! Relational schema metadata and dialect-aware SQL rendering.
//!
//! This crate provides:
//! - A metadata model (database → table → column) with feature inheritance
//!   along the ownership chain
//! - SQL dialects for quoting, type synthesis and qualified names
//! - A per-dialect renderer registry producing DDL (CREATE, ALTER from a
//!   column diff) and DML (SELECT, INSERT, UPDATE, DELETE) with bound
//!   parameters
//!
//! ## Rendering
//!
//! ```rust
//! use oxide_rdb::prelude::*;
//!
//! let mut db = DatabaseMetadata::for_dialect("app", "mssql")?;
//! let mut users = TableMetadata::new("users", db.dialect().clone());
//! users.add_column(
//!     ColumnMetadata::new("id")
//!         .with_sql_type(SqlType::Integer)
//!         .primary_key(),
//! )?;
//! users.add_column(
//!     ColumnMetadata::new("name")
//!         .with_sql_type(SqlType::Varchar)
//!         .with_length(64)
//!         .with_sort_index(1),
//! )?;
//! db.add_table(users)?;
//!
//! let table = db.require_table("users")?;
//! let request = SelectRequest::new()
//!     .filter(term("name").like("a%"))
//!     .paging(0, 10);
//! let rendered = db.render(OperationKind::Select, &RenderRequest::select(table, &request))?;
//!
//! assert_eq!(
//!     rendered.sql(),
//!     vec![
//!         "SELECT users.[id], users.[name] FROM [users] WHERE users.[name] LIKE ? \
//!          ORDER BY users.[id] OFFSET ? ROWS FETCH NEXT ? ROWS ONLY"
//!     ]
//! );
//! # Ok::<(), oxide_rdb::RenderError>(())
//! ```
//!
//! ## Migrations
//!
//! An ALTER request compares the deployed table with its target definition
//! and emits one statement per change:
//!
//! ```rust
//! use oxide_rdb::prelude::*;
//!
//! fn users(length: u32) -> Result<DatabaseMetadata, RenderError> {
//!     let mut db = DatabaseMetadata::for_dialect("app", "postgresql")?.with_schema("public");
//!     let mut users = TableMetadata::new("users", db.dialect().clone());
//!     users.add_column(
//!         ColumnMetadata::new("name")
//!             .with_sql_type(SqlType::Varchar)
//!             .with_length(length),
//!     )?;
//!     db.add_table(users)?;
//!     Ok(db)
//! }
//!
//! let (before, after) = (users(32)?, users(64)?);
//! let request = RenderRequest::alter_table(
//!     before.require_table("users")?,
//!     after.require_table("users")?,
//! );
//! let rendered = after.render(OperationKind::AlterTable, &request)?;
//! assert_eq!(
//!     rendered.sql(),
//!     vec!["ALTER TABLE \"public\".\"users\" ALTER COLUMN \"name\" TYPE varchar(64)"]
//! );
//! # Ok::<(), oxide_rdb::RenderError>(())
//! ```

pub mod dialect;
pub mod diff;
pub mod dml;
pub mod error;
pub mod fragment;
pub mod metadata;
pub mod render;
pub mod value;

pub use dialect::Dialect;
pub use diff::{ColumnChange, DiffWarning, TableDiff};
pub use error::{RenderError, Result};
pub use fragment::SqlFragment;
pub use metadata::{
    ColumnMetadata, ColumnRef, DatabaseMetadata, SchemaDefinition, TableMetadata, TableRef,
};
pub use render::{
    OperationKind, RenderRequest, RenderedSql, RendererRegistry, SqlRender, SqlStatement,
};
pub use value::{SqlValue, ToSqlValue};

/// Commonly used types.
pub mod prelude {
    pub use crate::diff::TableDiff;
    pub use crate::dml::{
        term, DeleteRequest, InsertColumn, InsertRequest, SelectColumn, SelectRequest, SortOrder,
        UpdateColumn, UpdateRequest,
    };
    pub use crate::error::RenderError;
    pub use crate::metadata::{
        ColumnMetadata, DatabaseMetadata, DefaultValue, FeatureProvider, SqlType, TableMetadata,
    };
    pub use crate::render::{OperationKind, RenderRequest, RenderedSql};
    pub use crate::value::{SqlValue, ToSqlValue};
}
