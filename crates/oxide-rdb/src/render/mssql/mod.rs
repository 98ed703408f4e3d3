//! SQL Server renderers.
//!
//! INSERT and UPDATE are inherited from the generic registry.

mod ddl;
mod delete;
mod select;

use std::sync::Arc;

pub use ddl::MssqlDdl;
pub use delete::MssqlDeleteRenderer;
pub use select::MssqlSelectRenderer;

use super::generic::{AlterTableRenderer, CreateTableRenderer};
use super::RendererRegistry;
use crate::error::Result;

/// The SQL Server renderer registry.
///
/// # Errors
///
/// Never fails in practice; the error is the builder's completeness check.
pub fn registry() -> Result<RendererRegistry> {
    RendererRegistry::builder("mssql")
        .with_generic_defaults()
        .register(Arc::new(CreateTableRenderer::new(MssqlDdl)))
        .register(Arc::new(AlterTableRenderer::new(MssqlDdl)))
        .register(Arc::new(MssqlSelectRenderer))
        .register(Arc::new(MssqlDeleteRenderer))
        .build()
}
