//! MySQL renderers.
//!
//! Only DDL differs from the generic registry; `LIMIT ? OFFSET ?` paging is
//! already MySQL syntax.

mod ddl;

use std::sync::Arc;

pub use ddl::MysqlDdl;

use super::generic::{AlterTableRenderer, CreateTableRenderer};
use super::RendererRegistry;
use crate::error::Result;

/// The MySQL renderer registry.
///
/// # Errors
///
/// Never fails in practice; the error is the builder's completeness check.
pub fn registry() -> Result<RendererRegistry> {
    RendererRegistry::builder("mysql")
        .with_generic_defaults()
        .register(Arc::new(CreateTableRenderer::new(MysqlDdl)))
        .register(Arc::new(AlterTableRenderer::new(MysqlDdl)))
        .build()
}
