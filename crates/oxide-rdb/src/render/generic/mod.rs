//! Generic renderers.
//!
//! These produce ANSI-flavored SQL and are the defaults every registry starts
//! from. The DDL renderers are parameterized by a [`DdlSyntax`] so product
//! registries reuse their statement assembly.

mod alter;
mod create;
mod delete;
mod insert;
mod select;
mod update;

use std::sync::Arc;

pub use alter::AlterTableRenderer;
pub use create::CreateTableRenderer;
pub use delete::DeleteRenderer;
pub use insert::InsertRenderer;
pub use select::SelectRenderer;
pub use update::UpdateRenderer;

pub(crate) use delete::delete_filter;
pub(crate) use select::{select_body, select_orders};

use super::{GenericDdl, RendererRegistry, SqlRender};
use crate::error::Result;

/// One generic renderer per operation kind.
#[must_use]
pub fn renderers() -> Vec<Arc<dyn SqlRender>> {
    vec![
        Arc::new(CreateTableRenderer::new(GenericDdl)),
        Arc::new(AlterTableRenderer::new(GenericDdl)),
        Arc::new(SelectRenderer),
        Arc::new(InsertRenderer),
        Arc::new(UpdateRenderer),
        Arc::new(DeleteRenderer),
    ]
}

/// A registry made only of generic renderers.
///
/// # Errors
///
/// Never fails in practice; the error is the builder's completeness check.
pub fn registry(dialect: &str) -> Result<RendererRegistry> {
    RendererRegistry::builder(dialect)
        .with_generic_defaults()
        .build()
}
