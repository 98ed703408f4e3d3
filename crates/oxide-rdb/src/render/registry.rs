//! Per-dialect renderer registry.

use std::sync::Arc;

use tracing::debug;

use super::{generic, OperationKind, RenderRequest, RenderedSql, SqlRender};
use crate::error::{RenderError, Result};

const KINDS: usize = OperationKind::ALL.len();

/// Immutable map from operation kind to renderer for one dialect.
///
/// Built once by [`RendererRegistryBuilder`], which guarantees every kind has
/// a renderer; lookups therefore never fail.
#[derive(Debug)]
pub struct RendererRegistry {
    dialect: String,
    renderers: Vec<Arc<dyn SqlRender>>,
}

impl RendererRegistry {
    /// Starts building a registry for `dialect`.
    #[must_use]
    pub fn builder(dialect: impl Into<String>) -> RendererRegistryBuilder {
        RendererRegistryBuilder {
            dialect: dialect.into(),
            slots: std::array::from_fn(|_| None),
            overrides: 0,
        }
    }

    /// Name of the dialect this registry renders for.
    #[must_use]
    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    /// The renderer registered for `kind`.
    #[must_use]
    pub fn get(&self, kind: OperationKind) -> &dyn SqlRender {
        self.renderers[kind.index()].as_ref()
    }

    /// Renders `request` with the renderer for `kind`.
    ///
    /// # Errors
    ///
    /// Failures are wrapped in [`RenderError::Render`] with the dialect, the
    /// kind and the object name. A table bound to another dialect fails with
    /// [`RenderError::DialectMismatch`].
    pub fn render(&self, kind: OperationKind, request: &RenderRequest<'_>) -> Result<RenderedSql> {
        let object = request.object_name();
        let rendered = self
            .check_dialect(request)
            .and_then(|()| self.get(kind).render(request))
            .map_err(|e| e.in_context(&self.dialect, kind, object))?;
        debug!(
            dialect = %self.dialect,
            kind = %kind,
            object = %object,
            statements = rendered.len(),
            "Rendered SQL"
        );
        Ok(rendered)
    }

    fn check_dialect(&self, request: &RenderRequest<'_>) -> Result<()> {
        for table in request.tables() {
            let actual = table.dialect().name();
            if actual != self.dialect {
                return Err(RenderError::DialectMismatch {
                    expected: self.dialect.clone(),
                    actual: actual.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Builder of a [`RendererRegistry`].
#[derive(Debug)]
pub struct RendererRegistryBuilder {
    dialect: String,
    slots: [Option<Arc<dyn SqlRender>>; KINDS],
    overrides: usize,
}

impl RendererRegistryBuilder {
    /// Fills every kind with the generic renderer.
    #[must_use]
    pub fn with_generic_defaults(mut self) -> Self {
        for renderer in generic::renderers() {
            let index = renderer.kind().index();
            self.slots[index] = Some(renderer);
        }
        self
    }

    /// Registers a renderer for its kind, replacing any previous one.
    #[must_use]
    pub fn register(mut self, renderer: Arc<dyn SqlRender>) -> Self {
        let slot = &mut self.slots[renderer.kind().index()];
        if slot.is_some() {
            self.overrides += 1;
        }
        *slot = Some(renderer);
        self
    }

    /// Validates that every kind has a renderer and freezes the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingRenderer`] naming the first kind left
    /// unregistered.
    pub fn build(self) -> Result<RendererRegistry> {
        let mut renderers = Vec::with_capacity(KINDS);
        for (kind, slot) in OperationKind::ALL.into_iter().zip(self.slots) {
            let renderer = slot.ok_or_else(|| RenderError::MissingRenderer {
                dialect: self.dialect.clone(),
                kind,
            })?;
            renderers.push(renderer);
        }
        debug!(
            dialect = %self.dialect,
            overrides = self.overrides,
            "Built renderer registry"
        );
        Ok(RendererRegistry {
            dialect: self.dialect,
            renderers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SqlStatement;

    #[derive(Debug)]
    struct Fixed(OperationKind, &'static str);

    impl SqlRender for Fixed {
        fn kind(&self) -> OperationKind {
            self.0
        }

        fn render(&self, _request: &RenderRequest<'_>) -> Result<RenderedSql> {
            Ok(RenderedSql::single(SqlStatement::text(self.1)))
        }
    }

    #[test]
    fn test_missing_renderer_fails_build() {
        let err = RendererRegistry::builder("partial")
            .register(Arc::new(Fixed(OperationKind::Select, "SELECT 1")))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingRenderer { dialect, kind: OperationKind::CreateTable } if dialect == "partial"
        ));
    }

    #[test]
    fn test_override_replaces_generic() {
        let registry = RendererRegistry::builder("custom")
            .with_generic_defaults()
            .register(Arc::new(Fixed(OperationKind::Delete, "TRUNCATE")))
            .build()
            .unwrap();
        for kind in OperationKind::ALL {
            assert_eq!(registry.get(kind).kind(), kind);
        }
        assert_eq!(registry.dialect(), "custom");
    }
}
