//! SQL rendering.
//!
//! Each dialect owns a [`RendererRegistry`] mapping every [`OperationKind`] to
//! a [`SqlRender`] strategy. Registries start from the generic renderers and
//! override only what the product spells differently.

pub mod ddl;
pub mod generic;
pub mod mssql;
pub mod mysql;
mod registry;

use std::fmt;

pub use ddl::{DdlSyntax, GenericDdl};
pub use registry::{RendererRegistry, RendererRegistryBuilder};

use crate::dml::{DeleteRequest, InsertRequest, SelectRequest, UpdateRequest};
use crate::error::{RenderError, Result};
use crate::fragment::SqlFragment;
use crate::metadata::TableRef;
use crate::value::SqlValue;

/// The kinds of statement a registry renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    /// CREATE TABLE.
    CreateTable,
    /// ALTER TABLE, computed from a before/after pair.
    AlterTable,
    /// SELECT.
    Select,
    /// INSERT.
    Insert,
    /// UPDATE.
    Update,
    /// DELETE.
    Delete,
}

impl OperationKind {
    /// Every operation kind, in registry order.
    pub const ALL: [Self; 6] = [
        Self::CreateTable,
        Self::AlterTable,
        Self::Select,
        Self::Insert,
        Self::Update,
        Self::Delete,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Returns the SQL keyword(s) of the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateTable => "CREATE TABLE",
            Self::AlterTable => "ALTER TABLE",
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input of one rendering call.
#[derive(Debug, Clone, Copy)]
pub enum RenderRequest<'a> {
    /// Create `table`.
    CreateTable { table: TableRef<'a> },
    /// Migrate `before` into `after`.
    AlterTable {
        before: TableRef<'a>,
        after: TableRef<'a>,
    },
    /// Query `table`.
    Select {
        table: TableRef<'a>,
        request: &'a SelectRequest,
    },
    /// Insert rows into `table`.
    Insert {
        table: TableRef<'a>,
        request: &'a InsertRequest,
    },
    /// Update rows of `table`.
    Update {
        table: TableRef<'a>,
        request: &'a UpdateRequest,
    },
    /// Delete rows of `table`.
    Delete {
        table: TableRef<'a>,
        request: &'a DeleteRequest,
    },
}

impl<'a> RenderRequest<'a> {
    #[must_use]
    pub const fn create_table(table: TableRef<'a>) -> Self {
        Self::CreateTable { table }
    }

    #[must_use]
    pub const fn alter_table(before: TableRef<'a>, after: TableRef<'a>) -> Self {
        Self::AlterTable { before, after }
    }

    #[must_use]
    pub const fn select(table: TableRef<'a>, request: &'a SelectRequest) -> Self {
        Self::Select { table, request }
    }

    #[must_use]
    pub const fn insert(table: TableRef<'a>, request: &'a InsertRequest) -> Self {
        Self::Insert { table, request }
    }

    #[must_use]
    pub const fn update(table: TableRef<'a>, request: &'a UpdateRequest) -> Self {
        Self::Update { table, request }
    }

    #[must_use]
    pub const fn delete(table: TableRef<'a>, request: &'a DeleteRequest) -> Self {
        Self::Delete { table, request }
    }

    /// The operation kind this request is shaped for.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::CreateTable { .. } => OperationKind::CreateTable,
            Self::AlterTable { .. } => OperationKind::AlterTable,
            Self::Select { .. } => OperationKind::Select,
            Self::Insert { .. } => OperationKind::Insert,
            Self::Update { .. } => OperationKind::Update,
            Self::Delete { .. } => OperationKind::Delete,
        }
    }

    /// Name of the table being rendered; the target table for ALTER.
    #[must_use]
    pub fn object_name(&self) -> &'a str {
        match self {
            Self::CreateTable { table }
            | Self::Select { table, .. }
            | Self::Insert { table, .. }
            | Self::Update { table, .. }
            | Self::Delete { table, .. } => table.name(),
            Self::AlterTable { after, .. } => after.name(),
        }
    }

    /// Tables the request reads, the deployed table first for ALTER.
    #[must_use]
    pub fn tables(&self) -> Vec<TableRef<'a>> {
        match *self {
            Self::CreateTable { table }
            | Self::Select { table, .. }
            | Self::Insert { table, .. }
            | Self::Update { table, .. }
            | Self::Delete { table, .. } => vec![table],
            Self::AlterTable { before, after } => vec![before, after],
        }
    }

    /// The error a renderer for `expected` returns for this request.
    #[must_use]
    pub fn mismatch(&self, expected: OperationKind) -> RenderError {
        RenderError::RequestMismatch {
            expected,
            actual: self.kind(),
        }
    }
}

/// Strategy rendering one operation kind for one dialect.
pub trait SqlRender: Send + Sync + fmt::Debug {
    /// The operation kind this renderer handles.
    fn kind(&self) -> OperationKind;

    /// Renders the request.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RequestMismatch`] for a request of another
    /// kind, or any metadata error met while rendering.
    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedSql>;
}

/// One SQL statement with its bound parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlStatement {
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// Parameters, in placeholder order.
    pub params: Vec<SqlValue>,
}

impl SqlStatement {
    /// A statement without parameters.
    #[must_use]
    pub fn text(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: vec![],
        }
    }
}

impl From<SqlFragment> for SqlStatement {
    fn from(fragment: SqlFragment) -> Self {
        let (sql, params) = fragment.build();
        Self { sql, params }
    }
}

/// An ordered batch of statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSql {
    statements: Vec<SqlStatement>,
}

impl RenderedSql {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A batch of one statement.
    #[must_use]
    pub fn single(statement: impl Into<SqlStatement>) -> Self {
        Self {
            statements: vec![statement.into()],
        }
    }

    /// Appends a statement.
    pub fn push(&mut self, statement: impl Into<SqlStatement>) {
        self.statements.push(statement.into());
    }

    #[must_use]
    pub fn statements(&self) -> &[SqlStatement] {
        &self.statements
    }

    /// The SQL texts, in order.
    #[must_use]
    pub fn sql(&self) -> Vec<&str> {
        self.statements.iter().map(|s| s.sql.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    #[must_use]
    pub fn into_statements(self) -> Vec<SqlStatement> {
        self.statements
    }
}

impl fmt::Display for RenderedSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{};", statement.sql)?;
        }
        Ok(())
    }
}

/// Builds the renderer registry of a built-in dialect.
///
/// # Errors
///
/// Returns [`RenderError::UnknownDialect`] for names other than the canonical
/// built-in dialect names.
pub fn registry_for(dialect_name: &str) -> Result<RendererRegistry> {
    match dialect_name {
        "generic" | "postgresql" => generic::registry(dialect_name),
        "mssql" => mssql::registry(),
        "mysql" => mysql::registry(),
        other => Err(RenderError::UnknownDialect(other.to_string())),
    }
}
