//! Error types for metadata resolution and SQL rendering.

use crate::render::OperationKind;

/// Errors that can occur while resolving metadata or rendering SQL.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No dialect is known under the requested name.
    #[error("Unknown dialect '{0}'")]
    UnknownDialect(String),

    /// A dialect registry was built without a renderer for an operation kind.
    #[error("Dialect '{dialect}' has no renderer registered for {kind}")]
    MissingRenderer {
        /// Dialect whose registry is incomplete.
        dialect: String,
        /// The operation kind left unregistered.
        kind: OperationKind,
    },

    /// A renderer received a request meant for another operation kind.
    #[error("Renderer for {expected} cannot handle a {actual} request")]
    RequestMismatch {
        /// Kind the renderer handles.
        expected: OperationKind,
        /// Kind of the request it received.
        actual: OperationKind,
    },

    /// An owner-dependent column operation was invoked on a detached column.
    #[error("Column '{column}' has no owner")]
    Unowned {
        /// Column name.
        column: String,
    },

    /// A table or renderer registry belongs to another dialect.
    #[error("Dialect mismatch: expected '{expected}', found '{actual}'")]
    DialectMismatch {
        /// Dialect of the database or registry.
        expected: String,
        /// Dialect of the offending table or registry.
        actual: String,
    },

    /// A column was bound to a table that does not own it.
    #[error("Column '{column}' is owned by '{owner}', not '{requested}'")]
    OwnerMismatch {
        /// Column name.
        column: String,
        /// Recorded owner.
        owner: String,
        /// Table the caller tried to bind it to.
        requested: String,
    },

    /// A table was not found in the database metadata.
    #[error("Table '{0}' not found")]
    UnknownTable(String),

    /// A column was not found in its table.
    #[error("Column '{column}' not found in '{table}'")]
    UnknownColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// A column name is already taken in its table.
    #[error("Column '{column}' already exists in '{table}'")]
    DuplicateColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// A table name is already taken in the database.
    #[error("Table '{0}' already exists")]
    DuplicateTable(String),

    /// Neither an explicit data type nor an engine type tag is available.
    #[error(
        "Cannot derive a data type for column '{column}' under dialect '{dialect}': \
         no explicit data type and no SQL type"
    )]
    AmbiguousDataType {
        /// Dialect asked to synthesize the type.
        dialect: String,
        /// Column name.
        column: String,
    },

    /// A function column referenced a function no feature provides.
    #[error("Function '{function}' is not available for column '{column}'")]
    UnknownFunction {
        /// Function name.
        function: String,
        /// Column the function was applied to.
        column: String,
    },

    /// An UPDATE targeted a column flagged as not updatable.
    #[error("Column '{column}' of '{table}' is not updatable")]
    NotUpdatable {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// The dialect does not support the requested construct.
    #[error("Dialect '{dialect}' does not support {feature}")]
    Unsupported {
        /// Dialect name.
        dialect: String,
        /// Unsupported construct.
        feature: String,
    },

    /// A schema definition could not be parsed.
    #[error("Invalid schema definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),

    /// The request itself is malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A rendering failure, with the dialect, operation and object that triggered it.
    #[error("Failed to render {kind} for '{object}' (dialect '{dialect}'): {source}")]
    Render {
        /// Dialect name.
        dialect: String,
        /// Operation kind being rendered.
        kind: OperationKind,
        /// Table or column identifier.
        object: String,
        /// Underlying error.
        #[source]
        source: Box<RenderError>,
    },
}

impl RenderError {
    /// Wraps this error with the rendering context that triggered it.
    ///
    /// Already wrapped errors are returned unchanged.
    #[must_use]
    pub fn in_context(self, dialect: &str, kind: OperationKind, object: &str) -> Self {
        match self {
            wrapped @ Self::Render { .. } => wrapped,
            other => Self::Render {
                dialect: dialect.to_string(),
                kind,
                object: object.to_string(),
                source: Box::new(other),
            },
        }
    }
}

/// Result type for metadata and rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
