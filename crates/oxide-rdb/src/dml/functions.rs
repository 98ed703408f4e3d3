//! SQL function features.
//!
//! A function column such as `count(id)` renders through the feature with id
//! `function:count` found on the column's ownership chain. Databases register
//! the built-in set for their dialect; tables and columns can shadow them.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{RenderError, Result};
use crate::fragment::SqlFragment;
use crate::metadata::{function_id, Feature, FeatureRef};
use crate::value::SqlValue;

/// A feature that renders a SQL function call around a column expression.
pub trait SqlFunction: Feature {
    /// Logical function name, as used by function columns.
    fn function_name(&self) -> &str;

    /// Applies the function to `target`, honoring the column's options.
    ///
    /// # Errors
    ///
    /// Fails if a required option is missing.
    fn apply(&self, target: SqlFragment, opts: &BTreeMap<String, SqlValue>)
        -> Result<SqlFragment>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `NAME([DISTINCT ]x)`, with the `distinct` option.
    Aggregate,
    /// `NAME(x)`.
    Scalar,
    /// `NAME(x, ?)`, binding the `default` option.
    WithDefault,
}

/// A built-in function mapped to the SQL name a dialect spells it with.
#[derive(Debug, Clone)]
pub struct NativeFunction {
    id: String,
    name: String,
    sql_name: String,
    shape: Shape,
}

impl NativeFunction {
    fn new(name: &str, sql_name: &str, shape: Shape) -> Self {
        Self {
            id: function_id(name),
            name: name.to_string(),
            sql_name: sql_name.to_string(),
            shape,
        }
    }

    /// An aggregate function; honors the `distinct` option.
    #[must_use]
    pub fn aggregate(name: &str, sql_name: &str) -> Self {
        Self::new(name, sql_name, Shape::Aggregate)
    }

    /// A single-argument scalar function.
    #[must_use]
    pub fn scalar(name: &str, sql_name: &str) -> Self {
        Self::new(name, sql_name, Shape::Scalar)
    }

    /// A function taking the column and a bound fallback, from the `default` option.
    #[must_use]
    pub fn with_default(name: &str, sql_name: &str) -> Self {
        Self::new(name, sql_name, Shape::WithDefault)
    }

    /// SQL spelling of the function.
    #[must_use]
    pub fn sql_name(&self) -> &str {
        &self.sql_name
    }
}

impl Feature for NativeFunction {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_function(&self) -> Option<&dyn SqlFunction> {
        Some(self)
    }
}

impl SqlFunction for NativeFunction {
    fn function_name(&self) -> &str {
        &self.name
    }

    fn apply(
        &self,
        target: SqlFragment,
        opts: &BTreeMap<String, SqlValue>,
    ) -> Result<SqlFragment> {
        match self.shape {
            Shape::Aggregate => {
                let distinct = opts.get("distinct").is_some_and(SqlValue::is_truthy);
                if distinct {
                    let mut inner = SqlFragment::raw("DISTINCT ");
                    inner.append(target);
                    Ok(inner.call(&self.sql_name))
                } else {
                    Ok(target.call(&self.sql_name))
                }
            }
            Shape::Scalar => Ok(target.call(&self.sql_name)),
            Shape::WithDefault => {
                let default = opts.get("default").ok_or_else(|| {
                    RenderError::InvalidRequest(format!(
                        "function '{}' requires a 'default' option",
                        self.name
                    ))
                })?;
                let mut args = target;
                args.push_sql(", ").push_value(default.clone());
                Ok(args.call(&self.sql_name))
            }
        }
    }
}

/// The built-in function features of a dialect.
#[must_use]
pub fn builtin(dialect_name: &str) -> Vec<FeatureRef> {
    let length = if dialect_name == "mssql" { "LEN" } else { "LENGTH" };
    vec![
        Arc::new(NativeFunction::aggregate("count", "COUNT")),
        Arc::new(NativeFunction::aggregate("sum", "SUM")),
        Arc::new(NativeFunction::aggregate("avg", "AVG")),
        Arc::new(NativeFunction::aggregate("min", "MIN")),
        Arc::new(NativeFunction::aggregate("max", "MAX")),
        Arc::new(NativeFunction::scalar("lower", "LOWER")),
        Arc::new(NativeFunction::scalar("upper", "UPPER")),
        Arc::new(NativeFunction::scalar("length", length)),
        Arc::new(NativeFunction::with_default("coalesce", "COALESCE")),
    ]
}
