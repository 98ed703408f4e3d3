//! Predicate trees for WHERE clauses.
//!
//! Terms are built against column names and rendered against a table, so the
//! same term can be reused across SELECT, UPDATE and DELETE requests.

use super::column::FunctionColumn;
use crate::error::{RenderError, Result};
use crate::fragment::SqlFragment;
use crate::metadata::TableRef;
use crate::value::{SqlValue, ToSqlValue};

/// Starts a term on a column.
#[must_use]
pub fn term(column: &str) -> TermBuilder {
    TermBuilder {
        column: FunctionColumn::new(column),
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
}

impl CompareOp {
    /// Returns the SQL operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

/// A predicate over the columns of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// `column op ?`
    Compare {
        column: FunctionColumn,
        op: CompareOp,
        value: SqlValue,
    },
    /// `column [NOT] IN (?, ...)`
    In {
        column: FunctionColumn,
        values: Vec<SqlValue>,
        negated: bool,
    },
    /// `column [NOT] BETWEEN ? AND ?`
    Between {
        column: FunctionColumn,
        low: SqlValue,
        high: SqlValue,
        negated: bool,
    },
    /// `column [NOT] LIKE ?`
    Like {
        column: FunctionColumn,
        pattern: SqlValue,
        negated: bool,
    },
    /// `column IS [NOT] NULL`
    IsNull {
        column: FunctionColumn,
        negated: bool,
    },
    /// Conjunction.
    And(Vec<Term>),
    /// Disjunction.
    Or(Vec<Term>),
    /// Negation.
    Not(Box<Term>),
}

impl Term {
    /// Combines with AND, flattening nested conjunctions.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut terms) => {
                terms.push(other);
                Self::And(terms)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Combines with OR, flattening nested disjunctions.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut terms) => {
                terms.push(other);
                Self::Or(terms)
            }
            first => Self::Or(vec![first, other]),
        }
    }

    /// Negates the term.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    const fn is_composite(&self) -> bool {
        matches!(self, Self::And(_) | Self::Or(_))
    }

    /// Renders the term against `table`; columns render as full names.
    ///
    /// # Errors
    ///
    /// Fails on unknown columns or functions, empty IN lists and empty
    /// AND/OR groups.
    pub fn render(&self, table: TableRef<'_>) -> Result<SqlFragment> {
        match self {
            Self::Compare { column, op, value } => {
                let mut sql = column.render(table)?;
                sql.push_sql(" ").push_sql(op.as_str()).push_sql(" ");
                sql.push_value(value.clone());
                Ok(sql)
            }
            Self::In {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    return Err(RenderError::InvalidRequest(format!(
                        "empty IN list for column '{}'",
                        column.column
                    )));
                }
                let mut sql = column.render(table)?;
                sql.push_sql(if *negated { " NOT IN " } else { " IN " });
                let list = SqlFragment::join(values.iter().cloned().map(SqlFragment::value), ", ");
                sql.append(list.paren());
                Ok(sql)
            }
            Self::Between {
                column,
                low,
                high,
                negated,
            } => {
                let mut sql = column.render(table)?;
                sql.push_sql(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                sql.push_value(low.clone())
                    .push_sql(" AND ")
                    .push_value(high.clone());
                Ok(sql)
            }
            Self::Like {
                column,
                pattern,
                negated,
            } => {
                let mut sql = column.render(table)?;
                sql.push_sql(if *negated { " NOT LIKE " } else { " LIKE " });
                sql.push_value(pattern.clone());
                Ok(sql)
            }
            Self::IsNull { column, negated } => {
                let mut sql = column.render(table)?;
                sql.push_sql(if *negated { " IS NOT NULL" } else { " IS NULL" });
                Ok(sql)
            }
            Self::And(terms) => Self::render_group(terms, " AND ", table),
            Self::Or(terms) => Self::render_group(terms, " OR ", table),
            Self::Not(inner) => {
                let mut sql = SqlFragment::raw("NOT ");
                sql.append(inner.render(table)?.paren());
                Ok(sql)
            }
        }
    }

    fn render_group(terms: &[Self], separator: &str, table: TableRef<'_>) -> Result<SqlFragment> {
        if terms.is_empty() {
            return Err(RenderError::InvalidRequest(format!(
                "empty{separator}group"
            )));
        }
        let parts = terms
            .iter()
            .map(|term| {
                let sql = term.render(table)?;
                Ok(if term.is_composite() { sql.paren() } else { sql })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SqlFragment::join(parts, separator))
    }
}

/// Builds a [`Term`] on one column.
#[derive(Debug, Clone)]
pub struct TermBuilder {
    column: FunctionColumn,
}

impl TermBuilder {
    /// Applies a function to the column before comparing.
    #[must_use]
    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.column.function = Some(function.into());
        self
    }

    fn compare<T: ToSqlValue>(self, op: CompareOp, value: T) -> Term {
        Term::Compare {
            column: self.column,
            op,
            value: value.to_sql_value(),
        }
    }

    /// Creates an equality term.
    #[must_use]
    pub fn eq<T: ToSqlValue>(self, value: T) -> Term {
        self.compare(CompareOp::Eq, value)
    }

    /// Creates an inequality term.
    #[must_use]
    pub fn not_eq<T: ToSqlValue>(self, value: T) -> Term {
        self.compare(CompareOp::NotEq, value)
    }

    /// Creates a less-than term.
    #[must_use]
    pub fn lt<T: ToSqlValue>(self, value: T) -> Term {
        self.compare(CompareOp::Lt, value)
    }

    /// Creates a less-than-or-equal term.
    #[must_use]
    pub fn lt_eq<T: ToSqlValue>(self, value: T) -> Term {
        self.compare(CompareOp::LtEq, value)
    }

    /// Creates a greater-than term.
    #[must_use]
    pub fn gt<T: ToSqlValue>(self, value: T) -> Term {
        self.compare(CompareOp::Gt, value)
    }

    /// Creates a greater-than-or-equal term.
    #[must_use]
    pub fn gt_eq<T: ToSqlValue>(self, value: T) -> Term {
        self.compare(CompareOp::GtEq, value)
    }

    /// Creates an IN term.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: Vec<T>) -> Term {
        Term::In {
            column: self.column,
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
            negated: false,
        }
    }

    /// Creates a NOT IN term.
    #[must_use]
    pub fn not_in_list<T: ToSqlValue>(self, values: Vec<T>) -> Term {
        Term::In {
            column: self.column,
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
            negated: true,
        }
    }

    /// Creates a BETWEEN term.
    #[must_use]
    pub fn between<T: ToSqlValue, U: ToSqlValue>(self, low: T, high: U) -> Term {
        Term::Between {
            column: self.column,
            low: low.to_sql_value(),
            high: high.to_sql_value(),
            negated: false,
        }
    }

    /// Creates a NOT BETWEEN term.
    #[must_use]
    pub fn not_between<T: ToSqlValue, U: ToSqlValue>(self, low: T, high: U) -> Term {
        Term::Between {
            column: self.column,
            low: low.to_sql_value(),
            high: high.to_sql_value(),
            negated: true,
        }
    }

    /// Creates a LIKE term.
    #[must_use]
    pub fn like<T: ToSqlValue>(self, pattern: T) -> Term {
        Term::Like {
            column: self.column,
            pattern: pattern.to_sql_value(),
            negated: false,
        }
    }

    /// Creates a NOT LIKE term.
    #[must_use]
    pub fn not_like<T: ToSqlValue>(self, pattern: T) -> Term {
        Term::Like {
            column: self.column,
            pattern: pattern.to_sql_value(),
            negated: true,
        }
    }

    /// Creates an IS NULL term.
    #[must_use]
    pub fn is_null(self) -> Term {
        Term::IsNull {
            column: self.column,
            negated: false,
        }
    }

    /// Creates an IS NOT NULL term.
    #[must_use]
    pub fn is_not_null(self) -> Term {
        Term::IsNull {
            column: self.column,
            negated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{ColumnMetadata, DatabaseMetadata, SqlType, TableMetadata};

    fn database() -> DatabaseMetadata {
        let mut db = DatabaseMetadata::for_dialect("app", "mssql").unwrap();
        let mut users = TableMetadata::new("users", db.dialect().clone());
        for (name, ty) in [
            ("id", SqlType::Integer),
            ("name", SqlType::NVarchar),
            ("age", SqlType::Integer),
        ] {
            users
                .add_column(ColumnMetadata::new(name).with_sql_type(ty))
                .unwrap();
        }
        db.add_table(users).unwrap();
        db
    }

    #[test]
    fn test_comparison() {
        let db = database();
        let users = db.require_table("users").unwrap();
        let (sql, params) = term("id").eq(7).render(users).unwrap().build();
        assert_eq!(sql, "users.[id] = ?");
        assert_eq!(params, vec![SqlValue::Int(7)]);
    }

    #[test]
    fn test_nested_groups_are_parenthesized() {
        let db = database();
        let users = db.require_table("users").unwrap();
        let filter = term("age")
            .gt_eq(18)
            .and(term("name").like("A%").or(term("name").is_null()));
        let (sql, params) = filter.render(users).unwrap().build();
        assert_eq!(
            sql,
            "users.[age] >= ? AND (users.[name] LIKE ? OR users.[name] IS NULL)"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_in_between_not() {
        let db = database();
        let users = db.require_table("users").unwrap();
        let filter = term("id")
            .in_list(vec![1, 2, 3])
            .and(term("age").between(20, 30).not());
        let (sql, params) = filter.render(users).unwrap().build();
        assert_eq!(
            sql,
            "users.[id] IN (?, ?, ?) AND NOT (users.[age] BETWEEN ? AND ?)"
        );
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn test_function_term() {
        let db = database();
        let users = db.require_table("users").unwrap();
        let (sql, _) = term("name")
            .function("lower")
            .eq("bob")
            .render(users)
            .unwrap()
            .build();
        assert_eq!(sql, "LOWER(users.[name]) = ?");
    }

    #[test]
    fn test_unknown_column_and_empty_in() {
        let db = database();
        let users = db.require_table("users").unwrap();
        assert!(matches!(
            term("email").eq("x").render(users),
            Err(RenderError::UnknownColumn { column, .. }) if column == "email"
        ));
        assert!(matches!(
            term("id").in_list(Vec::<i64>::new()).render(users),
            Err(RenderError::InvalidRequest(_))
        ));
    }
}
