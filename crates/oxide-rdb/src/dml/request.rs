//! Operation-specific DML requests.
//!
//! Requests name columns; renderers resolve them against the target table.
//! Column lists are deduplicated by value as they are built.

use super::column::{FunctionColumn, InsertColumn, SelectColumn, UpdateColumn};
use super::term::Term;
use crate::value::{SqlValue, ToSqlValue};

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

fn and_filter(current: Option<Term>, term: Term) -> Option<Term> {
    Some(match current {
        Some(existing) => existing.and(term),
        None => term,
    })
}

/// Sort direction of one ORDER BY item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortOrder {
    /// Sorted column.
    pub column: FunctionColumn,
    /// Whether the order is descending.
    pub descending: bool,
}

impl SortOrder {
    /// Ascending order on `column`.
    #[must_use]
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: FunctionColumn::new(column),
            descending: false,
        }
    }

    /// Descending order on `column`.
    #[must_use]
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: FunctionColumn::new(column),
            descending: true,
        }
    }
}

/// Row window of a SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Paging {
    /// Rows to skip.
    pub offset: u64,
    /// Maximum rows to return.
    pub limit: u64,
}

/// A SELECT request. No columns means every column of the table.
#[derive(Debug, Clone, Default)]
pub struct SelectRequest {
    columns: Vec<SelectColumn>,
    where_clause: Option<Term>,
    order_by: Vec<SortOrder>,
    paging: Option<Paging>,
}

impl SelectRequest {
    /// Creates a request selecting every column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a selected column.
    #[must_use]
    pub fn column(mut self, column: impl Into<SelectColumn>) -> Self {
        push_unique(&mut self.columns, column.into());
        self
    }

    /// Adds a filter, ANDed with any existing one.
    #[must_use]
    pub fn filter(mut self, term: Term) -> Self {
        self.where_clause = and_filter(self.where_clause.take(), term);
        self
    }

    /// Adds an ORDER BY item.
    #[must_use]
    pub fn order_by(mut self, order: SortOrder) -> Self {
        push_unique(&mut self.order_by, order);
        self
    }

    /// Restricts the result to a row window.
    #[must_use]
    pub fn paging(mut self, offset: u64, limit: u64) -> Self {
        self.paging = Some(Paging { offset, limit });
        self
    }

    #[must_use]
    pub fn columns(&self) -> &[SelectColumn] {
        &self.columns
    }

    #[must_use]
    pub const fn where_clause(&self) -> Option<&Term> {
        self.where_clause.as_ref()
    }

    #[must_use]
    pub fn orders(&self) -> &[SortOrder] {
        &self.order_by
    }

    #[must_use]
    pub const fn page(&self) -> Option<Paging> {
        self.paging
    }
}

/// An INSERT request: one column list and one or more value rows.
#[derive(Debug, Clone, Default)]
pub struct InsertRequest {
    columns: Vec<InsertColumn>,
    rows: Vec<Vec<SqlValue>>,
}

impl InsertRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a target column.
    #[must_use]
    pub fn column(mut self, column: InsertColumn) -> Self {
        push_unique(&mut self.columns, column);
        self
    }

    /// Adds target columns by name.
    #[must_use]
    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            push_unique(&mut self.columns, InsertColumn::of(name));
        }
        self
    }

    /// Adds a row of values, in column order.
    #[must_use]
    pub fn row<T: ToSqlValue>(mut self, values: Vec<T>) -> Self {
        self.rows
            .push(values.into_iter().map(ToSqlValue::to_sql_value).collect());
        self
    }

    #[must_use]
    pub fn insert_columns(&self) -> &[InsertColumn] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<SqlValue>] {
        &self.rows
    }
}

/// An UPDATE request.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    columns: Vec<UpdateColumn>,
    where_clause: Option<Term>,
}

impl UpdateRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    #[must_use]
    pub fn set(mut self, column: UpdateColumn) -> Self {
        push_unique(&mut self.columns, column);
        self
    }

    /// Adds a filter, ANDed with any existing one.
    #[must_use]
    pub fn filter(mut self, term: Term) -> Self {
        self.where_clause = and_filter(self.where_clause.take(), term);
        self
    }

    #[must_use]
    pub fn assignments(&self) -> &[UpdateColumn] {
        &self.columns
    }

    #[must_use]
    pub const fn where_clause(&self) -> Option<&Term> {
        self.where_clause.as_ref()
    }
}

/// A DELETE request.
#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    where_clause: Option<Term>,
    limit: Option<u64>,
}

impl DeleteRequest {
    /// Creates a request deleting every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter, ANDed with any existing one.
    #[must_use]
    pub fn filter(mut self, term: Term) -> Self {
        self.where_clause = and_filter(self.where_clause.take(), term);
        self
    }

    /// Deletes at most `limit` rows.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn where_clause(&self) -> Option<&Term> {
        self.where_clause.as_ref()
    }

    #[must_use]
    pub const fn row_limit(&self) -> Option<u64> {
        self.limit
    }
}
