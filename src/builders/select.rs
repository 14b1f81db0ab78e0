use crate::builders::SqlWriter;
use crate::clauses::WhereClause;
use crate::error::{Result, SqlScanError};
use crate::traits::{Column, ColumnRef, StatementSource, Table};
use crate::types::RenderedStatement;

/// Entry point for building a SELECT statement.
/// Must call `.columns()` to proceed.
#[derive(Debug, Default)]
pub struct Select;

impl Select {
    pub fn new() -> Self {
        Self
    }

    /// Specify the columns to select.
    pub fn columns(self, cols: &[&dyn Column]) -> SelectWithColumns {
        SelectWithColumns {
            columns: cols.iter().map(|c| ColumnRef::from_column(*c)).collect(),
        }
    }
}

/// SELECT builder after columns have been specified.
/// Must call `.from()` to proceed.
#[derive(Debug)]
pub struct SelectWithColumns {
    columns: Vec<ColumnRef>,
}

impl SelectWithColumns {
    /// Specify the table to select from.
    pub fn from<T: Table>(self, _table: T) -> SelectWithTable {
        SelectWithTable {
            columns: self.columns,
            table: T::qualified_name(),
            where_clause: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
            prepared: true,
        }
    }
}

/// A complete SELECT statement.
/// Can optionally add WHERE, ORDER BY, LIMIT and OFFSET.
#[derive(Debug, Clone)]
pub struct SelectWithTable {
    columns: Vec<ColumnRef>,
    table: String,
    where_clause: Option<WhereClause>,
    order_by: Vec<(ColumnRef, bool)>,
    limit: Option<u64>,
    offset: Option<u64>,
    prepared: bool,
}

impl SelectWithTable {
    /// Add a WHERE clause to the query.
    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }

    /// Append an ORDER BY term.
    pub fn order_by<C: Column>(mut self, column: &C, ascending: bool) -> Self {
        self.order_by.push((ColumnRef::from_column(column), ascending));
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

impl StatementSource for SelectWithTable {
    fn prepared(&self, prepared: bool) -> Self {
        Self {
            prepared,
            ..self.clone()
        }
    }

    fn to_sql(&self) -> Result<RenderedStatement> {
        if self.columns.is_empty() {
            return Err(SqlScanError::RenderFailed(format!(
                "SELECT from {} has no columns",
                self.table
            )));
        }

        let mut w = SqlWriter::new(self.prepared);
        w.push("SELECT ");
        w.push_list(&self.columns, |w, col| w.push(&col.qualified_name()));
        w.push(" FROM ");
        w.push(&self.table);

        if let Some(ref where_clause) = self.where_clause {
            w.push(" WHERE ");
            where_clause.write_sql(&mut w)?;
        }

        if !self.order_by.is_empty() {
            w.push(" ORDER BY ");
            w.push_list(&self.order_by, |w, (col, ascending)| {
                w.push(&col.qualified_name());
                w.push(if *ascending { " ASC" } else { " DESC" });
            });
        }

        // LIMIT/OFFSET are rendered inline in both modes
        if let Some(limit) = self.limit {
            w.push(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            w.push(&format!(" OFFSET {}", offset));
        }

        Ok(w.finish())
    }
}
