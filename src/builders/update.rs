use crate::builders::SqlWriter;
use crate::clauses::WhereClause;
use crate::error::{Result, SqlScanError};
use crate::traits::{Column, ColumnRef, StatementSource, Table};
use crate::types::{RenderedStatement, SqlValue};

/// An UPDATE statement. Needs at least one `.set()`.
#[derive(Debug, Clone)]
pub struct Update {
    table: String,
    assignments: Vec<(ColumnRef, SqlValue)>,
    where_clause: Option<WhereClause>,
    prepared: bool,
}

impl Update {
    pub fn table<T: Table>(_table: T) -> Self {
        Self {
            table: T::qualified_name(),
            assignments: Vec::new(),
            where_clause: None,
            prepared: true,
        }
    }

    pub fn set<C: Column, V: Into<SqlValue>>(mut self, column: &C, value: V) -> Self {
        self.assignments
            .push((ColumnRef::from_column(column), value.into()));
        self
    }

    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }
}

impl StatementSource for Update {
    fn prepared(&self, prepared: bool) -> Self {
        Self {
            prepared,
            ..self.clone()
        }
    }

    fn to_sql(&self) -> Result<RenderedStatement> {
        if self.assignments.is_empty() {
            return Err(SqlScanError::RenderFailed(format!(
                "UPDATE of {} has no SET values",
                self.table
            )));
        }

        let mut w = SqlWriter::new(self.prepared);
        w.push("UPDATE ");
        w.push(&self.table);
        w.push(" SET ");
        w.push_list(&self.assignments, |w, (col, value)| {
            w.push(&col.column);
            w.push(" = ");
            w.push_value(value);
        });

        if let Some(ref where_clause) = self.where_clause {
            w.push(" WHERE ");
            where_clause.write_sql(&mut w)?;
        }

        Ok(w.finish())
    }
}
