use crate::builders::SqlWriter;
use crate::clauses::WhereClause;
use crate::error::Result;
use crate::traits::{StatementSource, Table};
use crate::types::RenderedStatement;

/// A DELETE statement. Without `.where_()` it deletes every row.
#[derive(Debug, Clone)]
pub struct Delete {
    table: String,
    where_clause: Option<WhereClause>,
    prepared: bool,
}

impl Delete {
    pub fn from<T: Table>(_table: T) -> Self {
        Self {
            table: T::qualified_name(),
            where_clause: None,
            prepared: true,
        }
    }

    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }
}

impl StatementSource for Delete {
    fn prepared(&self, prepared: bool) -> Self {
        Self {
            prepared,
            ..self.clone()
        }
    }

    fn to_sql(&self) -> Result<RenderedStatement> {
        let mut w = SqlWriter::new(self.prepared);
        w.push("DELETE FROM ");
        w.push(&self.table);
        if let Some(ref where_clause) = self.where_clause {
            w.push(" WHERE ");
            where_clause.write_sql(&mut w)?;
        }
        Ok(w.finish())
    }
}
