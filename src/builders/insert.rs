use crate::builders::SqlWriter;
use crate::error::{Result, SqlScanError};
use crate::traits::{Column, ColumnRef, StatementSource, Table};
use crate::types::{RenderedStatement, SqlValue};

/// Entry point for building an INSERT statement.
#[derive(Debug)]
pub struct Insert {
    table: String,
}

impl Insert {
    pub fn into<T: Table>(_table: T) -> Self {
        Self {
            table: T::qualified_name(),
        }
    }

    /// Specify the columns to insert into.
    pub fn columns(self, cols: &[&dyn Column]) -> InsertWithColumns {
        InsertWithColumns {
            table: self.table,
            columns: cols.iter().map(|c| ColumnRef::from_column(*c)).collect(),
            rows: Vec::new(),
            returning: Vec::new(),
            prepared: true,
        }
    }
}

/// INSERT builder after columns have been specified.
/// Add at least one row with `.values()`.
#[derive(Debug, Clone)]
pub struct InsertWithColumns {
    table: String,
    columns: Vec<ColumnRef>,
    rows: Vec<Vec<SqlValue>>,
    returning: Vec<ColumnRef>,
    prepared: bool,
}

impl InsertWithColumns {
    /// Add one row of values, in column order.
    pub fn values(mut self, row: Vec<SqlValue>) -> Self {
        self.rows.push(row);
        self
    }

    /// Add a RETURNING list.
    pub fn returning(mut self, cols: &[&dyn Column]) -> Self {
        self.returning = cols.iter().map(|c| ColumnRef::from_column(*c)).collect();
        self
    }
}

impl StatementSource for InsertWithColumns {
    fn prepared(&self, prepared: bool) -> Self {
        Self {
            prepared,
            ..self.clone()
        }
    }

    fn to_sql(&self) -> Result<RenderedStatement> {
        if self.rows.is_empty() {
            return Err(SqlScanError::RenderFailed(format!(
                "INSERT into {} has no rows",
                self.table
            )));
        }
        if let Some(row) = self.rows.iter().find(|r| r.len() != self.columns.len()) {
            return Err(SqlScanError::RenderFailed(format!(
                "INSERT into {} has {} column(s) but a row with {} value(s)",
                self.table,
                self.columns.len(),
                row.len()
            )));
        }

        let mut w = SqlWriter::new(self.prepared);
        w.push("INSERT INTO ");
        w.push(&self.table);
        w.push(" (");
        w.push_list(&self.columns, |w, col| w.push(&col.column));
        w.push(") VALUES ");
        w.push_list(&self.rows, |w, row| {
            w.push("(");
            w.push_list(row, |w, v| w.push_value(v));
            w.push(")");
        });

        if !self.returning.is_empty() {
            w.push(" RETURNING ");
            w.push_list(&self.returning, |w, col| w.push(&col.column));
        }

        Ok(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::test_schema::Users;

    #[test]
    fn test_build_insert() {
        let stmt = Insert::into(Users)
            .columns(&[&Users::columns().id, &Users::columns().name])
            .values(vec![SqlValue::Int64(1), SqlValue::from("Alice")])
            .values(vec![SqlValue::Int64(2), SqlValue::from("Bob")])
            .to_sql()
            .unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO users (id, name) VALUES ($1, $2), ($3, $4)"
        );
        assert_eq!(stmt.args.len(), 4);
        assert_eq!(stmt.args[3], SqlValue::from("Bob"));
    }

    #[test]
    fn test_build_insert_returning_inlined() {
        let stmt = Insert::into(Users)
            .columns(&[&Users::columns().name])
            .values(vec![SqlValue::from("Alice")])
            .returning(&[&Users::columns().id])
            .prepared(false)
            .to_sql()
            .unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO users (name) VALUES ('Alice') RETURNING id"
        );
        assert!(stmt.args.is_empty());
    }

    #[test]
    fn test_insert_row_length_mismatch_fails() {
        let err = Insert::into(Users)
            .columns(&[&Users::columns().id, &Users::columns().name])
            .values(vec![SqlValue::Int64(1)])
            .to_sql()
            .unwrap_err();
        assert!(matches!(err, SqlScanError::RenderFailed(_)));
    }

    #[test]
    fn test_insert_without_rows_fails() {
        let err = Insert::into(Users)
            .columns(&[&Users::columns().id])
            .to_sql()
            .unwrap_err();
        assert!(matches!(err, SqlScanError::RenderFailed(_)));
    }
}
