use crate::builders::SqlWriter;
use crate::error::{Result, SqlScanError};
use crate::traits::{Column, ColumnRef};
use crate::types::SqlValue;

/// Comparison operator of a [`WhereClause::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
}

impl CompareOp {
    fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
        }
    }
}

/// Represents a WHERE clause condition.
#[derive(Debug, Clone)]
pub enum WhereClause {
    /// column <op> value
    Compare(ColumnRef, CompareOp, SqlValue),
    /// column IS NULL
    IsNull(ColumnRef),
    /// column IN (values...)
    In(ColumnRef, Vec<SqlValue>),
    /// clause AND clause
    And(Box<WhereClause>, Box<WhereClause>),
    /// clause OR clause
    Or(Box<WhereClause>, Box<WhereClause>),
}

impl WhereClause {
    pub fn eq<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    pub fn ne<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        Self::compare(column, CompareOp::Ne, value)
    }

    pub fn lt<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        Self::compare(column, CompareOp::Lt, value)
    }

    pub fn gt<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        Self::compare(column, CompareOp::Gt, value)
    }

    fn compare<C: Column, V: Into<SqlValue>>(column: &C, op: CompareOp, value: V) -> Self {
        WhereClause::Compare(ColumnRef::from_column(column), op, value.into())
    }

    pub fn is_null<C: Column>(column: &C) -> Self {
        WhereClause::IsNull(ColumnRef::from_column(column))
    }

    /// column IN (values...). An empty list fails at render time.
    pub fn in_list<C, I, V>(column: &C, values: I) -> Self
    where
        C: Column,
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        WhereClause::In(
            ColumnRef::from_column(column),
            values.into_iter().map(Into::into).collect(),
        )
    }

    /// Combines this clause with another using AND
    pub fn and(self, other: WhereClause) -> Self {
        WhereClause::And(Box::new(self), Box::new(other))
    }

    /// Combines this clause with another using OR
    pub fn or(self, other: WhereClause) -> Self {
        WhereClause::Or(Box::new(self), Box::new(other))
    }

    /// Writes the condition, numbering placeholders after those already in `w`.
    pub(crate) fn write_sql(&self, w: &mut SqlWriter) -> Result<()> {
        match self {
            WhereClause::Compare(col, op, value) => {
                w.push(&col.qualified_name());
                w.push(" ");
                w.push(op.as_sql());
                w.push(" ");
                w.push_value(value);
            }
            WhereClause::IsNull(col) => {
                w.push(&col.qualified_name());
                w.push(" IS NULL");
            }
            WhereClause::In(col, values) => {
                if values.is_empty() {
                    return Err(SqlScanError::RenderFailed(format!(
                        "empty IN list for {}",
                        col.qualified_name()
                    )));
                }
                w.push(&col.qualified_name());
                w.push(" IN (");
                w.push_list(values, |w, v| w.push_value(v));
                w.push(")");
            }
            WhereClause::And(left, right) => write_binary(w, left, "AND", right)?,
            WhereClause::Or(left, right) => write_binary(w, left, "OR", right)?,
        }
        Ok(())
    }
}

fn write_binary(w: &mut SqlWriter, left: &WhereClause, op: &str, right: &WhereClause) -> Result<()> {
    w.push("(");
    left.write_sql(w)?;
    w.push(") ");
    w.push(op);
    w.push(" (");
    right.write_sql(w)?;
    w.push(")");
    Ok(())
}
