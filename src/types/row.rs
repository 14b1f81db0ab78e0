use std::sync::Arc;

use crate::error::{Result, SqlScanError};
use crate::traits::{scan_values, Column, Row, ScanTarget};
use crate::types::{FromSqlValue, SqlValue};

/// Driver-agnostic materialized result of a query.
#[derive(Debug, Clone, Default)]
pub struct RawQueryResult {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, each holding its values in column order
    pub rows: Vec<Vec<SqlValue>>,
}

impl RawQueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Split into owned rows sharing one copy of the column names.
    pub fn into_rows(self) -> Vec<ValueRow> {
        let columns: Arc<[String]> = self.columns.into();
        self.rows
            .into_iter()
            .map(|values| ValueRow::new(Arc::clone(&columns), values))
            .collect()
    }
}

/// An owned row of values.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRow {
    columns: Arc<[String]>,
    values: Vec<SqlValue>,
}

impl ValueRow {
    pub fn new(columns: Arc<[String]>, values: Vec<SqlValue>) -> Self {
        Self { columns, values }
    }

    /// A row with no columns.
    pub fn empty() -> Self {
        Self {
            columns: Arc::from(Vec::<String>::new()),
            values: Vec::new(),
        }
    }

    /// Raw value at a column index.
    pub fn value(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// Typed value at a column index.
    pub fn get<T: FromSqlValue>(&self, index: usize) -> Result<T> {
        let value = self
            .values
            .get(index)
            .ok_or_else(|| SqlScanError::ColumnNotFound(format!("#{}", index)))?;
        T::from_sql_value(value).ok_or(SqlScanError::TypeMismatch {
            column: index,
            expected: std::any::type_name::<T>(),
            found: value.type_name(),
        })
    }

    /// Typed value looked up by column name.
    pub fn get_named<T: FromSqlValue, C: Column + ?Sized>(&self, column: &C) -> Result<T> {
        let index = self
            .columns
            .iter()
            .position(|c| c == column.column_name())
            .ok_or_else(|| SqlScanError::ColumnNotFound(column.qualified_name()))?;
        self.get(index)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Row for ValueRow {
    fn scan(&self, dest: &mut [&mut dyn ScanTarget]) -> Result<()> {
        scan_values(&self.values, dest)
    }
}
