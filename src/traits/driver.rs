use async_trait::async_trait;

use crate::context::QueryContext;
use crate::error::Result;
use crate::traits::Row;
use crate::types::SqlValue;

/// Executor capability: anything that can run SQL with positional arguments.
///
/// Implemented by drivers, connections and transactions alike. Every call
/// receives the caller's [`QueryContext`] untouched; honoring cancellation
/// and deadlines is the implementation's job.
#[async_trait]
pub trait Queryable: Send + Sync {
    /// Run a query and return a cursor over its rows.
    async fn query(
        &self,
        ctx: &QueryContext,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Box<dyn RowCursor>>;

    /// Run a query and return its first row.
    /// Returns [`SqlScanError::NoRows`](crate::SqlScanError::NoRows) when nothing matched.
    async fn query_row(
        &self,
        ctx: &QueryContext,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Box<dyn Row>>;

    /// Run a statement that produces no rows (INSERT, UPDATE, DDL, ...).
    async fn exec(
        &self,
        ctx: &QueryContext,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Box<dyn ExecResult>>;
}

/// One-shot, forward-only stream of rows.
#[async_trait]
pub trait RowCursor: Send {
    /// Advance to the next row. Returns `Ok(false)` once the rows are exhausted.
    async fn next(&mut self) -> Result<bool>;

    /// The row the cursor is positioned on.
    /// Only meaningful after `next` returned `Ok(true)`.
    fn row(&self) -> &dyn Row;

    /// Release the cursor's resources. Further calls to `next` fail.
    fn close(&mut self) -> Result<()>;
}

/// Metadata of an executed statement.
/// Each extraction fails independently when the driver cannot provide it.
pub trait ExecResult: Send + Sync {
    fn last_insert_id(&self) -> Result<i64>;

    fn rows_affected(&self) -> Result<u64>;
}
