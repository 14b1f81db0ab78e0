use tracing::debug;

use crate::config::QuerierConfig;
use crate::context::QueryContext;
use crate::error::Result;
use crate::scan::scan_rows;
use crate::traits::{ExecResult, Queryable, Row, StatementSource};
use crate::types::RenderedStatement;

/// Runs statement sources against an executor and converts the results.
///
/// A `Querier` only carries configuration. The executor is passed per call,
/// so the same querier works with a pooled driver, a single connection or a
/// transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Querier {
    config: QuerierConfig,
}

impl Querier {
    pub fn new(config: QuerierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuerierConfig {
        &self.config
    }

    /// Run a query and convert every row with `scan`.
    /// Zero rows give an empty vector; one failing row fails the whole call.
    pub async fn select_all<T, S, Q, F>(
        &self,
        ctx: &QueryContext,
        q: &Q,
        scan: F,
        ds: &S,
    ) -> Result<Vec<T>>
    where
        S: StatementSource,
        Q: Queryable + ?Sized,
        F: Fn(&dyn Row) -> Result<T>,
    {
        let stmt = self.render(ds)?;
        let cursor = q.query(ctx, &stmt.sql, &stmt.args).await?;
        scan_rows(cursor, scan).await
    }

    /// Run a single-row query and convert the row with `scan`.
    pub async fn select<T, S, Q, F>(&self, ctx: &QueryContext, q: &Q, scan: F, ds: &S) -> Result<T>
    where
        S: StatementSource,
        Q: Queryable + ?Sized,
        F: Fn(&dyn Row) -> Result<T>,
    {
        let stmt = self.render(ds)?;
        let row = q.query_row(ctx, &stmt.sql, &stmt.args).await?;
        scan(&*row)
    }

    /// Execute a statement, discarding its metadata.
    pub async fn exec<S, Q>(&self, ctx: &QueryContext, q: &Q, ds: &S) -> Result<()>
    where
        S: StatementSource,
        Q: Queryable + ?Sized,
    {
        self.exec_result(ctx, q, ds).await.map(|_| ())
    }

    /// Execute a statement and return its metadata handle.
    pub async fn exec_result<S, Q>(
        &self,
        ctx: &QueryContext,
        q: &Q,
        ds: &S,
    ) -> Result<Box<dyn ExecResult>>
    where
        S: StatementSource,
        Q: Queryable + ?Sized,
    {
        let stmt = self.render(ds)?;
        q.exec(ctx, &stmt.sql, &stmt.args).await
    }

    /// Execute a statement and return the id it generated.
    pub async fn exec_id<S, Q>(&self, ctx: &QueryContext, q: &Q, ds: &S) -> Result<i64>
    where
        S: StatementSource,
        Q: Queryable + ?Sized,
    {
        let result = self.exec_result(ctx, q, ds).await?;
        result.last_insert_id()
    }

    /// Execute a statement and return the number of rows it touched.
    pub async fn exec_rows_affected<S, Q>(&self, ctx: &QueryContext, q: &Q, ds: &S) -> Result<u64>
    where
        S: StatementSource,
        Q: Queryable + ?Sized,
    {
        let result = self.exec_result(ctx, q, ds).await?;
        result.rows_affected()
    }

    /// Render for dispatch. Always parameterized; the inlined form only
    /// ever reaches the debug log.
    fn render<S: StatementSource>(&self, ds: &S) -> Result<RenderedStatement> {
        let stmt = ds.prepared(true).to_sql()?;
        if self.config.debug {
            match ds.prepared(false).to_sql() {
                Ok(inlined) => debug!(
                    target: "sqlscan::statement",
                    sql = %inlined.sql,
                    args = stmt.args.len(),
                    "executing statement"
                ),
                Err(_) => debug!(
                    target: "sqlscan::statement",
                    sql = %stmt.sql,
                    args = stmt.args.len(),
                    "executing statement"
                ),
            }
        }
        Ok(stmt)
    }
}
