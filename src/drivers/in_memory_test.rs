use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::context::QueryContext;
use crate::error::{Result, SqlScanError};
use crate::traits::{ExecResult, Queryable, Row, RowCursor};
use crate::types::{ExecOutcome, RawQueryResult, SqlValue, ValueRow};

/// Which executor entry point a recorded call went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Query,
    QueryRow,
    Exec,
}

/// A recorded query execution for verification.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub kind: CallKind,
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// A scripted response of the in-memory driver.
#[derive(Debug, Clone)]
pub enum TestResponse {
    /// Rows to return. With `fail_after: Some((n, msg))` the cursor yields
    /// `n` rows and then fails with `QueryFailed(msg)`.
    Rows {
        result: RawQueryResult,
        fail_after: Option<(usize, String)>,
    },
    /// Metadata for `exec`.
    Exec(ExecOutcome),
    /// Fail the call itself with `QueryFailed`.
    Error(String),
}

impl TestResponse {
    pub fn exec(outcome: ExecOutcome) -> Self {
        TestResponse::Exec(outcome)
    }

    pub fn error(message: impl Into<String>) -> Self {
        TestResponse::Error(message.into())
    }
}

impl From<RawQueryResult> for TestResponse {
    fn from(result: RawQueryResult) -> Self {
        TestResponse::Rows {
            result,
            fail_after: None,
        }
    }
}

/// An in-memory executor for testing.
///
/// Responses are consumed in FIFO order by every call regardless of kind.
/// Calls are recorded, and cursors report how often they were closed.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use sqlscan::drivers::{InMemoryTestDriver, InMemoryTestResponseBuilder};
/// use sqlscan::types::SqlValue;
///
/// let driver = Arc::new(
///     InMemoryTestDriver::new().with_response(
///         InMemoryTestResponseBuilder::new()
///             .columns(&["id", "name"])
///             .row(vec![SqlValue::Int64(1), SqlValue::from("Alice")])
///             .build(),
///     ),
/// );
/// ```
pub struct InMemoryTestDriver {
    responses: Mutex<VecDeque<TestResponse>>,
    recorded_queries: Mutex<Vec<RecordedQuery>>,
    default_response: TestResponse,
    cursors_opened: AtomicUsize,
    cursor_closes: Arc<AtomicUsize>,
}

impl InMemoryTestDriver {
    /// Create a driver with no queued responses.
    /// Unscripted calls get an empty row set.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            recorded_queries: Mutex::new(Vec::new()),
            default_response: RawQueryResult::empty().into(),
            cursors_opened: AtomicUsize::new(0),
            cursor_closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue a response for the next call.
    pub fn with_response(self, response: impl Into<TestResponse>) -> Self {
        self.lock_responses().push_back(response.into());
        self
    }

    /// Queue several responses for subsequent calls.
    pub fn with_responses(self, responses: impl IntoIterator<Item = TestResponse>) -> Self {
        self.lock_responses().extend(responses);
        self
    }

    /// Response used once the queue runs dry.
    pub fn with_default_response(mut self, response: impl Into<TestResponse>) -> Self {
        self.default_response = response.into();
        self
    }

    pub fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.lock_recorded().clone()
    }

    pub fn last_query(&self) -> Option<RecordedQuery> {
        self.lock_recorded().last().cloned()
    }

    pub fn clear_recorded_queries(&self) {
        self.lock_recorded().clear();
    }

    /// Number of cursors handed out by `query`.
    pub fn cursors_opened(&self) -> usize {
        self.cursors_opened.load(Ordering::SeqCst)
    }

    /// Total number of `close` calls across all cursors, repeated closes included.
    pub fn cursor_closes(&self) -> usize {
        self.cursor_closes.load(Ordering::SeqCst)
    }

    /// Assert that the last query matches the expected SQL and parameters.
    pub fn assert_last_query(&self, expected_sql: &str, expected_params: &[SqlValue]) {
        let last = self.last_query().expect("No queries were recorded");
        assert_eq!(
            last.sql, expected_sql,
            "SQL mismatch.\nExpected: {}\nActual: {}",
            expected_sql, last.sql
        );
        assert_eq!(
            last.params, expected_params,
            "Parameters mismatch.\nExpected: {:?}\nActual: {:?}",
            expected_params, last.params
        );
    }

    /// Assert that exactly n calls reached the driver.
    pub fn assert_query_count(&self, expected: usize) {
        let actual = self.lock_recorded().len();
        assert_eq!(
            actual, expected,
            "Query count mismatch. Expected: {}, Actual: {}",
            expected, actual
        );
    }

    fn record(&self, kind: CallKind, sql: &str, params: &[SqlValue]) -> TestResponse {
        self.lock_recorded().push(RecordedQuery {
            kind,
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        self.lock_responses()
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone())
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<TestResponse>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_recorded(&self) -> std::sync::MutexGuard<'_, Vec<RecordedQuery>> {
        self.recorded_queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryTestDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Queryable for InMemoryTestDriver {
    async fn query(
        &self,
        ctx: &QueryContext,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Box<dyn RowCursor>> {
        let response = self.record(CallKind::Query, sql, args);
        ctx.check()?;
        match response {
            TestResponse::Rows { result, fail_after } => {
                self.cursors_opened.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(InMemoryCursor {
                    rows: result.into_rows().into(),
                    current: ValueRow::empty(),
                    yielded: 0,
                    fail_after,
                    closed: false,
                    closes: Arc::clone(&self.cursor_closes),
                }))
            }
            TestResponse::Exec(_) => Err(SqlScanError::QueryFailed(
                "exec response queued for a query".to_string(),
            )),
            TestResponse::Error(message) => Err(SqlScanError::QueryFailed(message)),
        }
    }

    async fn query_row(
        &self,
        ctx: &QueryContext,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Box<dyn Row>> {
        let response = self.record(CallKind::QueryRow, sql, args);
        ctx.check()?;
        match response {
            TestResponse::Rows {
                fail_after: Some((0, message)),
                ..
            } => Err(SqlScanError::QueryFailed(message)),
            TestResponse::Rows { result, .. } => result
                .into_rows()
                .into_iter()
                .next()
                .map(|row| Box::new(row) as Box<dyn Row>)
                .ok_or(SqlScanError::NoRows),
            TestResponse::Exec(_) => Err(SqlScanError::QueryFailed(
                "exec response queued for a query".to_string(),
            )),
            TestResponse::Error(message) => Err(SqlScanError::QueryFailed(message)),
        }
    }

    async fn exec(
        &self,
        ctx: &QueryContext,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Box<dyn ExecResult>> {
        let response = self.record(CallKind::Exec, sql, args);
        ctx.check()?;
        match response {
            TestResponse::Exec(outcome) => Ok(Box::new(outcome)),
            // A row set stands in for a statement that touched that many rows
            TestResponse::Rows { result, .. } => Ok(Box::new(
                ExecOutcome::new().with_rows_affected(result.rows.len() as u64),
            )),
            TestResponse::Error(message) => Err(SqlScanError::QueryFailed(message)),
        }
    }
}

struct InMemoryCursor {
    rows: VecDeque<ValueRow>,
    current: ValueRow,
    yielded: usize,
    fail_after: Option<(usize, String)>,
    closed: bool,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl RowCursor for InMemoryCursor {
    async fn next(&mut self) -> Result<bool> {
        if self.closed {
            return Err(SqlScanError::QueryFailed("cursor is closed".to_string()));
        }
        if let Some((n, message)) = &self.fail_after {
            if self.yielded == *n {
                return Err(SqlScanError::QueryFailed(message.clone()));
            }
        }
        match self.rows.pop_front() {
            Some(row) => {
                self.current = row;
                self.yielded += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn row(&self) -> &dyn Row {
        &self.current
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Builder for row-set responses.
#[derive(Debug, Default)]
pub struct InMemoryTestResponseBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
    fail_after: Option<(usize, String)>,
}

impl InMemoryTestResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column names for the response.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add a row of values.
    pub fn row(mut self, values: Vec<SqlValue>) -> Self {
        self.rows.push(values);
        self
    }

    /// Make the cursor fail after yielding `n` rows.
    pub fn fail_after(mut self, n: usize, message: impl Into<String>) -> Self {
        self.fail_after = Some((n, message.into()));
        self
    }

    pub fn build(self) -> TestResponse {
        TestResponse::Rows {
            result: RawQueryResult::new(self.columns, self.rows),
            fail_after: self.fail_after,
        }
    }
}
