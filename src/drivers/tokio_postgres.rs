use std::collections::VecDeque;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio_postgres::types::{to_sql_checked, IsNull, ToSql, Type};
use tokio_postgres::{Client, NoTls};

use crate::context::QueryContext;
use crate::error::{Result, SqlScanError};
use crate::traits::{scan_values, ExecResult, Queryable, Row, RowCursor, ScanTarget};
use crate::types::{ExecOutcome, SqlValue};

/// PostgreSQL executor backed by tokio-postgres.
///
/// Statements use PostgreSQL placeholders (`$1`, `$2`, ...). PostgreSQL has
/// no last-insert id, so `exec` results only report rows affected; select
/// generated keys with `RETURNING` instead.
///
/// Columns are decoded by type: `BOOL`, `INT2`, `INT4`, `INT8`, `FLOAT4`,
/// `FLOAT8`, `TEXT`, `VARCHAR`, `BPCHAR` and `NAME`. Scanning a row that
/// holds any other column type fails with `Conversion`; cast such columns in
/// the select list (`created_at::text`, `price::float8`).
pub struct TokioPostgresDriver {
    client: Client,
}

impl TokioPostgresDriver {
    /// Connect to a PostgreSQL database.
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(|e| SqlScanError::ConnectionFailed(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "PostgreSQL connection error");
            }
        });

        Ok(Self { client })
    }

    /// Wrap a client whose connection task is driven elsewhere.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn fetch(
        &self,
        ctx: &QueryContext,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Vec<tokio_postgres::Row>> {
        let converted_params: Vec<Box<dyn ToSql + Sync + Send>> =
            args.iter().map(sql_value_to_tosql).collect();
        let refs = param_refs(&converted_params);

        ctx.run(async {
            self.client
                .query(sql, &refs)
                .await
                .map_err(|e| SqlScanError::QueryFailed(e.to_string()))
        })
        .await
    }
}

#[async_trait]
impl Queryable for TokioPostgresDriver {
    async fn query(
        &self,
        ctx: &QueryContext,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Box<dyn RowCursor>> {
        let rows = self.fetch(ctx, sql, args).await?;
        Ok(Box::new(PgRowCursor {
            rows: rows.into(),
            current: None,
            closed: false,
        }))
    }

    async fn query_row(
        &self,
        ctx: &QueryContext,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Box<dyn Row>> {
        let rows = self.fetch(ctx, sql, args).await?;
        rows.into_iter()
            .next()
            .map(|row| Box::new(PgRow(row)) as Box<dyn Row>)
            .ok_or(SqlScanError::NoRows)
    }

    async fn exec(
        &self,
        ctx: &QueryContext,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Box<dyn ExecResult>> {
        let converted_params: Vec<Box<dyn ToSql + Sync + Send>> =
            args.iter().map(sql_value_to_tosql).collect();
        let refs = param_refs(&converted_params);

        let affected = ctx
            .run(async {
                self.client
                    .execute(sql, &refs)
                    .await
                    .map_err(|e| SqlScanError::QueryFailed(e.to_string()))
            })
            .await?;
        Ok(Box::new(ExecOutcome::new().with_rows_affected(affected)))
    }
}

/// Cursor over rows already received from the server.
struct PgRowCursor {
    rows: VecDeque<tokio_postgres::Row>,
    current: Option<PgRow>,
    closed: bool,
}

#[async_trait]
impl RowCursor for PgRowCursor {
    async fn next(&mut self) -> Result<bool> {
        if self.closed {
            return Err(SqlScanError::QueryFailed("cursor is closed".to_string()));
        }
        self.current = self.rows.pop_front().map(PgRow);
        Ok(self.current.is_some())
    }

    fn row(&self) -> &dyn Row {
        match &self.current {
            Some(row) => row as &dyn Row,
            None => &NoRow,
        }
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.rows.clear();
        self.current = None;
        Ok(())
    }
}

struct PgRow(tokio_postgres::Row);

impl Row for PgRow {
    fn scan(&self, dest: &mut [&mut dyn ScanTarget]) -> Result<()> {
        let values = (0..self.0.len())
            .map(|i| row_value(&self.0, i))
            .collect::<Result<Vec<_>>>()?;
        scan_values(&values, dest)
    }
}

/// Placeholder returned by a cursor that is not positioned on a row.
struct NoRow;

impl Row for NoRow {
    fn scan(&self, dest: &mut [&mut dyn ScanTarget]) -> Result<()> {
        scan_values(&[], dest)
    }
}

/// Convert a SqlValue to a boxed ToSql trait object.
fn sql_value_to_tosql(value: &SqlValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        SqlValue::Null => Box::new(Null),
        SqlValue::Text(s) => Box::new(s.clone()),
        SqlValue::Int32(i) => Box::new(*i),
        SqlValue::Int64(i) => Box::new(*i),
        SqlValue::Float64(f) => Box::new(*f),
        SqlValue::Bool(b) => Box::new(*b),
    }
}

/// SQL NULL that binds to a parameter of any type.
#[derive(Debug)]
struct Null;

impl ToSql for Null {
    fn to_sql(
        &self,
        _ty: &Type,
        _out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        Ok(IsNull::Yes)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

fn param_refs(params: &[Box<dyn ToSql + Sync + Send>]) -> Vec<&(dyn ToSql + Sync)> {
    params
        .iter()
        .map(|b| b.as_ref() as &(dyn ToSql + Sync))
        .collect()
}

/// Column types `row_value` knows how to decode.
const SUPPORTED_TYPES: &[Type] = &[
    Type::BOOL,
    Type::INT2,
    Type::INT4,
    Type::INT8,
    Type::FLOAT4,
    Type::FLOAT8,
    Type::TEXT,
    Type::VARCHAR,
    Type::BPCHAR,
    Type::NAME,
];

fn supported_type(ty: &Type) -> bool {
    SUPPORTED_TYPES.contains(ty)
}

/// Read the value at `index` as a SqlValue, based on the column's type.
fn row_value(row: &tokio_postgres::Row, index: usize) -> Result<SqlValue> {
    let column = &row.columns()[index];
    let ty = column.type_();
    if !supported_type(ty) {
        return Err(SqlScanError::Conversion(format!(
            "column {} has unsupported type {}",
            column.name(),
            ty
        )));
    }
    let failed = |e: tokio_postgres::Error| {
        SqlScanError::Conversion(format!("column {}: {}", column.name(), e))
    };

    let value: SqlValue = if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(index).map_err(failed)?.into()
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(index)
            .map_err(failed)?
            .map(i32::from)
            .into()
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(index).map_err(failed)?.into()
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(index).map_err(failed)?.into()
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(index)
            .map_err(failed)?
            .map(f64::from)
            .into()
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(index).map_err(failed)?.into()
    } else {
        row.try_get::<_, Option<String>>(index)
            .map_err(failed)?
            .into()
    };
    Ok(value)
}
