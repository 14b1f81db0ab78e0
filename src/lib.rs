//! sqlscan - Run statement builders against any SQL executor and scan the
//! rows into typed values.
//!
//! # Example
//! ```ignore
//! use sqlscan::{Querier, QuerierConfig, QueryContext, Row, Select, WhereClause};
//! use sqlscan::drivers::TokioPostgresDriver;
//!
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! fn scan_user(row: &dyn Row) -> sqlscan::Result<User> {
//!     let mut user = User { id: 0, name: String::new() };
//!     row.scan(&mut [&mut user.id, &mut user.name])?;
//!     Ok(user)
//! }
//!
//! let db = TokioPostgresDriver::connect("postgres://localhost/mydb").await?;
//! let querier = Querier::new(QuerierConfig::from_env());
//! let ctx = QueryContext::new();
//!
//! let users = querier
//!     .select_all(
//!         &ctx,
//!         &db,
//!         scan_user,
//!         &Select::new()
//!             .columns(&[&Users::columns().id, &Users::columns().name])
//!             .from(Users)
//!             .where_(WhereClause::eq(&Users::columns().name, "John")),
//!     )
//!     .await?;
//! ```

pub mod builders;
pub mod clauses;
pub mod config;
pub mod context;
pub mod drivers;
pub mod error;
pub mod querier;
pub mod traits;
pub mod types;

mod scan;

// Re-export main types for convenient access
pub use builders::{Delete, Insert, RawStatement, Select, Update};
pub use clauses::WhereClause;
pub use config::QuerierConfig;
pub use context::QueryContext;
pub use error::{ErrorKind, Result, SqlScanError};
pub use querier::Querier;
pub use traits::{
    Column, ColumnRef, ExecResult, FromRow, Queryable, Row, RowCursor, ScanTarget,
    StatementSource, Table,
};
pub use types::{ExecOutcome, FromSqlValue, RawQueryResult, RenderedStatement, SqlValue, ValueRow};
