#![allow(dead_code)]

use sqlscan::error::{Result, SqlScanError};
use sqlscan::traits::{Column, Row, StatementSource, Table};
use sqlscan::types::RenderedStatement;

// Test table and columns
pub struct Users;
pub struct UsersColumns {
    pub id: UsersId,
    pub name: UsersName,
}
pub struct UsersId;
pub struct UsersName;

impl Table for Users {
    type Columns = UsersColumns;
    fn table_name() -> &'static str {
        "users"
    }
    fn columns() -> Self::Columns {
        UsersColumns {
            id: UsersId,
            name: UsersName,
        }
    }
}

impl Column for UsersId {
    fn column_name(&self) -> &'static str {
        "id"
    }
    fn table_name(&self) -> &'static str {
        "users"
    }
}

impl Column for UsersName {
    fn column_name(&self) -> &'static str {
        "name"
    }
    fn table_name(&self) -> &'static str {
        "users"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
}

pub fn scan_user(row: &dyn Row) -> Result<User> {
    let mut id = 0i64;
    let mut name = String::new();
    row.scan(&mut [&mut id, &mut name])?;
    Ok(User { id, name })
}

/// A statement source whose rendering always fails.
#[derive(Debug, Clone)]
pub struct BrokenStatement(pub &'static str);

impl StatementSource for BrokenStatement {
    fn prepared(&self, _prepared: bool) -> Self {
        self.clone()
    }

    fn to_sql(&self) -> Result<RenderedStatement> {
        Err(SqlScanError::RenderFailed(self.0.to_string()))
    }
}
