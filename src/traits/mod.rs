mod column;
mod driver;
mod row;
mod statement;
mod table;

pub use column::{Column, ColumnRef};
pub use driver::{ExecResult, Queryable, RowCursor};
pub use row::{scan_values, FromRow, Row, ScanTarget};
pub use statement::StatementSource;
pub use table::Table;
