mod exec_outcome;
mod rendered;
mod row;
mod sql_value;

pub use exec_outcome::ExecOutcome;
pub use rendered::RenderedStatement;
pub use row::{RawQueryResult, ValueRow};
pub use sql_value::{FromSqlValue, SqlValue};
