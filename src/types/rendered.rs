use crate::types::SqlValue;

/// SQL text paired with its ordered arguments.
/// The argument list matches the placeholders in `sql` one to one.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStatement {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

impl RenderedStatement {
    pub fn new(sql: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }
}
