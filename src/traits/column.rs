/// A column that statement builders can reference.
/// Implementations are typically generated alongside a [`Table`](super::Table).
pub trait Column {
    /// The column name as it appears in the database.
    fn column_name(&self) -> &'static str;

    /// The table this column belongs to.
    fn table_name(&self) -> &'static str;

    /// `table.column`
    fn qualified_name(&self) -> String {
        format!("{}.{}", self.table_name(), self.column_name())
    }
}

/// Owned column reference stored inside builders.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn from_column<C: Column + ?Sized>(col: &C) -> Self {
        Self::new(col.table_name(), col.column_name())
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }
}
