/// A table that statement builders can target.
pub trait Table {
    /// Accessor type exposing this table's columns.
    type Columns;

    fn table_name() -> &'static str;

    fn schema() -> Option<&'static str> {
        None
    }

    /// `schema.table`, or just `table` without a schema.
    fn qualified_name() -> String {
        match Self::schema() {
            Some(schema) => format!("{}.{}", schema, Self::table_name()),
            None => Self::table_name().to_string(),
        }
    }

    fn columns() -> Self::Columns;
}
