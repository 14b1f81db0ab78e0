mod delete;
mod insert;
mod raw;
mod select;
mod update;
mod writer;

pub use delete::Delete;
pub use insert::{Insert, InsertWithColumns};
pub use raw::RawStatement;
pub use select::{Select, SelectWithColumns, SelectWithTable};
pub use update::Update;
pub(crate) use writer::SqlWriter;

#[cfg(test)]
pub(crate) mod test_schema {
    use crate::traits::{Column, Table};

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
}
