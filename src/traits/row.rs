use crate::error::{Result, SqlScanError};
use crate::types::{FromSqlValue, SqlValue};

/// Access to the current row of a result.
///
/// `scan` fills the destination slots in column order:
/// ```ignore
/// let mut id = 0i64;
/// let mut name = String::new();
/// row.scan(&mut [&mut id, &mut name])?;
/// ```
pub trait Row: Send + Sync {
    fn scan(&self, dest: &mut [&mut dyn ScanTarget]) -> Result<()>;
}

/// A destination slot that a column value can be written into.
pub trait ScanTarget {
    /// Name of the target type, used in error messages.
    fn target_type(&self) -> &'static str;

    /// Overwrite the slot with `value`. Returns false if the value is incompatible.
    fn assign(&mut self, value: &SqlValue) -> bool;
}

impl<T: FromSqlValue> ScanTarget for T {
    fn target_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn assign(&mut self, value: &SqlValue) -> bool {
        match T::from_sql_value(value) {
            Some(v) => {
                *self = v;
                true
            }
            None => false,
        }
    }
}

/// Scan a row's values into destination slots.
/// Shared by every [`Row`] implementation that can expose its values as [`SqlValue`]s.
pub fn scan_values(values: &[SqlValue], dest: &mut [&mut dyn ScanTarget]) -> Result<()> {
    if values.len() != dest.len() {
        return Err(SqlScanError::ColumnCountMismatch {
            columns: values.len(),
            destinations: dest.len(),
        });
    }
    for (column, (value, slot)) in values.iter().zip(dest.iter_mut()).enumerate() {
        if !slot.assign(value) {
            return Err(SqlScanError::TypeMismatch {
                column,
                expected: slot.target_type(),
                found: value.type_name(),
            });
        }
    }
    Ok(())
}

/// Types that can be built from a whole row.
/// `T::from_row` can be passed directly as a conversion function.
pub trait FromRow: Sized {
    fn from_row(row: &dyn Row) -> Result<Self>;
}

macro_rules! impl_from_row_for_tuple {
    ($($name:ident),+) => {
        impl<$($name),+> FromRow for ($($name,)+)
        where
            $($name: FromSqlValue + Default,)+
        {
            #[allow(non_snake_case)]
            fn from_row(row: &dyn Row) -> Result<Self> {
                $(let mut $name = $name::default();)+
                row.scan(&mut [$(&mut $name),+])?;
                Ok(($($name,)+))
            }
        }
    };
}

impl_from_row_for_tuple!(A);
impl_from_row_for_tuple!(A, B);
impl_from_row_for_tuple!(A, B, C);
impl_from_row_for_tuple!(A, B, C, D);
impl_from_row_for_tuple!(A, B, C, D, E);
impl_from_row_for_tuple!(A, B, C, D, E, F);

#[cfg(test)]
mod tests {
    use super::*;

    struct Values(Vec<SqlValue>);

    impl Row for Values {
        fn scan(&self, dest: &mut [&mut dyn ScanTarget]) -> Result<()> {
            scan_values(&self.0, dest)
        }
    }

    #[test]
    fn test_scan_into_slots() {
        let row = Values(vec![SqlValue::Int64(7), SqlValue::from("x")]);
        let mut id = 0i64;
        let mut name = String::new();
        row.scan(&mut [&mut id, &mut name]).unwrap();
        assert_eq!(id, 7);
        assert_eq!(name, "x");
    }

    #[test]
    fn test_scan_column_count_mismatch() {
        let row = Values(vec![SqlValue::Int64(7), SqlValue::from("x")]);
        let mut id = 0i64;
        let err = row.scan(&mut [&mut id]).unwrap_err();
        match err {
            SqlScanError::ColumnCountMismatch {
                columns,
                destinations,
            } => {
                assert_eq!(columns, 2);
                assert_eq!(destinations, 1);
            }
            _ => panic!("Expected ColumnCountMismatch error"),
        }
    }

    #[test]
    fn test_scan_type_mismatch_reports_column() {
        let row = Values(vec![SqlValue::Int64(7), SqlValue::Null]);
        let mut id = 0i64;
        let mut name = String::new();
        let err = row.scan(&mut [&mut id, &mut name]).unwrap_err();
        match err {
            SqlScanError::TypeMismatch { column, found, .. } => {
                assert_eq!(column, 1);
                assert_eq!(found, "NULL");
            }
            _ => panic!("Expected TypeMismatch error"),
        }
    }

    #[test]
    fn test_tuple_from_row() {
        let row = Values(vec![
            SqlValue::Int32(1),
            SqlValue::Null,
            SqlValue::Bool(true),
        ]);
        let (id, nick, active) = <(i64, Option<String>, bool)>::from_row(&row).unwrap();
        assert_eq!(id, 1);
        assert_eq!(nick, None);
        assert!(active);
    }
}
