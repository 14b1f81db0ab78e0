use crate::error::{Result, SqlScanError};
use crate::traits::ExecResult;

/// Plain [`ExecResult`] holding whatever metadata the driver reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: Option<u64>,
    pub last_insert_id: Option<i64>,
}

impl ExecOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows_affected(mut self, n: u64) -> Self {
        self.rows_affected = Some(n);
        self
    }

    pub fn with_last_insert_id(mut self, id: i64) -> Self {
        self.last_insert_id = Some(id);
        self
    }
}

impl ExecResult for ExecOutcome {
    fn last_insert_id(&self) -> Result<i64> {
        self.last_insert_id
            .ok_or(SqlScanError::LastInsertIdUnsupported)
    }

    fn rows_affected(&self) -> Result<u64> {
        self.rows_affected
            .ok_or(SqlScanError::RowsAffectedUnsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractions_are_independent() {
        let outcome = ExecOutcome::new().with_rows_affected(3);
        assert_eq!(outcome.rows_affected().unwrap(), 3);
        assert!(matches!(
            outcome.last_insert_id(),
            Err(SqlScanError::LastInsertIdUnsupported)
        ));
    }
}
