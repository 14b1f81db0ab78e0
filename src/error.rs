use thiserror::Error;

/// Error type for sqlscan operations
#[derive(Debug, Error)]
pub enum SqlScanError {
    #[error("Failed to render statement: {0}")]
    RenderFailed(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Query cancelled")]
    Cancelled,

    #[error("Query deadline exceeded")]
    DeadlineExceeded,

    #[error("No rows in result set")]
    NoRows,

    #[error("Row has {columns} column(s), got {destinations} destination(s)")]
    ColumnCountMismatch { columns: usize, destinations: usize },

    #[error("Column {column}: cannot scan {found} into {expected}")]
    TypeMismatch {
        column: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Conversion failed: {0}")]
    Conversion(String),

    #[error("Last insert id is not supported by this result")]
    LastInsertIdUnsupported,

    #[error("Rows affected is not supported by this result")]
    RowsAffectedUnsupported,
}

/// Broad classification of a [`SqlScanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The statement source could not produce SQL; nothing was executed.
    Render,
    /// The executor failed to run the statement.
    Dispatch,
    /// A single-row query matched nothing.
    NotFound,
    /// A row could not be converted into the requested type.
    Conversion,
    /// The statement ran but the requested metadata is unavailable.
    Metadata,
}

impl SqlScanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SqlScanError::RenderFailed(_) => ErrorKind::Render,
            SqlScanError::ConnectionFailed(_)
            | SqlScanError::QueryFailed(_)
            | SqlScanError::Cancelled
            | SqlScanError::DeadlineExceeded => ErrorKind::Dispatch,
            SqlScanError::NoRows => ErrorKind::NotFound,
            SqlScanError::ColumnCountMismatch { .. }
            | SqlScanError::TypeMismatch { .. }
            | SqlScanError::ColumnNotFound(_)
            | SqlScanError::Conversion(_) => ErrorKind::Conversion,
            SqlScanError::LastInsertIdUnsupported | SqlScanError::RowsAffectedUnsupported => {
                ErrorKind::Metadata
            }
        }
    }

    /// Returns true if a single-row query found no matching row.
    pub fn is_no_rows(&self) -> bool {
        matches!(self, SqlScanError::NoRows)
    }

    /// Returns true if the statement succeeded but metadata extraction did not.
    pub fn is_metadata_unsupported(&self) -> bool {
        self.kind() == ErrorKind::Metadata
    }
}

/// Result type alias for sqlscan operations
pub type Result<T> = std::result::Result<T, SqlScanError>;
