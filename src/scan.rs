use crate::error::Result;
use crate::traits::{Row, RowCursor};

/// Owns a cursor for the duration of one fetch and closes it exactly once.
///
/// `finish` closes and reports the close error. Any other exit path,
/// including a dropped future, closes through `Drop` and discards the
/// close error so the error already being returned is kept.
struct CursorGuard {
    cursor: Box<dyn RowCursor>,
    closed: bool,
}

impl CursorGuard {
    fn new(cursor: Box<dyn RowCursor>) -> Self {
        Self {
            cursor,
            closed: false,
        }
    }

    async fn next(&mut self) -> Result<bool> {
        self.cursor.next().await
    }

    fn row(&self) -> &dyn Row {
        self.cursor.row()
    }

    fn finish(mut self) -> Result<()> {
        self.closed = true;
        self.cursor.close()
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            let _ = self.cursor.close();
        }
    }
}

/// Convert every row of `cursor` with `scan`, preserving row order.
/// The first failing row aborts the whole scan.
pub(crate) async fn scan_rows<T, F>(cursor: Box<dyn RowCursor>, scan: F) -> Result<Vec<T>>
where
    F: Fn(&dyn Row) -> Result<T>,
{
    let mut cursor = CursorGuard::new(cursor);
    let mut results = Vec::new();
    while cursor.next().await? {
        results.push(scan(cursor.row())?);
    }
    cursor.finish()?;
    Ok(results)
}
