use crate::error::Result;
use crate::types::RenderedStatement;

/// Statement source: anything that can render itself into SQL plus arguments.
///
/// `prepared(true)` selects placeholder rendering with arguments returned
/// separately; `prepared(false)` embeds literals in the SQL text and is meant
/// for logging only.
pub trait StatementSource: Sized {
    /// Returns a copy of this statement configured for the given rendering mode.
    fn prepared(&self, prepared: bool) -> Self;

    /// Render the statement.
    fn to_sql(&self) -> Result<RenderedStatement>;
}
