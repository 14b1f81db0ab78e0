use crate::types::{RenderedStatement, SqlValue};

/// Accumulates SQL text and arguments for one rendering pass.
///
/// Prepared writers emit `$n` placeholders and collect the values;
/// unprepared writers inline each value as a literal.
pub(crate) struct SqlWriter {
    prepared: bool,
    sql: String,
    args: Vec<SqlValue>,
}

impl SqlWriter {
    pub(crate) fn new(prepared: bool) -> Self {
        Self {
            prepared,
            sql: String::with_capacity(256),
            args: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    pub(crate) fn push_value(&mut self, value: &SqlValue) {
        if self.prepared {
            self.args.push(value.clone());
            self.sql.push('$');
            self.sql.push_str(&self.args.len().to_string());
        } else {
            self.sql.push_str(&value.to_literal());
        }
    }

    /// Push `items` separated by `", "`.
    pub(crate) fn push_list<I, F>(&mut self, items: I, mut each: F)
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            each(self, item);
        }
    }

    pub(crate) fn finish(self) -> RenderedStatement {
        RenderedStatement::new(self.sql, self.args)
    }
}
