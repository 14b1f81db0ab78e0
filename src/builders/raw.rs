use crate::error::{Result, SqlScanError};
use crate::traits::StatementSource;
use crate::types::{RenderedStatement, SqlValue};

/// Hand-written SQL with positional arguments.
///
/// Prepared rendering returns the text and arguments unchanged. Unprepared
/// rendering replaces `?` (sequential) and `$n` (by index) placeholders
/// outside of quoted strings and comments with literals.
///
/// PostgreSQL's jsonb operators `?`, `?|` and `?&` cannot be told apart from
/// a `?` placeholder, so statements using them should be written with `$n`
/// placeholders, or with the `jsonb_exists` family of functions.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStatement {
    sql: String,
    args: Vec<SqlValue>,
    prepared: bool,
}

impl RawStatement {
    pub fn new(sql: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            args,
            prepared: true,
        }
    }
}

impl StatementSource for RawStatement {
    fn prepared(&self, prepared: bool) -> Self {
        Self {
            prepared,
            ..self.clone()
        }
    }

    fn to_sql(&self) -> Result<RenderedStatement> {
        if self.prepared {
            return Ok(RenderedStatement::new(self.sql.clone(), self.args.clone()));
        }
        Ok(RenderedStatement::new(
            inline_placeholders(&self.sql, &self.args)?,
            Vec::new(),
        ))
    }
}

fn inline_placeholders(sql: &str, args: &[SqlValue]) -> Result<String> {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    let mut quote: Option<char> = None;
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => {
                quote = Some(c);
                out.push(c);
            }
            '-' if chars.peek() == Some(&'-') => {
                out.push(c);
                for rest in chars.by_ref() {
                    out.push(rest);
                    if rest == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                out.push(c);
                if let Some(star) = chars.next() {
                    out.push(star);
                }
                let mut prev = '\0';
                for rest in chars.by_ref() {
                    out.push(rest);
                    if prev == '*' && rest == '/' {
                        break;
                    }
                    prev = rest;
                }
            }
            '?' => {
                out.push_str(&literal_at(args, next_arg)?);
                next_arg += 1;
            }
            '$' if chars.peek().is_some_and(|d| d.is_ascii_digit()) => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                    digits.push(d);
                    chars.next();
                }
                let n: usize = digits
                    .parse()
                    .map_err(|_| SqlScanError::RenderFailed(format!("bad placeholder ${}", digits)))?;
                if n == 0 {
                    return Err(SqlScanError::RenderFailed("placeholder $0".to_string()));
                }
                out.push_str(&literal_at(args, n - 1)?);
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

fn literal_at(args: &[SqlValue], index: usize) -> Result<String> {
    args.get(index).map(SqlValue::to_literal).ok_or_else(|| {
        SqlScanError::RenderFailed(format!(
            "placeholder {} has no argument ({} given)",
            index + 1,
            args.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepared_is_unchanged() {
        let raw = RawStatement::new("SELECT id FROM t WHERE id = ?", vec![SqlValue::Int64(7)]);
        let stmt = raw.to_sql().unwrap();
        assert_eq!(stmt.sql, "SELECT id FROM t WHERE id = ?");
        assert_eq!(stmt.args, vec![SqlValue::Int64(7)]);
    }

    #[test]
    fn test_inline_question_marks() {
        let raw = RawStatement::new(
            "SELECT '?' FROM t WHERE id = ? AND name = ?",
            vec![SqlValue::Int64(7), SqlValue::from("x")],
        );
        let stmt = raw.prepared(false).to_sql().unwrap();
        assert_eq!(stmt.sql, "SELECT '?' FROM t WHERE id = 7 AND name = 'x'");
        assert!(stmt.args.is_empty());
    }

    #[test]
    fn test_inline_numbered() {
        let raw = RawStatement::new(
            "UPDATE t SET a = $2 WHERE id = $1",
            vec![SqlValue::Int32(1), SqlValue::Bool(false)],
        );
        let stmt = raw.prepared(false).to_sql().unwrap();
        assert_eq!(stmt.sql, "UPDATE t SET a = FALSE WHERE id = 1");
    }

    #[test]
    fn test_inline_skips_comments() {
        let raw = RawStatement::new(
            "SELECT id -- which id?\nFROM t /* is it ? */ WHERE id = ?",
            vec![SqlValue::Int64(7)],
        );
        let stmt = raw.prepared(false).to_sql().unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT id -- which id?\nFROM t /* is it ? */ WHERE id = 7"
        );
    }

    #[test]
    fn test_inline_missing_argument_fails() {
        let raw = RawStatement::new("SELECT ? , ?", vec![SqlValue::Null]);
        let err = raw.prepared(false).to_sql().unwrap_err();
        assert!(matches!(err, SqlScanError::RenderFailed(_)));
    }
}
