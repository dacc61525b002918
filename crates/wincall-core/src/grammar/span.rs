//! Conversion from sqlparser line/column locations to byte spans.

use crate::types::Span;

/// Converts a 1-based line and column into a byte offset in `sql`.
///
/// sqlparser counts columns in characters, so multi-byte characters before
/// the column are walked with `char_indices`. Returns `None` for positions
/// outside the text, including sqlparser's 0/0 "no location" marker.
pub fn line_col_to_offset(sql: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 || column == 0 {
        return None;
    }

    let bytes = sql.as_bytes();
    let mut line_start = 0;
    for _ in 1..line {
        let remaining = bytes.get(line_start..)?;
        let newline = remaining.iter().position(|&b| b == b'\n')?;
        line_start += newline + 1;
    }

    let rest = sql.get(line_start..)?;
    let line_text = rest.split('\n').next().unwrap_or(rest);
    let mut chars = line_text.char_indices().map(|(offset, _)| offset);
    match chars.nth(column - 1) {
        Some(offset) => Some(line_start + offset),
        // One past the last character is a valid exclusive end.
        None if line_text.chars().count() + 1 == column => Some(line_start + line_text.len()),
        None => None,
    }
}

/// Byte span covered by a sqlparser span, if it carries a real location.
pub fn byte_span(sql: &str, span: sqlparser::tokenizer::Span) -> Option<Span> {
    let start = line_col_to_offset(sql, span.start.line as usize, span.start.column as usize)?;
    let end = line_col_to_offset(sql, span.end.line as usize, span.end.column as usize)?;
    (start <= end).then(|| Span::new(start, end))
}
