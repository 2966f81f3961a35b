use crate::comments::first_non_whitespace;
use crate::error::ProcessError;
use crate::models::RawComment;

use super::buffer::LineBuffer;

/// Whether `comment` is the first non-whitespace content of its starting line.
///
/// Checked against the buffer as it is now: earlier comments on the same line
/// may already have been cut out.
pub fn is_own_line(comment: &RawComment, buffer: &LineBuffer) -> Result<bool, ProcessError> {
    let start = comment.location.start;
    if start.column == 0 {
        return Ok(true);
    }

    let index = buffer.index_of(start.line)?;
    let column = buffer.current_column(start.line, start.column)?;
    let line = buffer.text(index)?;
    Ok(first_non_whitespace(line) == Some(column))
}
