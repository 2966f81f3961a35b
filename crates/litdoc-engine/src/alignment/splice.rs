use log::debug;

use crate::comments::{classify, is_blank};
use crate::error::ProcessError;
use crate::models::{Location, RawComment};

use super::buffer::{CommentBuckets, LineBuffer};

/// Cuts the comments of one comment group out of the line buffer and files
/// them into comment buckets, keeping both in step.
///
/// A new splicer is made for every group; consecutive comments of the same
/// group that land in the same bucket are folded into one entry.
pub struct LineSplicer<'a> {
    buffer: &'a mut LineBuffer,
    buckets: &'a mut CommentBuckets,
    block: Location,
    group_bucket: Option<usize>,
}

impl<'a> LineSplicer<'a> {
    /// `block` is the location of the node that owns the group.
    pub fn new(buffer: &'a mut LineBuffer, buckets: &'a mut CommentBuckets, block: Location) -> Self {
        Self {
            buffer,
            buckets,
            block,
            group_bucket: None,
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        self.buffer
    }

    /// Extract one comment of the group.
    pub fn apply(&mut self, comment: &RawComment) -> Result<(), ProcessError> {
        let classified = classify(&comment.text)?;
        let start = comment.location.start;
        let bucket = self.buffer.index_of(start.line)?;

        debug!(
            "comment {:?} at {}:{} (node lines {}-{}) -> bucket {}",
            classified.kind,
            start.line,
            start.column,
            self.block.start.line,
            self.block.end.line,
            bucket
        );

        match self.buckets.last_mut(bucket) {
            Some(previous) if self.group_bucket == Some(bucket) && previous.can_absorb(&classified) => {
                previous.absorb(classified);
            }
            _ => self.buckets.push(bucket, self.buffer.len(), classified)?,
        }
        self.group_bucket = Some(bucket);

        if comment.location.is_single_line() {
            self.splice_single_line(comment, bucket)
        } else {
            self.splice_multi_line(comment, bucket)
        }
    }

    fn splice_single_line(&mut self, comment: &RawComment, index: usize) -> Result<(), ProcessError> {
        let Location { start, end } = comment.location;
        let from = self.buffer.current_column(start.line, start.column)?;
        let to = self.buffer.current_column(start.line, end.column)?;
        let line = self.buffer.text(index)?;

        if from > 0 || line.len() > to {
            let before = cut(line, ..from, start.line)?;
            let after = cut(line, to.., start.line)?;
            let kept = format!("{before}{after}");
            if !is_blank(&kept) {
                self.buffer.set(index, kept)?;
                self.buffer.record_shift(start.line, to - from);
                return Ok(());
            }
        }

        self.buffer.collapse(index, index, index)
    }

    fn splice_multi_line(&mut self, comment: &RawComment, anchor: usize) -> Result<(), ProcessError> {
        let Location { start, end } = comment.location;
        let last_index = self.buffer.index_of(end.line)?;
        let mut first = anchor;
        let mut last = last_index;

        let from = self.buffer.current_column(start.line, start.column)?;
        if from > 0 {
            let preceding = cut(self.buffer.text(anchor)?, ..from, start.line)?;
            if !is_blank(preceding) {
                let preceding = preceding.to_string();
                self.buffer.set(anchor, preceding)?;
                first += 1;
            }
        }

        let last_line = self.buffer.text(last_index)?;
        if last_line.len() > end.column {
            let following = cut(last_line, end.column.., end.line)?;
            if !is_blank(following) {
                let following = following.to_string();
                self.buffer.set(last_index, following)?;
                self.buffer.record_shift(end.line, end.column);
                last = last_index.checked_sub(1).ok_or_else(|| {
                    ProcessError::alignment("multi-line comment ends on the first buffer line")
                })?;
            }
        }

        if first <= last {
            self.buffer.collapse(first, last, anchor)?;
        }
        Ok(())
    }
}

/// Byte-range slice of a buffer line, failing instead of panicking.
fn cut<R>(line: &str, range: R, original_line: usize) -> Result<&str, ProcessError>
where
    R: std::slice::SliceIndex<str, Output = str> + std::fmt::Debug + Clone,
{
    line.get(range.clone()).ok_or_else(|| {
        ProcessError::alignment(format!(
            "columns {range:?} do not fit line {original_line} ({} bytes)",
            line.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::buffer::Slot;
    use crate::comments::CommentKind;
    use pretty_assertions::assert_eq;

    fn run(source: &str, comments: &[RawComment]) -> (LineBuffer, CommentBuckets) {
        let mut buffer = LineBuffer::from_source(source);
        let mut buckets = CommentBuckets::new();
        let block = Location::new(1, 0, 1, 0);
        let mut splicer = LineSplicer::new(&mut buffer, &mut buckets, block);
        for comment in comments {
            splicer.apply(comment).unwrap();
        }
        (buffer, buckets)
    }

    fn code(buffer: &LineBuffer) -> Vec<Option<&str>> {
        buffer.slots().iter().map(Slot::code).collect()
    }

    #[test]
    fn inline_line_comment_is_cut_from_its_line() {
        let source = "        console.log(i); //inline comment";
        let comment = RawComment::new("inline comment", Location::new(1, 24, 1, 40));
        let (buffer, buckets) = run(source, &[comment]);

        assert_eq!(code(&buffer), vec![Some("        console.log(i); ")]);
        let bucket = buckets.get(0).unwrap();
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0].kind, CommentKind::Regular);
        assert_eq!(bucket[0].text, "inline comment");
    }

    #[test]
    fn embedded_block_comment_keeps_code_on_both_sides() {
        let source = "for (var i = 0; i < 100 /* embedded block comment */; i++) {";
        let comment = RawComment::new(" embedded block comment ", Location::new(1, 24, 1, 52));
        let (buffer, buckets) = run(source, &[comment]);

        assert_eq!(code(&buffer), vec![Some("for (var i = 0; i < 100 ; i++) {")]);
        assert_eq!(buckets.get(0).unwrap()[0].text, "embedded block comment");
        assert_eq!(buckets.get(0).unwrap()[0].kind, CommentKind::Regular);
    }

    #[test]
    fn own_line_comment_removes_its_line() {
        let source = "    //line comment\n    x();";
        let comment = RawComment::new("line comment", Location::new(1, 4, 1, 18));
        let (buffer, buckets) = run(source, &[comment]);

        assert_eq!(code(&buffer), vec![Some("    x();")]);
        assert_eq!(buffer.lines_removed(), 1);
        assert_eq!(buckets.get(0).unwrap()[0].text, "line comment");
    }

    #[test]
    fn consecutive_line_comments_fold_into_one_entry_below() {
        let source = "    //even if\n    //they push\n    //down\n    for (;;) {}";
        let comments = [
            RawComment::new("even if", Location::new(1, 4, 1, 13)),
            RawComment::new("they push", Location::new(2, 4, 2, 15)),
            RawComment::new("down", Location::new(3, 4, 3, 10)),
        ];
        let (buffer, buckets) = run(source, &comments);

        assert_eq!(code(&buffer), vec![Some("    for (;;) {}")]);
        assert_eq!(buffer.lines_removed(), 3);
        let bucket = buckets.get(0).unwrap();
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0].text, "even if<br>they push<br>down");
    }

    #[test]
    fn multi_line_block_between_code_lines() {
        let source = "a();\n/*\n block comment\n */\nb();";
        let comment = RawComment::new("\n block comment\n ", Location::new(2, 0, 4, 3));
        let (buffer, buckets) = run(source, &[comment]);

        assert_eq!(code(&buffer), vec![Some("a();"), Some("b();")]);
        assert_eq!(buffer.lines_removed(), 3);
        assert_eq!(buckets.get(1).unwrap()[0].text, "block comment");
    }

    #[test]
    fn multi_line_comment_keeps_code_before_and_after() {
        let source = "x = 1; /* starts\n middle\n ends */ y = 2;";
        let comment = RawComment::new(" starts\n middle\n ends ", Location::new(1, 7, 3, 8));
        let (buffer, buckets) = run(source, &[comment]);

        assert_eq!(code(&buffer), vec![Some("x = 1; "), Some(" y = 2;")]);
        assert_eq!(buffer.lines_removed(), 1);
        assert_eq!(buckets.get(0).unwrap()[0].text, " starts<br> middle<br> ends ");
    }

    #[test]
    fn trailing_block_comment_at_end_of_file_keeps_a_removed_slot() {
        let source = "x();\n/*\n bye\n */";
        let comment = RawComment::new("\n bye\n ", Location::new(2, 0, 4, 3));
        let (buffer, buckets) = run(source, &[comment]);

        assert_eq!(code(&buffer), vec![Some("x();"), None]);
        assert_eq!(buckets.get(1).unwrap()[0].text, "bye");
    }

    #[test]
    fn two_comments_on_one_line_use_shifted_columns() {
        let source = "x(); /* a */ /* b */ y();";
        let comments = [
            RawComment::new(" a ", Location::new(1, 5, 1, 12)),
            RawComment::new(" b ", Location::new(1, 13, 1, 20)),
        ];
        let (buffer, buckets) = run(source, &comments);

        assert_eq!(code(&buffer), vec![Some("x();   y();")]);
        assert_eq!(buckets.get(0).unwrap()[0].text, "a<br>b");
    }

    #[test]
    fn jsdoc_entries_stay_separate_in_a_bucket() {
        let source = "//multiple comments\n/** JSDOC comment */\nfunction test() {}";
        let comments = [
            RawComment::new("multiple comments", Location::new(1, 0, 1, 19)),
            RawComment::new("* JSDOC comment ", Location::new(2, 0, 2, 20)),
        ];
        let (buffer, buckets) = run(source, &comments);

        assert_eq!(code(&buffer), vec![Some("function test() {}")]);
        let kinds: Vec<_> = buckets.get(0).unwrap().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CommentKind::Regular, CommentKind::Jsdoc]);
    }

    #[test]
    fn columns_past_line_end_are_a_violation() {
        let mut buffer = LineBuffer::from_source("x();");
        let mut buckets = CommentBuckets::new();
        let mut splicer = LineSplicer::new(&mut buffer, &mut buckets, Location::new(1, 0, 1, 4));
        let err = splicer
            .apply(&RawComment::new("c", Location::new(1, 6, 1, 9)))
            .unwrap_err();
        assert!(matches!(err, ProcessError::AlignmentInvariantViolation(_)));
    }

    #[test]
    fn comment_on_consumed_line_is_a_violation() {
        let mut buffer = LineBuffer::from_source("//a\nx();");
        let mut buckets = CommentBuckets::new();
        let mut splicer = LineSplicer::new(&mut buffer, &mut buckets, Location::new(1, 0, 2, 4));
        splicer
            .apply(&RawComment::new("a", Location::new(1, 0, 1, 3)))
            .unwrap();
        let err = splicer
            .apply(&RawComment::new("a", Location::new(1, 0, 1, 3)))
            .unwrap_err();
        assert!(matches!(err, ProcessError::AlignmentInvariantViolation(_)));
    }
}
