use std::collections::BTreeMap;

use crate::comments::ClassifiedComment;
use crate::error::ProcessError;

/// One line of the shrinking code buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Code that survived comment extraction (possibly empty).
    Code(String),
    /// A line consumed by a comment but kept so a bucket can stay attached to it.
    Removed,
}

impl Slot {
    pub fn code(&self) -> Option<&str> {
        match self {
            Slot::Code(text) => Some(text),
            Slot::Removed => None,
        }
    }
}

/// Bytes already cut from the front part of one original line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnShift {
    line: usize,
    bytes: usize,
}

/// The code lines of one file while comments are being cut out of them.
///
/// Slots only ever disappear. `lines_removed` counts how many original lines
/// have been spliced out so far, which is what maps the parser's original line
/// numbers onto current buffer indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    slots: Vec<Slot>,
    lines_removed: usize,
    shift: Option<ColumnShift>,
}

impl LineBuffer {
    /// Split source text into lines, treating `\r\n` and `\n` alike.
    pub fn from_source(text: &str) -> Self {
        let slots = text
            .split('\n')
            .map(|line| Slot::Code(line.trim_end_matches('\r').to_string()))
            .collect();
        Self {
            slots,
            lines_removed: 0,
            shift: None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn lines_removed(&self) -> usize {
        self.lines_removed
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<Slot> {
        self.slots
    }

    /// Current buffer index of a 1-based original line number.
    pub fn index_of(&self, original_line: usize) -> Result<usize, ProcessError> {
        original_line
            .checked_sub(self.lines_removed + 1)
            .filter(|index| *index < self.slots.len())
            .ok_or_else(|| {
                ProcessError::alignment(format!(
                    "original line {original_line} maps outside the buffer \
                     ({} lines, {} removed)",
                    self.slots.len(),
                    self.lines_removed
                ))
            })
    }

    /// Text currently held at `index`; a removed slot reads as empty.
    pub fn text(&self, index: usize) -> Result<&str, ProcessError> {
        match self.slots.get(index) {
            Some(slot) => Ok(slot.code().unwrap_or_default()),
            None => Err(ProcessError::alignment(format!(
                "line index {index} is outside the buffer ({} lines)",
                self.slots.len()
            ))),
        }
    }

    pub fn set(&mut self, index: usize, text: String) -> Result<(), ProcessError> {
        let len = self.slots.len();
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            ProcessError::alignment(format!(
                "cannot rewrite line index {index}, buffer has {len} lines"
            ))
        })?;
        *slot = Slot::Code(text);
        Ok(())
    }

    /// Remove the slots `first..=last`.
    ///
    /// `anchor` is the index the comment's bucket was placed at. If the
    /// removal would leave no slot at that index (the comment consumed the
    /// end of the buffer), the first slot stays behind as [`Slot::Removed`].
    pub fn collapse(&mut self, first: usize, last: usize, anchor: usize) -> Result<(), ProcessError> {
        if first > last || last >= self.slots.len() {
            return Err(ProcessError::alignment(format!(
                "cannot remove lines {first}..={last} from a buffer of {} lines",
                self.slots.len()
            )));
        }

        let mut first = first;
        if first == anchor && last + 1 == self.slots.len() {
            self.slots[first] = Slot::Removed;
            first += 1;
        }

        if first <= last {
            self.slots.drain(first..=last);
            self.lines_removed += last - first + 1;
        }
        Ok(())
    }

    /// Bytes already removed from the start side of `original_line`.
    pub fn column_shift(&self, original_line: usize) -> usize {
        match self.shift {
            Some(shift) if shift.line == original_line => shift.bytes,
            _ => 0,
        }
    }

    /// Note that `bytes` were cut from `original_line` ahead of any later comment on it.
    pub fn record_shift(&mut self, original_line: usize, bytes: usize) {
        let already = self.column_shift(original_line);
        self.shift = Some(ColumnShift {
            line: original_line,
            bytes: already + bytes,
        });
    }

    /// Translate an original column on `original_line` into the current text.
    pub fn current_column(&self, original_line: usize, column: usize) -> Result<usize, ProcessError> {
        column
            .checked_sub(self.column_shift(original_line))
            .ok_or_else(|| {
                ProcessError::alignment(format!(
                    "column {column} on line {original_line} was already cut away"
                ))
            })
    }
}

/// Comments collected per buffer index, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBuckets {
    buckets: BTreeMap<usize, Vec<ClassifiedComment>>,
}

impl CommentBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `comment` to the bucket at `index`, which must be inside the buffer.
    pub fn push(
        &mut self,
        index: usize,
        buffer_len: usize,
        comment: ClassifiedComment,
    ) -> Result<(), ProcessError> {
        if index >= buffer_len {
            return Err(ProcessError::alignment(format!(
                "comment bucket {index} would lie beyond the buffer ({buffer_len} lines)"
            )));
        }
        self.buckets.entry(index).or_default().push(comment);
        Ok(())
    }

    /// Most recent comment in the bucket at `index`.
    pub fn last_mut(&mut self, index: usize) -> Option<&mut ClassifiedComment> {
        self.buckets.get_mut(&index).and_then(|bucket| bucket.last_mut())
    }

    pub fn get(&self, index: usize) -> Option<&[ClassifiedComment]> {
        self.buckets.get(&index).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Expand into one entry per buffer line.
    pub fn into_aligned(
        self,
        buffer_len: usize,
    ) -> Result<Vec<Option<Vec<ClassifiedComment>>>, ProcessError> {
        let mut aligned = vec![None; buffer_len];
        for (index, comments) in self.buckets {
            let slot = aligned.get_mut(index).ok_or_else(|| {
                ProcessError::alignment(format!(
                    "comment bucket {index} is beyond the final buffer ({buffer_len} lines)"
                ))
            })?;
            *slot = Some(comments);
        }
        Ok(aligned)
    }
}
