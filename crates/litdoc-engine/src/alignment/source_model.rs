use log::debug;
use serde::Serialize;

use crate::comments::ClassifiedComment;
use crate::error::ProcessError;
use crate::highlight::Highlighter;
use crate::models::SyntaxNode;

use super::buffer::{CommentBuckets, LineBuffer, Slot};
use super::walker::TreeWalker;

/// Code and comments of one file, aligned line by line.
///
/// Both vectors always have the same length. `code_lines[i]` is `None` only
/// where a comment consumed the tail of the file and its bucket needed a line
/// to hang off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentedSource {
    pub code_lines: Vec<Option<String>>,
    pub comment_buckets: Vec<Option<Vec<ClassifiedComment>>>,
}

/// One row of a [`DocumentedSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentedLine<'a> {
    /// 1-based display number.
    pub number: usize,
    pub code: Option<&'a str>,
    pub comments: Option<&'a [ClassifiedComment]>,
}

impl DocumentedSource {
    pub fn len(&self) -> usize {
        self.code_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = DocumentedLine<'_>> {
        self.code_lines
            .iter()
            .zip(&self.comment_buckets)
            .enumerate()
            .map(|(index, (code, comments))| DocumentedLine {
                number: index + 1,
                code: code.as_deref(),
                comments: comments.as_deref(),
            })
    }
}

/// Turns source text plus its syntax tree into a [`DocumentedSource`].
pub struct SourceModel<'a> {
    text: &'a str,
}

impl<'a> SourceModel<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Cut every comment out of the text, returning the surviving lines and
    /// the comment buckets aligned with them.
    pub fn align(
        &self,
        tree: &SyntaxNode,
    ) -> Result<(Vec<Slot>, Vec<Option<Vec<ClassifiedComment>>>), ProcessError> {
        let mut buffer = LineBuffer::from_source(self.text);
        let mut buckets = CommentBuckets::new();
        let original_len = buffer.len();

        TreeWalker::new(&mut buffer, &mut buckets).walk(tree)?;

        debug!(
            "aligned {} source lines into {} ({} removed)",
            original_len,
            buffer.len(),
            buffer.lines_removed()
        );

        let aligned = buckets.into_aligned(buffer.len())?;
        Ok((buffer.into_slots(), aligned))
    }

    /// Align, then highlight the surviving code in one pass.
    pub fn build(
        &self,
        tree: &SyntaxNode,
        language: &str,
        highlighter: &dyn Highlighter,
    ) -> Result<DocumentedSource, ProcessError> {
        let (slots, comment_buckets) = self.align(tree)?;

        let surviving: Vec<&str> = slots.iter().filter_map(Slot::code).collect();
        let mut highlighted: Vec<String> = Vec::with_capacity(surviving.len());
        if !surviving.is_empty() {
            let markup = highlighter.highlight(language, &surviving.join("\n"))?;
            highlighted.extend(markup.split('\n').map(str::to_string));
        }

        if highlighted.len() != surviving.len() {
            return Err(ProcessError::alignment(format!(
                "highlighter returned {} lines for {} lines of code",
                highlighted.len(),
                surviving.len()
            )));
        }

        let mut markup = highlighted.into_iter();
        let code_lines = slots
            .iter()
            .map(|slot| match slot {
                Slot::Code(_) => markup.next(),
                Slot::Removed => None,
            })
            .collect();

        Ok(DocumentedSource {
            code_lines,
            comment_buckets,
        })
    }
}
