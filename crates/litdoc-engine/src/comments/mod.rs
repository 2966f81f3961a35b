//! Comment classification.
//!
//! The first character of a comment body decides how it is treated:
//!
//! | first char | kind       | example                 |
//! |------------|------------|-------------------------|
//! | `*`        | `Jsdoc`    | `/** description */`    |
//! | `!`        | `Ignore`   | `//! not for the docs`  |
//! | `$`        | `Markdown` | `//$ **bold** remark`   |
//! | otherwise  | `Regular`  | `// plain remark`       |

pub mod jsdoc;

use serde::Serialize;

use crate::error::ProcessError;

pub use jsdoc::{JsdocComment, JsdocTag, parse_jsdoc};

/// Marker inserted between the lines of a multi-line comment.
pub const LINE_BREAK: &str = "<br>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    Regular,
    Jsdoc,
    Ignore,
    Markdown,
}

/// A comment ready for the comment column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedComment {
    pub kind: CommentKind,
    /// Shaped text; lines are separated by [`LINE_BREAK`].
    pub text: String,
    /// Structured form, present only for `Jsdoc` comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsdocComment>,
}

impl ClassifiedComment {
    /// Whether `next` can be folded into this comment as extra lines.
    pub fn can_absorb(&self, next: &ClassifiedComment) -> bool {
        self.kind == next.kind && self.kind != CommentKind::Jsdoc
    }

    /// Append `next` as further lines of this comment.
    pub fn absorb(&mut self, next: ClassifiedComment) {
        self.text.push_str(LINE_BREAK);
        self.text.push_str(&next.text);
    }

    /// The text split back into its lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split(LINE_BREAK)
    }
}

/// Classify a raw comment body (the text between the comment delimiters).
pub fn classify(body: &str) -> Result<ClassifiedComment, ProcessError> {
    let comment = match body.chars().next() {
        Some('*') => {
            let doc = parse_jsdoc(body)?;
            ClassifiedComment {
                kind: CommentKind::Jsdoc,
                text: doc.render(),
                jsdoc: Some(doc),
            }
        }
        Some('!') => shaped(CommentKind::Ignore, &body[1..]),
        Some('$') => shaped(CommentKind::Markdown, &body[1..]),
        _ => shaped(CommentKind::Regular, body),
    };
    Ok(comment)
}

fn shaped(kind: CommentKind, body: &str) -> ClassifiedComment {
    ClassifiedComment {
        kind,
        text: shape_text(body),
        jsdoc: None,
    }
}

/// Normalise a comment body for display.
///
/// A single line is trimmed. For several lines, a blank first line and a blank
/// last line (the decoration of a `/* ... */` block) are dropped; if that
/// leaves one line it is trimmed, otherwise the lines are joined with
/// [`LINE_BREAK`] with their indentation untouched.
pub fn shape_text(body: &str) -> String {
    let mut lines: Vec<&str> = body
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect();

    if lines.len() == 1 {
        return lines[0].trim().to_string();
    }

    if is_blank(lines[0]) {
        lines.remove(0);
    }
    if lines.len() == 1 {
        return lines[0].trim().to_string();
    }

    if lines.last().is_some_and(|line| is_blank(line)) {
        lines.pop();
    }
    if lines.len() == 1 {
        return lines[0].trim().to_string();
    }

    lines.join(LINE_BREAK)
}

/// True when `text` holds nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Byte index of the first non-whitespace character, if any.
pub fn first_non_whitespace(text: &str) -> Option<usize> {
    text.find(|c: char| !c.is_whitespace())
}
