use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::error::{HighlightError, ParseError};
use crate::highlight::Highlighter;
use crate::models::{Location, NodeKind, RawComment, SourceParser, SyntaxNode};

/// Create a temporary directory for test files
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file (and its parent directories) with content
pub fn create_test_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Returns the code untouched.
pub struct IdentityHighlighter;

impl Highlighter for IdentityHighlighter {
    fn highlight(&self, _language: &str, code: &str) -> Result<String, HighlightError> {
        Ok(code.to_string())
    }
}

/// Drops the last line, breaking the line-count contract.
pub struct LossyHighlighter;

impl Highlighter for LossyHighlighter {
    fn highlight(&self, _language: &str, code: &str) -> Result<String, HighlightError> {
        let mut lines: Vec<&str> = code.split('\n').collect();
        lines.pop();
        Ok(lines.join("\n"))
    }
}

/// Minimal front end: every line whose first non-blank characters are `//`
/// becomes a leading comment of the program. A line containing `@@` is a
/// syntax error and a line starting with `<` is an unsupported construct.
pub struct LineCommentParser;

impl SourceParser for LineCommentParser {
    fn language(&self) -> &str {
        "javascript"
    }

    fn parse(&self, text: &str) -> Result<SyntaxNode, ParseError> {
        let mut comments = Vec::new();
        let mut children = Vec::new();
        let mut last = (1, 0);

        for (index, line) in text.split('\n').enumerate() {
            let number = index + 1;
            last = (number, line.len());
            if let Some(column) = line.find("@@") {
                return Err(ParseError {
                    line: number,
                    column,
                    message: "unexpected token".to_string(),
                });
            }
            let trimmed = line.trim_start();
            let column = line.len() - trimmed.len();
            if let Some(body) = trimmed.strip_prefix("//") {
                comments.push(RawComment::new(
                    body,
                    Location::new(number, column, number, line.len()),
                ));
            } else if trimmed.starts_with('<') {
                children.push(SyntaxNode::new(
                    NodeKind::Unrecognized("jsx_element".to_string()),
                    Location::new(number, column, number, line.len()),
                ));
            }
        }

        Ok(
            SyntaxNode::new(NodeKind::Program, Location::new(1, 0, last.0, last.1))
                .with_leading(comments)
                .with_children(children),
        )
    }
}
