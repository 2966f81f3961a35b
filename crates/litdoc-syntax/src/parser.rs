use litdoc_engine::{Location, ParseError, RawComment, SourceParser, SyntaxNode};
use log::debug;
use tree_sitter::{Node, Parser};

use crate::kinds::node_kind;

/// JavaScript front end backed by tree-sitter.
///
/// Comments are attached the classic way: a comment is added to the trailing
/// list of the named sibling before it and to the leading list of the named
/// sibling after it. A node with no named children keeps its comments in both
/// of its own lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptParser;

impl JavaScriptParser {
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for JavaScriptParser {
    fn language(&self) -> &str {
        "javascript"
    }

    fn parse(&self, text: &str) -> Result<SyntaxNode, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|e| ParseError {
                line: 1,
                column: 0,
                message: format!("failed to load JavaScript grammar: {e}"),
            })?;

        let tree = parser.parse(text, None).ok_or_else(|| ParseError {
            line: 1,
            column: 0,
            message: "parser produced no tree".to_string(),
        })?;
        let root = tree.root_node();

        if root.has_error()
            && let Some(node) = first_error(root)
        {
            let position = node.start_position();
            let message = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                format!("unexpected `{}`", snippet(&node, text))
            };
            return Err(ParseError {
                line: position.row + 1,
                column: position.column,
                message,
            });
        }

        let program = convert(root, text);
        debug!("parsed {} top-level node(s)", program.children.len());
        Ok(program)
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

/// First line of a node's text, shortened for error messages.
fn snippet<'a>(node: &Node<'_>, source: &'a str) -> &'a str {
    let text = source.get(node.byte_range()).unwrap_or_default();
    let line = text.lines().next().unwrap_or_default();
    match line.char_indices().nth(24) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

fn location(node: &Node<'_>) -> Location {
    let start = node.start_position();
    let end = node.end_position();
    Location::new(start.row + 1, start.column, end.row + 1, end.column)
}

fn convert(node: Node<'_>, source: &str) -> SyntaxNode {
    let kind = node_kind(node.kind());
    let mut converted = SyntaxNode::new(kind, location(&node));
    if converted.kind.is_leaf() {
        return converted;
    }

    let mut children: Vec<SyntaxNode> = Vec::new();
    let mut pending: Vec<RawComment> = Vec::new();
    let mut cursor = node.walk();

    for child in node.named_children(&mut cursor) {
        if child.kind() == "comment" {
            let comment = raw_comment(&child, source);
            if let Some(previous) = children.last_mut() {
                previous.trailing_comments.push(comment.clone());
            }
            pending.push(comment);
        } else {
            let mut next = convert(child, source);
            if !pending.is_empty() {
                pending.append(&mut next.leading_comments);
                next.leading_comments = std::mem::take(&mut pending);
            }
            children.push(next);
        }
    }

    if children.is_empty() && !pending.is_empty() {
        converted.trailing_comments = pending.clone();
        converted.leading_comments = pending;
    }
    converted.children = children;
    converted
}

/// Strip the delimiters from a comment node. A stray `\r` at the end of a
/// `//` comment is not part of the comment.
fn raw_comment(node: &Node<'_>, source: &str) -> RawComment {
    let mut location = location(node);
    let raw = source.get(node.byte_range()).unwrap_or_default();

    let body = if let Some(line) = raw.strip_prefix("//") {
        let trimmed = line.trim_end_matches('\r');
        location.end.column -= line.len() - trimmed.len();
        trimmed
    } else {
        raw.strip_prefix("/*")
            .and_then(|rest| rest.strip_suffix("*/"))
            .unwrap_or(raw)
    };

    RawComment::new(body, location)
}
