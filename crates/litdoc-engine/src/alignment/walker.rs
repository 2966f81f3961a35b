use std::collections::HashSet;

use log::trace;

use crate::error::ProcessError;
use crate::models::{NodeKind, Position, RawComment, SyntaxNode};

use super::buffer::{CommentBuckets, LineBuffer};
use super::own_line::is_own_line;
use super::splice::LineSplicer;

/// Which side of its node a comment group sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Leading,
    Trailing,
}

/// Depth-first walk over a syntax tree that pulls every comment out of the
/// line buffer, in source order.
///
/// Leading groups only take comments that start their own line; trailing
/// groups only take comments that follow code on the same line. A front end
/// may attach one comment to two nodes, so extracted comments are remembered
/// by start position and never routed twice.
pub struct TreeWalker<'a> {
    buffer: &'a mut LineBuffer,
    buckets: &'a mut CommentBuckets,
    extracted: HashSet<Position>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(buffer: &'a mut LineBuffer, buckets: &'a mut CommentBuckets) -> Self {
        Self {
            buffer,
            buckets,
            extracted: HashSet::new(),
        }
    }

    pub fn walk(&mut self, node: &SyntaxNode) -> Result<(), ProcessError> {
        if let NodeKind::Unrecognized(kind) = &node.kind {
            return Err(ProcessError::UnsupportedNodeKind {
                kind: kind.clone(),
                line: node.location.start.line,
            });
        }

        trace!("visiting {:?} at line {}", node.kind, node.location.start.line);

        self.route_group(node, &node.leading_comments, Side::Leading)?;
        if !node.kind.is_leaf() {
            for child in &node.children {
                self.walk(child)?;
            }
        }
        self.route_group(node, &node.trailing_comments, Side::Trailing)
    }

    fn route_group(
        &mut self,
        node: &SyntaxNode,
        comments: &[RawComment],
        side: Side,
    ) -> Result<(), ProcessError> {
        if comments.is_empty() {
            return Ok(());
        }

        let mut splicer = LineSplicer::new(self.buffer, self.buckets, node.location);
        for comment in comments {
            if self.extracted.contains(&comment.location.start) {
                continue;
            }
            let own_line = is_own_line(comment, splicer.buffer())?;
            let wanted = match side {
                Side::Leading => own_line,
                Side::Trailing => !own_line,
            };
            if wanted {
                splicer.apply(comment)?;
                self.extracted.insert(comment.location.start);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::buffer::Slot;
    use crate::models::Location;
    use pretty_assertions::assert_eq;

    fn walk(source: &str, tree: &SyntaxNode) -> Result<(LineBuffer, CommentBuckets), ProcessError> {
        let mut buffer = LineBuffer::from_source(source);
        let mut buckets = CommentBuckets::new();
        TreeWalker::new(&mut buffer, &mut buckets).walk(tree)?;
        Ok((buffer, buckets))
    }

    fn code(buffer: &LineBuffer) -> Vec<Option<&str>> {
        buffer.slots().iter().map(Slot::code).collect()
    }

    fn statement(line: usize, end_column: usize) -> SyntaxNode {
        SyntaxNode::new(NodeKind::ExpressionStatement, Location::new(line, 0, line, end_column))
    }

    #[test]
    fn shared_comment_is_routed_once() {
        // x(); //a
        // y();
        let source = "x(); //a\ny();";
        let comment = RawComment::new("a", Location::new(1, 5, 1, 8));
        let tree = SyntaxNode::new(NodeKind::Program, Location::new(1, 0, 2, 4)).with_children(vec![
            statement(1, 4).with_trailing(vec![comment.clone()]),
            statement(2, 4).with_leading(vec![comment]),
        ]);

        let (buffer, buckets) = walk(source, &tree).unwrap();
        assert_eq!(code(&buffer), vec![Some("x(); "), Some("y();")]);
        assert_eq!(buckets.get(0).unwrap().len(), 1);
        assert_eq!(buckets.get(1), None);
    }

    #[test]
    fn own_line_comment_is_left_to_the_next_node() {
        let source = "x();\n//a\ny();";
        let comment = RawComment::new("a", Location::new(2, 0, 2, 3));
        let tree = SyntaxNode::new(NodeKind::Program, Location::new(1, 0, 3, 4)).with_children(vec![
            statement(1, 4).with_trailing(vec![comment.clone()]),
            statement(3, 4).with_leading(vec![comment]),
        ]);

        let (buffer, buckets) = walk(source, &tree).unwrap();
        assert_eq!(code(&buffer), vec![Some("x();"), Some("y();")]);
        assert_eq!(buckets.get(1).unwrap()[0].text, "a");
    }

    #[test]
    fn comment_in_empty_block_is_routed_once() {
        // function f() {
        //     //nothing here
        // }
        let source = "function f() {\n    //nothing here\n}";
        let comment = RawComment::new("nothing here", Location::new(2, 4, 2, 18));
        let block = SyntaxNode::new(NodeKind::StatementBlock, Location::new(1, 13, 3, 1))
            .with_leading(vec![comment.clone()])
            .with_trailing(vec![comment]);
        let function = SyntaxNode::new(NodeKind::FunctionDeclaration, Location::new(1, 0, 3, 1))
            .with_children(vec![block]);
        let tree =
            SyntaxNode::new(NodeKind::Program, Location::new(1, 0, 3, 1)).with_children(vec![function]);

        let (buffer, buckets) = walk(source, &tree).unwrap();
        assert_eq!(code(&buffer), vec![Some("function f() {"), Some("}")]);
        assert_eq!(buckets.get(1).unwrap()[0].text, "nothing here");
    }

    #[test]
    fn leaf_children_are_not_visited() {
        let source = "x;";
        let hidden = SyntaxNode::new(
            NodeKind::Unrecognized("ghost".to_string()),
            Location::new(1, 0, 1, 1),
        );
        let leaf = SyntaxNode::new(NodeKind::Identifier, Location::new(1, 0, 1, 1))
            .with_children(vec![hidden]);
        let tree = SyntaxNode::new(NodeKind::Program, Location::new(1, 0, 1, 2))
            .with_children(vec![statement(1, 2).with_children(vec![leaf])]);

        let (buffer, buckets) = walk(source, &tree).unwrap();
        assert_eq!(code(&buffer), vec![Some("x;")]);
        assert!(buckets.is_empty());
    }

    #[test]
    fn unrecognized_kind_fails_with_its_line() {
        let source = "a;\n<div/>;";
        let tree = SyntaxNode::new(NodeKind::Program, Location::new(1, 0, 2, 7)).with_children(vec![
            statement(1, 2),
            SyntaxNode::new(NodeKind::Unrecognized("jsx_element".to_string()), Location::new(2, 0, 2, 6)),
        ]);

        let err = walk(source, &tree).unwrap_err();
        assert_eq!(
            err,
            ProcessError::UnsupportedNodeKind {
                kind: "jsx_element".to_string(),
                line: 2,
            }
        );
    }
}
