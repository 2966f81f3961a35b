pub mod source_file;
pub mod syntax_tree;

pub use source_file::SourceFile;
pub use syntax_tree::{Location, NodeKind, Position, RawComment, SourceParser, SyntaxNode};
