//! Comment extraction and line alignment.
//!
//! The source is held as a buffer of lines. Walking the syntax tree in source
//! order, each comment is cut out of the buffer and filed into a bucket keyed
//! by the buffer index it ends up next to. Lines that only held a comment are
//! spliced out, so the parser's original line numbers are translated through
//! the running count of removed lines.

pub mod buffer;
pub mod own_line;
pub mod source_model;
pub mod splice;
pub mod walker;

pub use buffer::{CommentBuckets, LineBuffer, Slot};
pub use own_line::is_own_line;
pub use source_model::{DocumentedLine, DocumentedSource, SourceModel};
pub use splice::LineSplicer;
pub use walker::TreeWalker;
