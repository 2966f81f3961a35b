pub mod alignment;
pub mod comments;
pub mod error;
pub mod generate;
pub mod highlight;
pub mod io;
pub mod models;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use alignment::{DocumentedLine, DocumentedSource, SourceModel};
pub use comments::{ClassifiedComment, CommentKind, JsdocComment, JsdocTag, LINE_BREAK, classify};
pub use error::{HighlightError, ParseError, ProcessError};
pub use generate::{FileError, GenerateOptions, Generator, RunSummary, SkippedFile};
pub use highlight::{DEFAULT_THEME, Highlighter, PlainHighlighter, SyntectHighlighter};
pub use io::{IoError, SourceFilter};
pub use models::*;
pub use render::{DEFAULT_PAGE_TEMPLATE, PageContext, PageTemplate, render_comment};
