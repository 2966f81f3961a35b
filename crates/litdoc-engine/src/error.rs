use thiserror::Error;

/// The source text could not be turned into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at {line}:{column}: {message}")]
pub struct ParseError {
    /// 1-based line of the first offending construct.
    pub line: usize,
    /// 0-based byte column of the first offending construct.
    pub column: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    #[error("No syntax definition for language '{0}'")]
    UnknownLanguage(String),
    #[error("Unknown highlight theme '{0}'")]
    UnknownTheme(String),
    #[error("Highlighting failed: {0}")]
    Failed(String),
}

/// Everything that can go wrong while documenting a single file.
///
/// None of these are retried: given the same input they fail the same way.
/// The documentation run catches them at the file boundary, logs them and
/// skips the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Unsupported node kind '{kind}' at line {line}")]
    UnsupportedNodeKind { kind: String, line: usize },

    #[error("Unsupported type expression '{expression}' in @{tag} tag")]
    UnsupportedTagType { tag: String, expression: String },

    #[error("Alignment invariant violated: {0}")]
    AlignmentInvariantViolation(String),

    #[error(transparent)]
    Highlight(#[from] HighlightError),
}

impl ProcessError {
    pub(crate) fn alignment(message: impl Into<String>) -> Self {
        Self::AlignmentInvariantViolation(message.into())
    }
}
