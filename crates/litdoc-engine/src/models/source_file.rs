use relative_path::{RelativePath, RelativePathBuf};

/// A discovered source file, addressed relative to the documentation root.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    relative_path: RelativePathBuf,
    page_path: RelativePathBuf,
}

impl SourceFile {
    /// Create a new SourceFile from a path relative to the documentation root
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let page_path = relative_path.with_extension("html");
        Self {
            relative_path,
            page_path,
        }
    }

    /// Create from a relative path string
    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    /// Path of the source relative to the documentation root
    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// Path of the generated page relative to the output directory
    pub fn page_path(&self) -> &RelativePath {
        &self.page_path
    }

    /// Page title: the relative source path
    pub fn title(&self) -> &str {
        self.relative_path.as_str()
    }

    /// Relative link from the page back to the output root (`"."` at the top level).
    pub fn root_link(&self) -> String {
        let depth = self
            .page_path
            .parent()
            .map(|parent| parent.components().count())
            .unwrap_or(0);
        if depth == 0 {
            ".".to_string()
        } else {
            vec![".."; depth].join("/")
        }
    }
}

impl From<RelativePathBuf> for SourceFile {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for SourceFile {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}
