use glob::{MatchOptions, Pattern};
use log::debug;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

/// Files picked up when no include pattern is given.
pub const DEFAULT_INCLUDE: &str = "**/*.js";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Include/exclude glob patterns, matched against paths relative to the
/// documentation root.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl Default for SourceFilter {
    fn default() -> Self {
        Self {
            include: Pattern::new(DEFAULT_INCLUDE).into_iter().collect(),
            exclude: Vec::new(),
        }
    }
}

impl SourceFilter {
    /// Build a filter from pattern strings. An empty include list means
    /// [`DEFAULT_INCLUDE`].
    pub fn new<I, E>(include: I, exclude: E) -> Result<Self, IoError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let mut include = compile(include)?;
        if include.is_empty() {
            include = compile([DEFAULT_INCLUDE])?;
        }
        Ok(Self {
            include,
            exclude: compile(exclude)?,
        })
    }

    /// Add an exclusion after construction, e.g. the output directory.
    pub fn exclude_path(&mut self, relative: &RelativePath) -> Result<(), IoError> {
        let escaped = Pattern::escape(relative.as_str());
        self.exclude.push(compile_one(&escaped)?);
        self.exclude.push(compile_one(&format!("{escaped}/**"))?);
        Ok(())
    }

    pub fn is_excluded(&self, relative: &RelativePath) -> bool {
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_with(relative.as_str(), MATCH_OPTIONS))
    }

    /// Included and not excluded.
    pub fn accepts(&self, relative: &RelativePath) -> bool {
        !self.is_excluded(relative)
            && self
                .include
                .iter()
                .any(|pattern| pattern.matches_with(relative.as_str(), MATCH_OPTIONS))
    }
}

fn compile<I>(patterns: I) -> Result<Vec<Pattern>, IoError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| compile_one(pattern.as_ref()))
        .collect()
}

fn compile_one(pattern: &str) -> Result<Pattern, IoError> {
    Pattern::new(pattern).map_err(|e| IoError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })
}

/// Path of `path` relative to `root`, using `/` separators.
pub fn relative_to(path: &Path, root: &Path) -> Option<RelativePathBuf> {
    let stripped = path.strip_prefix(root).ok()?;
    RelativePathBuf::from_path(stripped).ok()
}

/// Find the source files under `input` that pass `filter`.
///
/// `input` may be a single file or a directory. Paths are returned relative to
/// `root`, sorted. Symlinks are skipped and excluded directories are not
/// entered.
pub fn discover_source_files(
    input: &Path,
    root: &Path,
    filter: &SourceFilter,
) -> Result<Vec<RelativePathBuf>, IoError> {
    let metadata = fs::symlink_metadata(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IoError::NotFound(input.to_path_buf()),
        _ => IoError::Io(e),
    })?;

    let mut files = Vec::new();
    if metadata.is_dir() {
        scan_directory_recursive(input, root, filter, &mut files)?;
    } else if metadata.is_file()
        && let Some(relative) = relative_to(input, root)
        && filter.accepts(&relative)
    {
        files.push(relative);
    }

    files.sort();
    Ok(files)
}

fn scan_directory_recursive(
    dir: &Path,
    root: &Path,
    filter: &SourceFilter,
    files: &mut Vec<RelativePathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let file_type = entry.file_type().map_err(IoError::Io)?;
        let path = entry.path();
        let Some(relative) = relative_to(&path, root) else {
            continue;
        };

        if file_type.is_symlink() {
            debug!("skipping symlink {relative}");
        } else if file_type.is_dir() {
            if filter.is_excluded(&relative) {
                debug!("skipping excluded directory {relative}");
            } else {
                scan_directory_recursive(&path, root, filter, files)?;
            }
        } else if filter.accepts(&relative) {
            files.push(relative);
        }
    }

    Ok(())
}

/// Read a source file and return its content
pub fn read_source(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content under the output directory
pub fn write_output(
    relative_path: &RelativePath,
    output: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(output);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Copy every non-`.html` file of a template directory into `output`,
/// keeping the directory structure. The `.html` files are page templates,
/// read rather than published. Returns the number of files copied.
pub fn copy_assets(template: &Path, output: &Path) -> Result<usize, IoError> {
    if !template.is_dir() {
        return Err(IoError::NotFound(template.to_path_buf()));
    }
    fs::create_dir_all(output).map_err(IoError::Io)?;

    let mut copied = 0;
    for entry in fs::read_dir(template).map_err(IoError::Io)? {
        let entry = entry.map_err(IoError::Io)?;
        let file_type = entry.file_type().map_err(IoError::Io)?;
        let path = entry.path();
        let target = output.join(entry.file_name());

        if file_type.is_dir() {
            copied += copy_assets(&path, &target)?;
        } else if file_type.is_file()
            && path.extension().is_none_or(|ext| ext != "html")
        {
            fs::copy(&path, &target).map_err(IoError::Io)?;
            copied += 1;
        }
    }

    Ok(copied)
}
