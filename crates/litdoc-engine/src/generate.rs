//! A documentation run over one or more inputs.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use relative_path::RelativePath;

use crate::alignment::{DocumentedSource, SourceModel};
use crate::error::ProcessError;
use crate::highlight::Highlighter;
use crate::io::{self, IoError, SourceFilter};
use crate::models::{SourceFile, SourceParser};
use crate::render::{
    DEFAULT_PAGE_TEMPLATE, DEFAULT_STYLESHEET, PAGE_TEMPLATE_NAME, PageContext, PageTemplate,
    STYLESHEET_NAME,
};

/// What to document and where to put it.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Files or directories to document.
    pub inputs: Vec<PathBuf>,
    /// Output directory; defaults to `docs` next to each input.
    pub output: Option<PathBuf>,
    pub filter: SourceFilter,
    pub footer: Option<String>,
    /// Template directory: its `page.html` renders every page and its other
    /// files are copied into the output.
    pub template: Option<PathBuf>,
}

/// Why a single file was left out of the documentation.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("could not read source: {0}")]
    Read(#[from] IoError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("could not render page: {0}")]
    Render(#[from] minijinja::Error),
}

#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: FileError,
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Pages written, as absolute paths.
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

/// Drives parse, alignment, highlighting and rendering for every source file.
pub struct Generator<'a> {
    parser: &'a dyn SourceParser,
    highlighter: &'a dyn Highlighter,
}

impl<'a> Generator<'a> {
    pub fn new(parser: &'a dyn SourceParser, highlighter: &'a dyn Highlighter) -> Self {
        Self {
            parser,
            highlighter,
        }
    }

    /// Parse and align one file's text.
    pub fn document_source(&self, text: &str) -> Result<DocumentedSource, ProcessError> {
        let tree = self.parser.parse(text)?;
        SourceModel::new(text).build(&tree, self.parser.language(), self.highlighter)
    }

    /// Render the page for one discovered file.
    pub fn render_file(
        &self,
        file: &SourceFile,
        root: &Path,
        page: &PageTemplate<'_>,
        footer: Option<&str>,
    ) -> Result<String, FileError> {
        let text = io::read_source(file.relative_path(), root)?;
        let doc = self.document_source(&text)?;
        let context = PageContext {
            title: file.title().to_string(),
            root_link: file.root_link(),
            footer: footer.map(str::to_string),
        };
        Ok(page.render(&doc, &context)?)
    }

    /// Document every input. Per-file failures are logged and collected in
    /// the summary; anything that stops the output from being produced at
    /// all is returned as an error.
    pub fn run(&self, options: &GenerateOptions) -> Result<RunSummary> {
        let source = page_template_source(options.template.as_deref())?;
        let page = PageTemplate::new(&source).context("Invalid page template")?;

        let mut summary = RunSummary::default();
        for input in &options.inputs {
            self.run_input(input, options, &page, &mut summary)?;
        }

        if !summary.skipped.is_empty() {
            warn!(
                "{} file(s) skipped, {} written",
                summary.skipped.len(),
                summary.written.len()
            );
        }
        Ok(summary)
    }

    fn run_input(
        &self,
        input: &Path,
        options: &GenerateOptions,
        page: &PageTemplate<'_>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let input = fs::canonicalize(input)
            .with_context(|| format!("Input not found: {}", input.display()))?;
        let root = input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input.clone());
        let output = match &options.output {
            Some(output) => std::path::absolute(output)
                .with_context(|| format!("Invalid output path: {}", output.display()))?,
            None => root.join("docs"),
        };

        info!("Documenting {} into {}", input.display(), output.display());

        fs::create_dir_all(&output)
            .with_context(|| format!("Failed to create output directory {}", output.display()))?;
        let output = fs::canonicalize(&output).unwrap_or(output);
        io::write_output(RelativePath::new(STYLESHEET_NAME), &output, DEFAULT_STYLESHEET)
            .context("Failed to write stylesheet")?;
        if let Some(template) = &options.template {
            let copied = io::copy_assets(template, &output).with_context(|| {
                format!("Failed to copy template assets from {}", template.display())
            })?;
            debug!("copied {copied} template asset(s)");
        }

        let mut filter = options.filter.clone();
        if let Some(relative) = io::relative_to(&output, &root) {
            filter.exclude_path(&relative)?;
        }

        let files = io::discover_source_files(&input, &root, &filter)
            .with_context(|| format!("Failed to scan {}", input.display()))?;
        debug!("found {} source file(s)", files.len());

        for relative in files {
            let file = SourceFile::new(relative);
            let source_path = file.relative_path().to_path(&root);

            match self.render_file(&file, &root, page, options.footer.as_deref()) {
                Ok(page) => {
                    io::write_output(file.page_path(), &output, &page).with_context(|| {
                        format!("Failed to write page for {}", source_path.display())
                    })?;
                    let page_path = file.page_path().to_path(&output);
                    info!("Wrote {}", page_path.display());
                    summary.written.push(page_path);
                }
                Err(err) => {
                    error!("Skipping {}: {err}", source_path.display());
                    summary.skipped.push(SkippedFile {
                        path: source_path,
                        error: err,
                    });
                }
            }
        }

        Ok(())
    }
}

/// The template directory's `page.html`, or the built-in page.
fn page_template_source(template: Option<&Path>) -> Result<Cow<'static, str>> {
    let Some(path) = template
        .map(|dir| dir.join(PAGE_TEMPLATE_NAME))
        .filter(|path| path.is_file())
    else {
        return Ok(Cow::Borrowed(DEFAULT_PAGE_TEMPLATE));
    };

    debug!("using page template {}", path.display());
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read page template {}", path.display()))?;
    Ok(Cow::Owned(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{IdentityHighlighter, LineCommentParser, create_test_dir, create_test_file};
    use pretty_assertions::assert_eq;

    fn generator() -> Generator<'static> {
        Generator::new(&LineCommentParser, &IdentityHighlighter)
    }

    #[test]
    fn test_document_source_aligns_comments() {
        let doc = generator()
            .document_source("// greet\nhello();")
            .unwrap();

        assert_eq!(doc.code_lines, vec![Some("hello();".to_string())]);
        assert_eq!(doc.comment_buckets[0].as_ref().unwrap()[0].text, "greet");
    }

    #[test]
    fn test_run_writes_pages_and_stylesheet() {
        // Given a project with two source files
        let dir = create_test_dir();
        create_test_file(&dir, "project/index.js", "// entry\nstart();");
        create_test_file(&dir, "project/lib/util.js", "help();");

        // When documenting the project directory
        let options = GenerateOptions {
            inputs: vec![dir.path().join("project")],
            footer: Some("footer text".to_string()),
            ..Default::default()
        };
        let summary = generator().run(&options).unwrap();

        // Then a page per file plus a stylesheet lands in <root>/docs
        let docs = dir.path().canonicalize().unwrap().join("docs");
        assert_eq!(summary.written.len(), 2);
        assert!(summary.skipped.is_empty());
        assert!(docs.join("style.css").exists());
        let index = fs::read_to_string(docs.join("project").join("index.html")).unwrap();
        assert!(index.contains("<title>project/index.js</title>"));
        assert!(index.contains("entry"));
        assert!(index.contains("footer text"));
        let util = fs::read_to_string(docs.join("project/lib/util.html")).unwrap();
        assert!(util.contains("href=\"../../style.css\""));
    }

    #[test]
    fn test_failing_files_are_skipped_and_the_run_continues() {
        let dir = create_test_dir();
        create_test_file(&dir, "src/broken.js", "x(@@);");
        create_test_file(&dir, "src/jsx.js", "<div/>");
        create_test_file(&dir, "src/fine.js", "ok();");
        let out = dir.path().join("out");

        let options = GenerateOptions {
            inputs: vec![dir.path().join("src")],
            output: Some(out.clone()),
            ..Default::default()
        };
        let summary = generator().run(&options).unwrap();

        assert_eq!(summary.written.len(), 1);
        assert!(out.join("src").join("fine.html").exists());
        assert!(!out.join("src").join("broken.html").exists());

        let mut skipped: Vec<_> = summary
            .skipped
            .iter()
            .map(|s| s.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        skipped.sort();
        assert_eq!(skipped, vec!["broken.js", "jsx.js"]);
        assert!(summary.skipped.iter().any(|s| matches!(
            s.error,
            FileError::Process(ProcessError::Parse(_))
        )));
        assert!(summary.skipped.iter().any(|s| matches!(
            s.error,
            FileError::Process(ProcessError::UnsupportedNodeKind { .. })
        )));
    }

    #[test]
    fn test_missing_input_aborts_the_run() {
        let dir = create_test_dir();
        let options = GenerateOptions {
            inputs: vec![dir.path().join("missing.js")],
            ..Default::default()
        };

        let err = generator().run(&options).unwrap_err();
        assert!(err.to_string().contains("Input not found"));
    }

    #[test]
    fn test_template_page_and_assets_are_used() {
        // Given a template directory with a page and a stylesheet
        let dir = create_test_dir();
        create_test_file(&dir, "app.js", "// starts\nrun();");
        create_test_file(&dir, "theme/style.css", "body { color: red; }");
        create_test_file(
            &dir,
            "theme/page.html",
            "<main>{{ title }}{% for line in lines %}[{{ line.comments }}|{{ line.code }}]{% endfor %}</main>",
        );
        let out = dir.path().join("site");

        // When documenting with that template
        let options = GenerateOptions {
            inputs: vec![dir.path().join("app.js")],
            output: Some(out.clone()),
            template: Some(dir.path().join("theme")),
            ..Default::default()
        };
        generator().run(&options).unwrap();

        // Then pages come from its page.html and the other files are copied
        assert_eq!(
            fs::read_to_string(out.join("app.html")).unwrap(),
            "<main>app.js[<div class=\"comment\">starts</div>|run();]</main>"
        );
        assert_eq!(
            fs::read_to_string(out.join("style.css")).unwrap(),
            "body { color: red; }"
        );
        assert!(!out.join("page.html").exists());
    }

    #[test]
    fn test_template_without_page_uses_the_built_in_one() {
        let dir = create_test_dir();
        create_test_file(&dir, "app.js", "run();");
        create_test_file(&dir, "theme/extra.css", "p {}");
        let out = dir.path().join("site");

        let options = GenerateOptions {
            inputs: vec![dir.path().join("app.js")],
            output: Some(out.clone()),
            template: Some(dir.path().join("theme")),
            ..Default::default()
        };
        generator().run(&options).unwrap();

        let page = fs::read_to_string(out.join("app.html")).unwrap();
        assert!(page.contains("<title>app.js</title>"));
        assert!(out.join("extra.css").exists());
    }

    #[test]
    fn test_broken_page_template_aborts_the_run() {
        let dir = create_test_dir();
        create_test_file(&dir, "app.js", "run();");
        create_test_file(&dir, "theme/page.html", "{% if title %}");

        let options = GenerateOptions {
            inputs: vec![dir.path().join("app.js")],
            output: Some(dir.path().join("site")),
            template: Some(dir.path().join("theme")),
            ..Default::default()
        };

        let err = generator().run(&options).unwrap_err();
        assert!(err.to_string().contains("Invalid page template"));
    }

    #[test]
    fn test_output_inside_the_input_is_not_rescanned() {
        let dir = create_test_dir();
        create_test_file(&dir, "src/a.js", "a();");
        create_test_file(&dir, "src/docs/old.js", "stale();");

        let options = GenerateOptions {
            inputs: vec![dir.path().join("src")],
            output: Some(dir.path().join("src").join("docs")),
            ..Default::default()
        };
        let summary = generator().run(&options).unwrap();

        assert_eq!(summary.written.len(), 1);
    }
}
