//! Turning code into HTML markup, one output line per input line.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;

use crate::error::HighlightError;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Produces HTML markup for a block of code.
///
/// Implementations must return exactly as many `\n`-separated lines as they
/// were given; the aligned comment column depends on it.
pub trait Highlighter {
    fn highlight(&self, language: &str, code: &str) -> Result<String, HighlightError>;
}

/// Escapes the code for HTML and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, _language: &str, code: &str) -> Result<String, HighlightError> {
        Ok(html_escape::encode_text(code).into_owned())
    }
}

/// Syntax highlighting with inline-styled spans.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    pub fn new() -> Result<Self, HighlightError> {
        Self::with_theme(DEFAULT_THEME)
    }

    /// Use one of syntect's bundled themes, e.g. `"base16-ocean.dark"`.
    pub fn with_theme(name: &str) -> Result<Self, HighlightError> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(name)
            .ok_or_else(|| HighlightError::UnknownTheme(name.to_string()))?;
        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Names of the bundled themes.
    pub fn theme_names() -> Vec<String> {
        ThemeSet::load_defaults().themes.into_keys().collect()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, language: &str, code: &str) -> Result<String, HighlightError> {
        let syntax = self
            .syntaxes
            .find_syntax_by_token(language)
            .ok_or_else(|| HighlightError::UnknownLanguage(language.to_string()))?;
        let mut lines = HighlightLines::new(syntax, &self.theme);

        let mut html = Vec::new();
        for line in code.split('\n') {
            let with_newline = format!("{line}\n");
            let regions = lines
                .highlight_line(&with_newline, &self.syntaxes)
                .map_err(|e| HighlightError::Failed(e.to_string()))?;
            let regions: Vec<(Style, &str)> = regions
                .into_iter()
                .map(|(style, text)| (style, text.trim_end_matches('\n')))
                .filter(|(_, text)| !text.is_empty())
                .collect();
            let markup = styled_line_to_highlighted_html(&regions, IncludeBackground::No)
                .map_err(|e| HighlightError::Failed(e.to_string()))?;
            html.push(markup);
        }
        Ok(html.join("\n"))
    }
}
