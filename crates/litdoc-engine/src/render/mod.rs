//! HTML page rendering for a [`DocumentedSource`].
//!
//! Pages go through a minijinja template: the built-in `page.html`, or the
//! `page.html` of a template directory. The template sees `title`,
//! `root_path`, `footer` and `lines`, where each line has `number`,
//! `comments` and `code`. Everything handed to it is already HTML: code
//! cells hold highlighter markup, comment cells are escaped here unless they
//! are markdown.

use html_escape::{encode_double_quoted_attribute, encode_text};
use minijinja::{Environment, Value, context};
use pulldown_cmark::{Options, Parser, html};

use crate::alignment::{DocumentedLine, DocumentedSource};
use crate::comments::{ClassifiedComment, CommentKind, JsdocComment, LINE_BREAK};

/// Stylesheet written to the output root when no template supplies one.
pub const DEFAULT_STYLESHEET: &str = include_str!("style.css");

/// File name of the stylesheet at the output root.
pub const STYLESHEET_NAME: &str = "style.css";

/// Page template used when the template directory has none.
pub const DEFAULT_PAGE_TEMPLATE: &str = include_str!("page.html");

/// File name of the page template inside a template directory.
pub const PAGE_TEMPLATE_NAME: &str = "page.html";

/// Per-page values around the aligned lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Shown in the page title and heading; the relative source path.
    pub title: String,
    /// Relative path from the page to the output root, e.g. `".."`.
    pub root_link: String,
    pub footer: Option<String>,
}

/// A compiled page template.
pub struct PageTemplate<'source> {
    env: Environment<'source>,
}

impl<'source> PageTemplate<'source> {
    /// Compile `source`; syntax errors are reported here, not per page.
    pub fn new(source: &'source str) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE_NAME, source)?;
        Ok(Self { env })
    }

    /// Render a complete HTML page.
    pub fn render(
        &self,
        doc: &DocumentedSource,
        page: &PageContext,
    ) -> Result<String, minijinja::Error> {
        let lines: Vec<Value> = doc.lines().map(|line| line_value(&line)).collect();
        let footer = page
            .footer
            .as_deref()
            .map(|footer| Value::from_safe_string(encode_text(footer).into_owned()));

        self.env.get_template(PAGE_TEMPLATE_NAME)?.render(context! {
            title => Value::from_safe_string(encode_text(&page.title).into_owned()),
            root_path => Value::from_safe_string(
                encode_double_quoted_attribute(&page.root_link).into_owned()
            ),
            footer => footer,
            lines => lines,
        })
    }
}

fn line_value(line: &DocumentedLine<'_>) -> Value {
    let comments = line
        .comments
        .map(|comments| {
            comments
                .iter()
                .filter_map(render_comment)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    context! {
        number => line.number,
        comments => Value::from_safe_string(comments),
        code => Value::from_safe_string(line.code.unwrap_or_default().to_string()),
    }
}

/// HTML for one comment, or `None` for comments that are kept out of the docs.
pub fn render_comment(comment: &ClassifiedComment) -> Option<String> {
    match comment.kind {
        CommentKind::Ignore => None,
        CommentKind::Regular => Some(format!(
            "<div class=\"comment\">{}</div>",
            escape_lines(&comment.text)
        )),
        CommentKind::Markdown => Some(format!(
            "<div class=\"comment markdown\">{}</div>",
            render_markdown(&comment.text.replace(LINE_BREAK, "\n"))
        )),
        CommentKind::Jsdoc => Some(match &comment.jsdoc {
            Some(doc) => render_jsdoc(doc),
            None => format!(
                "<div class=\"comment jsdoc\">{}</div>",
                escape_lines(&comment.text)
            ),
        }),
    }
}

/// Escape each line-break separated piece and re-join with `<br>`.
fn escape_lines(text: &str) -> String {
    text.split(LINE_BREAK)
        .map(|piece| encode_text(piece).into_owned())
        .collect::<Vec<_>>()
        .join("<br>")
}

fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn render_jsdoc(doc: &JsdocComment) -> String {
    let description = if doc.description.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", encode_text(&doc.description).replace('\n', "<br>"))
    };

    let tags = if doc.tags.is_empty() {
        String::new()
    } else {
        let rows: String = doc
            .tags
            .iter()
            .map(|tag| {
                format!(
                    "<tr class=\"tag-{title}\"><td class=\"tag-name\">{name}</td>\
                     <td class=\"tag-type\">{type_name}</td>\
                     <td class=\"tag-description\">{description}</td></tr>",
                    title = encode_text(&tag.title),
                    name = encode_text(tag.name.as_deref().unwrap_or(&tag.title)),
                    type_name = encode_text(tag.type_name.as_deref().unwrap_or_default()),
                    description = encode_text(&tag.description).replace('\n', "<br>"),
                )
            })
            .collect();
        format!("<table class=\"tags\">{rows}</table>")
    };

    format!("<div class=\"comment jsdoc\">{description}{tags}</div>")
}
