//! Structured (`/** ... */`) comment parsing.
//!
//! A structured comment is a free-text description followed by `@tag` lines:
//!
//! ```text
//! /**
//!  * test() function
//!  * @param {object} param1 important value
//!  */
//! ```
//!
//! Only bare (optionally dotted) type names are understood inside `{...}`.
//! Unions, generics, function types and friends fail loudly with
//! [`ProcessError::UnsupportedTagType`] rather than producing a wrong type
//! string.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ProcessError;

use super::LINE_BREAK;

/// Tags whose first word after the type is a name.
const NAMED_TAGS: &[&str] = &["param", "arg", "argument", "property", "prop"];

/// Tags that may carry a `{type}`. On any other tag braces are plain text.
const TYPED_TAGS: &[&str] = &[
    "param",
    "arg",
    "argument",
    "property",
    "prop",
    "returns",
    "return",
    "throws",
    "exception",
    "type",
    "yields",
    "typedef",
];

/// One `@tag` of a structured comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsdocTag {
    /// Tag title without the `@`, e.g. `param`.
    pub title: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub description: String,
}

/// A parsed structured comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsdocComment {
    pub description: String,
    pub tags: Vec<JsdocTag>,
}

impl JsdocComment {
    /// Flat text form: the description followed by one
    /// `name<TAB>type<TAB>description` line per tag.
    pub fn render(&self) -> String {
        let mut text = self.description.clone();
        for tag in &self.tags {
            text.push_str(LINE_BREAK);
            text.push_str(tag.name.as_deref().unwrap_or_default());
            text.push('\t');
            text.push_str(tag.type_name.as_deref().unwrap_or_default());
            text.push('\t');
            text.push_str(&tag.description);
        }
        text
    }
}

/// Parse the body of a `/** ... */` comment (the text between `/*` and `*/`).
pub fn parse_jsdoc(body: &str) -> Result<JsdocComment, ProcessError> {
    let mut description_lines: Vec<&str> = Vec::new();
    let mut raw_tags: Vec<String> = Vec::new();

    for line in body.split('\n').map(unwrap_line) {
        if line.starts_with('@') {
            raw_tags.push(line.to_string());
        } else if let Some(current) = raw_tags.last_mut() {
            current.push('\n');
            current.push_str(line);
        } else {
            description_lines.push(line);
        }
    }

    let tags = raw_tags
        .iter()
        .map(|raw| parse_tag(raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(JsdocComment {
        description: description_lines.join("\n").trim().to_string(),
        tags,
    })
}

/// Strip the decorative ` * ` gutter from one line of a structured comment.
fn unwrap_line(line: &str) -> &str {
    let line = line.trim_end_matches('\r').trim_start();
    let line = line.strip_prefix('*').unwrap_or(line);
    line.strip_prefix(' ').unwrap_or(line)
}

fn parse_tag(raw: &str) -> Result<JsdocTag, ProcessError> {
    let after_at = &raw[1..];
    let title_len = after_at
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(after_at.len());
    let title = after_at[..title_len].to_string();
    let mut rest = skip_spaces(&after_at[title_len..]);

    let mut type_name = None;
    if TYPED_TAGS.contains(&title.as_str()) && rest.starts_with('{') {
        let (expression, remainder) = split_type_expression(&title, rest)?;
        if !is_name_expression(expression) {
            return Err(ProcessError::UnsupportedTagType {
                tag: title,
                expression: expression.to_string(),
            });
        }
        type_name = Some(expression.to_string());
        rest = skip_spaces(remainder);
    }

    let mut name = None;
    if NAMED_TAGS.contains(&title.as_str()) && !rest.is_empty() && !rest.starts_with('\n') {
        let end = name_end(rest);
        name = Some(clean_name(&rest[..end]));
        rest = skip_spaces(&rest[end..]);
    }

    let description = rest.strip_prefix("- ").unwrap_or(rest).trim().to_string();

    Ok(JsdocTag {
        title,
        name,
        type_name,
        description,
    })
}

/// Split `{expr} remainder` at the brace matching the opening one.
fn split_type_expression<'a>(
    title: &str,
    text: &'a str,
) -> Result<(&'a str, &'a str), ProcessError> {
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((text[1..idx].trim(), &text[idx + 1..]));
                }
            }
            _ => {}
        }
    }
    Err(ProcessError::UnsupportedTagType {
        tag: title.to_string(),
        expression: text.to_string(),
    })
}

/// Spaces and tabs only; a line break ends the tag's first line.
fn skip_spaces(text: &str) -> &str {
    text.trim_start_matches([' ', '\t'])
}

/// End of the name token. An optional `[name=some default]` runs to its
/// closing bracket, spaces included.
fn name_end(text: &str) -> usize {
    if text.starts_with('[') {
        let mut depth = 0usize;
        for (idx, c) in text.char_indices() {
            match c {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        return idx + 1;
                    }
                }
                '\n' => return idx,
                _ => {}
            }
        }
    }
    text.find(char::is_whitespace).unwrap_or(text.len())
}

/// `[name=default]` and `[name]` mark optional parameters; keep just the name.
fn clean_name(token: &str) -> String {
    let token = token
        .strip_prefix('[')
        .map(|inner| inner.strip_suffix(']').unwrap_or(inner))
        .unwrap_or(token);
    token.split('=').next().unwrap_or(token).to_string()
}

fn is_name_expression(expression: &str) -> bool {
    static NAME_EXPRESSION: OnceLock<Regex> = OnceLock::new();
    let regex = NAME_EXPRESSION.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*$").expect("Invalid name regex")
    });
    regex.is_match(expression)
}
