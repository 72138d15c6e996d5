//! Output formats
//!
//!     A parsed [`Document`] can be rendered to three output dialects, selected with the
//!     closed [`Format`] enum:
//!
//!         rich        HTML-like inline tags (`<b>`, `<i>`, `<pre><code>`, ...)
//!         strict      the escaping-heavy chat dialect checked by [`crate::validation`]
//!         normalized  canonical Markdown that parses back to the same document
//!
//!     Every renderer implements the one [`Render`] capability: a pure function from a
//!     document to a string. Renderers hold no state between calls.
//!
//!     The [treeviz](treeviz) and [inspect](inspect) modules hold the debugging views of the
//!     AST and token stream used by the command line tool.

pub mod inspect;
pub mod normalized;
pub mod rich;
pub mod strict;
pub mod treeviz;

pub use inspect::{to_json_str, to_tokens_str, View};
pub use normalized::NormalizedRenderer;
pub use rich::RichRenderer;
pub use strict::StrictRenderer;
pub use treeviz::to_treeviz_str;

use crate::ast::Document;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format '{0}' not found (expected one of: rich, strict, normalized)")]
    NotFound(String),
    #[error("view '{0}' not found (expected one of: treeviz, json, tokens)")]
    ViewNotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Common contract of all renderers
pub trait Render {
    fn render(&self, document: &Document) -> String;
}

/// Options shared by the renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Marker for unordered list items in the rich and strict dialects
    pub bullet: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bullet: "•".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Format {
    Rich,
    Strict,
    Normalized,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Rich, Format::Strict, Format::Normalized];

    pub fn name(self) -> &'static str {
        match self {
            Format::Rich => "rich",
            Format::Strict => "strict",
            Format::Normalized => "normalized",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Format::Rich => &["html"],
            Format::Strict => &["markdownv2", "mdv2"],
            Format::Normalized => &["markdown", "md"],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Format::Rich => "Rich text with HTML-like inline tags",
            Format::Strict => "Strict chat dialect with every reserved character escaped",
            Format::Normalized => "Canonical Markdown",
        }
    }

    pub fn render(self, document: &Document, options: &RenderOptions) -> String {
        match self {
            Format::Rich => RichRenderer::new(options).render(document),
            Format::Strict => StrictRenderer::new(options).render(document),
            Format::Normalized => NormalizedRenderer.render(document),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Format::ALL
            .into_iter()
            .find(|format| format.name() == wanted || format.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| FormatError::NotFound(s.to_string()))
    }
}

impl TryFrom<String> for Format {
    type Error = FormatError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Line rules of a dialect's rendered blocks, as seen by [`hang_indent`]
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    /// Lines starting with `>` stay at the start of the line
    pub keep_quotes: bool,
    /// Line opening a multi-line code block. Lines after it are copied as they are up to
    /// and including the line for which `code_closes` holds.
    pub code_opens: fn(&str) -> bool,
    pub code_closes: fn(&str) -> bool,
    /// Whether the opening line of a code block is indented
    pub indent_code_opener: bool,
}

impl Layout {
    /// Every line is indented.
    pub const PLAIN: Layout = Layout {
        keep_quotes: false,
        code_opens: never,
        code_closes: never,
        indent_code_opener: true,
    };
}

fn never(_line: &str) -> bool {
    false
}

/// Indent every line after the first by `width` spaces, leaving empty lines empty.
///
/// Code block interiors and, with `keep_quotes`, quote lines are left alone.
pub(crate) fn hang_indent(body: &str, width: usize, layout: &Layout) -> String {
    let pad = " ".repeat(width);
    let mut out = String::with_capacity(body.len());
    let mut in_code = false;
    for (i, line) in body.split('\n').enumerate() {
        let opens = !in_code && (layout.code_opens)(line);
        if i > 0 {
            out.push('\n');
            let indented = if in_code {
                false
            } else if opens {
                layout.indent_code_opener
            } else {
                !(layout.keep_quotes && line.starts_with('>'))
            };
            if indented && !line.is_empty() {
                out.push_str(&pad);
            }
        }
        out.push_str(line);
        if opens {
            in_code = true;
        } else if in_code && (layout.code_closes)(line) {
            in_code = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_and_aliases() {
        assert_eq!("rich".parse::<Format>(), Ok(Format::Rich));
        assert_eq!("HTML".parse::<Format>(), Ok(Format::Rich));
        assert_eq!("mdv2".parse::<Format>(), Ok(Format::Strict));
        assert_eq!(" md ".parse::<Format>(), Ok(Format::Normalized));
        assert_eq!(
            "latex".parse::<Format>(),
            Err(FormatError::NotFound("latex".to_string()))
        );
    }

    #[test]
    fn test_every_format_round_trips_its_name() {
        for format in Format::ALL {
            assert_eq!(format.to_string().parse::<Format>(), Ok(format));
        }
    }

    #[test]
    fn test_hang_indent() {
        assert_eq!(
            hang_indent("a\nb\n\nc", 2, &Layout::PLAIN),
            "a\n  b\n\n  c"
        );
        let quotes = Layout {
            keep_quotes: true,
            ..Layout::PLAIN
        };
        assert_eq!(hang_indent("a\n>q", 2, &quotes), "a\n>q");
    }

    #[test]
    fn test_hang_indent_skips_code_interior() {
        let fences = Layout {
            code_opens: |line| line.starts_with("```"),
            code_closes: |line| line.starts_with("```"),
            indent_code_opener: false,
            ..Layout::PLAIN
        };
        assert_eq!(
            hang_indent("a\n\n```\nx\n  y\n```\nb", 2, &fences),
            "a\n\n```\nx\n  y\n```\n  b"
        );
    }
}
