//! Inline elements
//!
//! Inline nodes are the span-level content of paragraphs and headers. Bold, italic and
//! strikethrough nest freely; code spans and line breaks are leaves, and a link holds a
//! parsed label plus a verbatim url.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Inline {
    Text { content: String },
    Bold { children: Vec<Inline> },
    Italic { children: Vec<Inline> },
    Strikethrough { children: Vec<Inline> },
    Code { content: String },
    Link { label: Vec<Inline>, url: String },
    LineBreak,
}

impl Inline {
    pub fn text(content: impl Into<String>) -> Self {
        Inline::Text {
            content: content.into(),
        }
    }

    pub fn code(content: impl Into<String>) -> Self {
        Inline::Code {
            content: content.into(),
        }
    }

    pub fn link(label: Vec<Inline>, url: impl Into<String>) -> Self {
        Inline::Link {
            label,
            url: url.into(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Inline::Text { content } => Some(content),
            _ => None,
        }
    }

    /// Child inlines of container spans; empty for leaves.
    pub fn children(&self) -> &[Inline] {
        match self {
            Inline::Bold { children }
            | Inline::Italic { children }
            | Inline::Strikethrough { children } => children,
            Inline::Link { label, .. } => label,
            Inline::Text { .. } | Inline::Code { .. } | Inline::LineBreak => &[],
        }
    }

    /// Concatenated text content with all markup removed.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        push_plain_text(self, &mut out);
        out
    }
}

pub(crate) fn push_plain_text(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text { content } | Inline::Code { content } => out.push_str(content),
        Inline::LineBreak => out.push('\n'),
        other => {
            for child in other.children() {
                push_plain_text(child, out);
            }
        }
    }
}
