//! Strict chat dialect renderer
//!
//!     Markers are `*bold*`, `_italic_`, `~strike~`, `` `code` ``, `[label](url)` and
//!     ```` ```lang ```` pre blocks. All plain text goes through
//!     [`escape_text`](crate::dialect::escape_text), so the output always passes
//!     [`validate`](crate::validation::validate).
//!
//!     The dialect toggles markers rather than nesting them, so a span nested inside a span
//!     of the same kind is flattened into its parent. Two italic markers in a row would read
//!     as the underline marker `__`; a `\r` separates them.
//!
//!     Headers have no equivalent and are rendered bold. Block quotes prefix every line
//!     with `>`; a quote nested in a quote flattens into it.

use super::{hang_indent, Layout, Render, RenderOptions};
use crate::ast::{Block, Document, Inline, List};
use crate::dialect::{escape_code, escape_link_url, escape_text};

/// Quote lines and pre blocks stay at the start of the line.
const LAYOUT: Layout = Layout {
    keep_quotes: true,
    code_opens: is_fence_line,
    code_closes: is_fence_line,
    indent_code_opener: false,
};

/// Code content has its backticks escaped, so only fences start with three of them.
fn is_fence_line(line: &str) -> bool {
    line.starts_with("```")
}

pub struct StrictRenderer<'o> {
    options: &'o RenderOptions,
}

impl<'o> StrictRenderer<'o> {
    pub fn new(options: &'o RenderOptions) -> Self {
        Self { options }
    }

    fn blocks(&self, blocks: &[Block]) -> String {
        blocks
            .iter()
            .map(|block| self.block(block))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn block(&self, block: &Block) -> String {
        match block {
            Block::Paragraph { inlines } => {
                let mut writer = InlineWriter::default();
                writer.inlines(inlines, Open::default());
                writer.out
            }
            Block::Header { inlines, .. } => {
                if inlines.is_empty() {
                    return String::new();
                }
                let mut writer = InlineWriter::default();
                writer.push("*");
                writer.inlines(
                    inlines,
                    Open {
                        bold: true,
                        ..Open::default()
                    },
                );
                writer.push("*");
                writer.out
            }
            Block::List(list) => self.list(list),
            Block::BlockQuote { blocks } => quote(&self.blocks(blocks)),
            Block::FencedCodeBlock { language, literal } => {
                let language = language
                    .as_deref()
                    .filter(|lang| !lang.contains(|c: char| c == '`' || c.is_whitespace()))
                    .unwrap_or("");
                format!("```{}\n{}\n```", language, escape_code(literal))
            }
            Block::ThematicBreak => escape_text("---"),
        }
    }

    fn list(&self, list: &List) -> String {
        let bullet = escape_text(&self.options.bullet);
        list.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let marker = if list.ordered {
                    format!("{}\\.", i + 1)
                } else {
                    bullet.clone()
                };
                let body = self.blocks(&item.blocks);
                let width = marker.chars().count() + 1;
                if body.starts_with('>') {
                    // a quote marker is only valid at the start of a line
                    format!("{}\n{}", marker, hang_indent(&body, width, &LAYOUT))
                } else {
                    format!("{} {}", marker, hang_indent(&body, width, &LAYOUT))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Render for StrictRenderer<'_> {
    fn render(&self, document: &Document) -> String {
        self.blocks(&document.blocks)
    }
}

fn quote(body: &str) -> String {
    if body.is_empty() {
        return ">".to_string();
    }
    body.split('\n')
        .map(|line| {
            if line.starts_with('>') {
                line.to_string()
            } else {
                format!(">{}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Spans already open around the inline being written
#[derive(Debug, Clone, Copy, Default)]
struct Open {
    bold: bool,
    italic: bool,
    strike: bool,
}

#[derive(Default)]
struct InlineWriter {
    out: String,
    after_underscore: bool,
}

impl InlineWriter {
    fn push(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.out.push_str(s);
        self.after_underscore = false;
    }

    fn underscore(&mut self) {
        if self.after_underscore {
            self.out.push('\r');
        }
        self.out.push('_');
        self.after_underscore = true;
    }

    fn inlines(&mut self, inlines: &[Inline], open: Open) {
        for inline in inlines {
            self.inline(inline, open);
        }
    }

    fn inline(&mut self, inline: &Inline, open: Open) {
        match inline {
            Inline::Text { content } => self.push(&escape_text(content)),
            Inline::Bold { children } if open.bold => self.inlines(children, open),
            Inline::Bold { children } => {
                self.push("*");
                self.inlines(children, Open { bold: true, ..open });
                self.push("*");
            }
            Inline::Italic { children } if open.italic => self.inlines(children, open),
            Inline::Italic { children } => {
                self.underscore();
                self.inlines(
                    children,
                    Open {
                        italic: true,
                        ..open
                    },
                );
                self.underscore();
            }
            Inline::Strikethrough { children } if open.strike => self.inlines(children, open),
            Inline::Strikethrough { children } => {
                self.push("~");
                self.inlines(
                    children,
                    Open {
                        strike: true,
                        ..open
                    },
                );
                self.push("~");
            }
            Inline::Code { content } => {
                self.push("`");
                self.push(&escape_code(content));
                self.push("`");
            }
            Inline::Link { label, url } => {
                self.push("[");
                self.inlines(label, open);
                self.push("](");
                self.push(&escape_link_url(url));
                self.push(")");
            }
            Inline::LineBreak => self.push("\n"),
        }
    }
}
