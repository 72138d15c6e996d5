//! Rich text renderer
//!
//! Renders the HTML-like tag subset understood by chat clients: `<b>`, `<i>`, `<s>`,
//! `<code>`, `<pre>`, `<a href>` and `<blockquote>`. There are no header or list tags, so
//! headers are bold and list items are prefixed lines.

use super::{hang_indent, Layout, Render, RenderOptions};
use crate::ast::{Block, Document, Inline, List};

/// `<pre>` content keeps its own line starts.
const LAYOUT: Layout = Layout {
    keep_quotes: false,
    code_opens: opens_pre,
    code_closes: closes_pre,
    indent_code_opener: true,
};

/// Text is HTML-escaped, so the tags can only come from a rendered code block.
fn opens_pre(line: &str) -> bool {
    line.rfind("<pre><code")
        .is_some_and(|open| !line[open..].contains("</code></pre>"))
}

fn closes_pre(line: &str) -> bool {
    line.contains("</code></pre>")
}

pub struct RichRenderer<'o> {
    options: &'o RenderOptions,
}

impl<'o> RichRenderer<'o> {
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
            Block::Paragraph { inlines } => inlines_to_rich(inlines),
            Block::Header { inlines, .. } => format!("<b>{}</b>", inlines_to_rich(inlines)),
            Block::List(list) => self.list(list),
            Block::BlockQuote { blocks } => {
                format!("<blockquote>{}</blockquote>", self.blocks(blocks))
            }
            Block::FencedCodeBlock { language, literal } => match language {
                Some(language) => format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    escape_attribute(language),
                    escape_html(literal)
                ),
                None => format!("<pre><code>{}</code></pre>", escape_html(literal)),
            },
            Block::ThematicBreak => "———".to_string(),
        }
    }

    fn list(&self, list: &List) -> String {
        let bullet = escape_html(&self.options.bullet);
        list.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let marker = if list.ordered {
                    format!("{}.", i + 1)
                } else {
                    bullet.clone()
                };
                let width = marker.chars().count() + 1;
                format!(
                    "{} {}",
                    marker,
                    hang_indent(&self.blocks(&item.blocks), width, &LAYOUT)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Render for RichRenderer<'_> {
    fn render(&self, document: &Document) -> String {
        self.blocks(&document.blocks)
    }
}

fn inlines_to_rich(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        push_inline(inline, &mut out);
    }
    out
}

fn push_inline(inline: &Inline, out: &mut String) {
    let tag = match inline {
        Inline::Text { content } => {
            out.push_str(&escape_html(content));
            return;
        }
        Inline::Code { content } => {
            out.push_str("<code>");
            out.push_str(&escape_html(content));
            out.push_str("</code>");
            return;
        }
        Inline::LineBreak => {
            out.push('\n');
            return;
        }
        Inline::Link { label, url } => {
            out.push_str(&format!("<a href=\"{}\">", escape_attribute(url)));
            for child in label {
                push_inline(child, out);
            }
            out.push_str("</a>");
            return;
        }
        Inline::Bold { .. } => "b",
        Inline::Italic { .. } => "i",
        Inline::Strikethrough { .. } => "s",
    };
    out.push_str(&format!("<{}>", tag));
    for child in inline.children() {
        push_inline(child, out);
    }
    out.push_str(&format!("</{}>", tag));
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attribute(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}
