//! Normalized Markdown renderer
//!
//!     Produces canonical Markdown that parses back to the same document:
//!
//!         **bold**  *italic*  ~~strike~~  `code`  [label](url)
//!         # header, - unordered and 1. ordered lists, > quotes, ``` fences, ***
//!
//!     Ordered lists are renumbered from 1. Two lists of the same kind in a row would merge
//!     when parsed back, so every other one uses the alternate marker (`*` or `1)`).
//!
//! Escaping
//!
//!     Text always escapes the inline markup characters `\ * _ ~ ` [ ]`. At the start of a
//!     line it also escapes the characters that would open a block: `#`, `>`, `-`, `+` and
//!     the delimiter of a leading number such as `1.`.
//!
//!     Emphasis markers are picked so adjacent runs cannot merge: italic switches to `_`
//!     next to bold markers and inside italic, bold switches to `__` inside bold or right
//!     after a `*` marker.

use super::{hang_indent, Layout, Render};
use crate::ast::{Block, Document, Inline, List};

pub struct NormalizedRenderer;

impl Render for NormalizedRenderer {
    fn render(&self, document: &Document) -> String {
        render_blocks(&document.blocks)
    }
}

fn render_blocks(blocks: &[Block]) -> String {
    let mut rendered = Vec::with_capacity(blocks.len());
    // kind and marker choice of the list just rendered
    let mut previous_list: Option<(bool, bool)> = None;
    for block in blocks {
        match block {
            Block::List(list) => {
                let alternate = matches!(
                    previous_list,
                    Some((ordered, alternate)) if ordered == list.ordered && !alternate
                );
                previous_list = Some((list.ordered, alternate));
                rendered.push(render_list(list, alternate));
            }
            other => {
                previous_list = None;
                rendered.push(render_block(other));
            }
        }
    }
    rendered.join("\n\n")
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Paragraph { inlines } => {
            let mut writer = Writer::new();
            writer.children(inlines, Context::default(), false);
            writer.out
        }
        Block::Header { level, inlines } => {
            let hashes = "#".repeat(usize::from((*level).clamp(1, 6)));
            let mut writer = Writer::new();
            writer.children(inlines, Context::default(), false);
            let mut content = writer.out;
            // a trailing `#` would read as a closing sequence
            if content.ends_with('#') && !is_escaped_at(&content, content.len() - 1) {
                content.insert(content.len() - 1, '\\');
            }
            if content.is_empty() {
                hashes
            } else {
                format!("{} {}", hashes, content)
            }
        }
        Block::List(list) => render_list(list, false),
        Block::BlockQuote { blocks } => {
            let body = render_blocks(blocks);
            body.split('\n')
                .map(|line| {
                    if line.is_empty() {
                        ">".to_string()
                    } else {
                        format!("> {}", line)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        Block::FencedCodeBlock { language, literal } => render_fence(language.as_deref(), literal),
        Block::ThematicBreak => "***".to_string(),
    }
}

fn render_list(list: &List, alternate: bool) -> String {
    list.items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = match (list.ordered, alternate) {
                (false, false) => "-".to_string(),
                (false, true) => "*".to_string(),
                (true, false) => format!("{}.", i + 1),
                (true, true) => format!("{})", i + 1),
            };
            let body = render_blocks(&item.blocks);
            if body.is_empty() {
                marker
            } else {
                let body = hang_indent(&body, marker.len() + 1, &Layout::PLAIN);
                format!("{} {}", marker, body)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_fence(language: Option<&str>, literal: &str) -> String {
    let marker = if language.is_some_and(|lang| lang.contains('`')) {
        '~'
    } else {
        '`'
    };
    let run = (longest_run(literal, marker) + 1).max(3);
    let fence = marker.to_string().repeat(run);
    let info = language.unwrap_or("");
    if literal.is_empty() {
        format!("{}{}\n{}", fence, info, fence)
    } else {
        format!("{}{}\n{}\n{}", fence, info, literal, fence)
    }
}

fn longest_run(text: &str, marker: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == marker {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// True when the byte at `index` is preceded by an odd number of backslashes.
fn is_escaped_at(text: &str, index: usize) -> bool {
    text[..index]
        .bytes()
        .rev()
        .take_while(|b| *b == b'\\')
        .count()
        % 2
        == 1
}

#[derive(Debug, Clone, Copy, Default)]
struct Context {
    in_bold: bool,
    in_italic: bool,
}

struct Writer {
    out: String,
    line_start: bool,
    after_star: bool,
    after_underscore: bool,
}

impl Writer {
    fn new() -> Self {
        Self {
            out: String::new(),
            line_start: true,
            after_star: false,
            after_underscore: false,
        }
    }

    fn marker(&mut self, marker: &str) {
        self.out.push_str(marker);
        self.line_start = false;
        self.after_star = marker.ends_with('*');
        self.after_underscore = marker.ends_with('_');
    }

    /// Write inlines. `inside_bold_markers` is set for the direct children of a bold span,
    /// whose first and last child sit right next to its markers.
    fn children(&mut self, inlines: &[Inline], context: Context, inside_bold_markers: bool) {
        let last = inlines.len().saturating_sub(1);
        for (i, inline) in inlines.iter().enumerate() {
            let touches_bold = inside_bold_markers && (i == 0 || i == last);
            self.inline(inline, context, touches_bold);
        }
    }

    fn inline(&mut self, inline: &Inline, context: Context, touches_bold: bool) {
        match inline {
            Inline::Text { content } => self.text(content),
            Inline::Bold { children } => {
                let marker = if context.in_bold || self.after_star {
                    "__"
                } else {
                    "**"
                };
                self.marker(marker);
                self.children(
                    children,
                    Context {
                        in_bold: true,
                        ..context
                    },
                    true,
                );
                self.marker(marker);
            }
            Inline::Italic { children } => {
                let wraps_bold = matches!(children.first(), Some(Inline::Bold { .. }))
                    || matches!(children.last(), Some(Inline::Bold { .. }));
                let underscore = (context.in_italic || self.after_star || touches_bold || wraps_bold)
                    && !self.after_underscore;
                let marker = if underscore { "_" } else { "*" };
                self.marker(marker);
                self.children(
                    children,
                    Context {
                        in_italic: true,
                        ..context
                    },
                    false,
                );
                self.marker(marker);
            }
            Inline::Strikethrough { children } => {
                self.marker("~~");
                self.children(children, context, false);
                self.marker("~~");
            }
            Inline::Code { content } => self.marker(&code_span(content)),
            Inline::Link { label, url } => {
                self.marker("[");
                self.children(label, context, false);
                self.marker("](");
                self.marker(&escape_url(url));
                self.marker(")");
            }
            Inline::LineBreak => {
                self.marker("\\\n");
                self.line_start = true;
            }
        }
    }

    fn text(&mut self, content: &str) {
        for (i, line) in content.split('\n').enumerate() {
            if i > 0 {
                self.out.push('\n');
                self.line_start = true;
            }
            if line.is_empty() {
                continue;
            }
            let escaped = escape_text(line, self.line_start);
            self.out.push_str(&escaped);
            self.line_start = false;
            self.after_star = false;
            self.after_underscore = false;
        }
    }
}

fn escape_text(line: &str, at_line_start: bool) -> String {
    let ordered_delimiter = if at_line_start {
        leading_number_delimiter(line)
    } else {
        None
    };
    let mut out = String::with_capacity(line.len() + 4);
    for (i, c) in line.char_indices() {
        let escape = matches!(c, '\\' | '*' | '_' | '~' | '`' | '[' | ']')
            || (at_line_start && i == 0 && matches!(c, '#' | '>' | '-' | '+'))
            || ordered_delimiter == Some(i);
        if escape {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Byte index of the `.` or `)` after a leading run of 1 to 9 digits.
fn leading_number_delimiter(line: &str) -> Option<usize> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    match line.as_bytes().get(digits) {
        Some(b'.') | Some(b')') => Some(digits),
        _ => None,
    }
}

/// Wrap code in the shortest backtick run that does not occur in it.
fn code_span(content: &str) -> String {
    let mut runs = Vec::new();
    let mut current = 0;
    for c in content.chars().chain(std::iter::once('\0')) {
        if c == '`' {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    let ticks = (1..).find(|n| !runs.contains(n)).unwrap_or(1);
    let fence = "`".repeat(ticks);
    let pad = content.starts_with('`')
        || content.ends_with('`')
        || (content.len() >= 2
            && content.starts_with(' ')
            && content.ends_with(' ')
            && !content.chars().all(|c| c == ' '));
    if pad {
        format!("{} {} {}", fence, content, fence)
    } else {
        format!("{}{}{}", fence, content, fence)
    }
}

fn escape_url(url: &str) -> String {
    let balanced = parens_balanced(url);
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        let escape =
            matches!(c, '\\' | '`' | '[' | ']') || (!balanced && matches!(c, '(' | ')'));
        if escape {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn parens_balanced(url: &str) -> bool {
    let mut depth: usize = 0;
    for c in url.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
