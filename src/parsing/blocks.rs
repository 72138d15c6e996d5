//! Container-stack block parser
//!
//!     The parser keeps a stack of open containers, seeded with the document root. Each
//!     line first walks the stack from the outside in, asking every open container whether
//!     the line continues it. Whatever is left of the line after the last continuing
//!     container is then tested for new block starts, which are pushed (possibly several on
//!     one line, as in `- > quote`). Text that starts nothing either continues the open
//!     paragraph, lazily if need be, or opens a new one.
//!
//!     An open fence short-circuits all of this: the only question asked of a line is
//!     whether it closes the fence.
//!
//!     Leaf text is inline-parsed when its container closes. Fenced literal text never is.

use super::cursor::LineCursor;
use super::detection::{detect_block_start, BlockStart, DetectContext};
use super::ParseOptions;
use crate::ast::{Block, Document, List, ListItem};
use crate::inlines::parse_inlines;
use crate::lexing::{split_lines, Token};
use std::ops::Range;
use tracing::{trace, warn};

#[derive(Debug)]
enum Container {
    Document {
        blocks: Vec<Block>,
    },
    BlockQuote {
        blocks: Vec<Block>,
    },
    List {
        ordered: bool,
        delimiter: char,
        items: Vec<ListItem>,
    },
    ListItem {
        content_indent: usize,
        blocks: Vec<Block>,
    },
    Paragraph {
        lines: Vec<String>,
    },
    Fence {
        language: Option<String>,
        indent: usize,
        lines: Vec<String>,
    },
}

impl Container {
    fn name(&self) -> &'static str {
        match self {
            Container::Document { .. } => "document",
            Container::BlockQuote { .. } => "quote",
            Container::List { .. } => "list",
            Container::ListItem { .. } => "item",
            Container::Paragraph { .. } => "paragraph",
            Container::Fence { .. } => "fence",
        }
    }
}

pub struct BlockParser<'s> {
    source: &'s str,
    options: &'s ParseOptions,
    stack: Vec<Container>,
}

impl<'s> BlockParser<'s> {
    pub fn new(source: &'s str, options: &'s ParseOptions) -> Self {
        Self {
            source,
            options,
            stack: vec![Container::Document { blocks: Vec::new() }],
        }
    }

    pub fn parse(mut self, tokens: &[(Token, Range<usize>)]) -> Document {
        for (number, line) in split_lines(tokens).into_iter().enumerate() {
            self.process_line(number, line);
        }
        self.finish()
    }

    fn process_line(&mut self, number: usize, line: &[(Token, Range<usize>)]) {
        let mut cursor = LineCursor::new(line, self.source);

        if matches!(self.stack.last(), Some(Container::Fence { .. })) {
            if detect_block_start(&cursor, &DetectContext::inside_fence()).is_some() {
                trace!(line = number, "fence closed");
                self.close_top();
            } else {
                let text = self.strip_fence_prefixes(cursor.raw_line());
                if let Some(Container::Fence { lines, .. }) = self.stack.last_mut() {
                    lines.push(text);
                }
            }
            return;
        }

        // Walk the open containers. Lists are provisional until one of their items
        // continues, so `matched` only advances past a list together with its item.
        let mut matched = 1;
        let mut open_list = None;
        let mut index = 1;
        while index < self.stack.len() {
            match &self.stack[index] {
                Container::BlockQuote { .. } => {
                    if !cursor.eat_blockquote() {
                        break;
                    }
                    matched = index + 1;
                }
                Container::List { .. } => {}
                Container::ListItem { content_indent, .. } => {
                    if !cursor.is_blank() && !cursor.consume_indent(*content_indent) {
                        open_list = Some(index - 1);
                        break;
                    }
                    matched = index + 1;
                }
                Container::Document { .. } | Container::Paragraph { .. } | Container::Fence { .. } => {
                    break
                }
            }
            index += 1;
        }

        if cursor.is_blank() {
            trace!(line = number, matched, "blank line");
            self.truncate_to(matched);
            return;
        }

        let context = DetectContext {
            inside_fence: false,
            open_list: open_list.and_then(|i| self.list_kind(i)),
        };
        let start = detect_block_start(&cursor, &context);

        if start.is_none() {
            if let Some(Container::Paragraph { lines }) = self.stack.last_mut() {
                cursor.absorb_indentation();
                lines.push(cursor.remainder_text().trim_start().to_string());
                trace!(line = number, lazy = matched < self.stack.len(), "paragraph continued");
                return;
            }
        }

        let keep = match (&start, open_list) {
            (Some(BlockStart::ListItem { ordered, delimiter, .. }), Some(list)) => {
                if self.list_kind(list) == Some((*ordered, *delimiter)) {
                    list + 1
                } else {
                    matched
                }
            }
            _ => matched,
        };
        trace!(line = number, keep, start = ?start, "block start");
        self.truncate_to(keep);
        self.open_blocks(&mut cursor, start);
    }

    fn open_blocks(&mut self, cursor: &mut LineCursor<'_>, mut start: Option<BlockStart>) {
        loop {
            let Some(found) = start else {
                if !cursor.is_blank() {
                    cursor.absorb_indentation();
                    let text = cursor.remainder_text().trim_start().to_string();
                    self.stack.push(Container::Paragraph { lines: vec![text] });
                }
                return;
            };

            let nests = matches!(found, BlockStart::BlockQuote | BlockStart::ListItem { .. });
            if nests && self.depth() >= self.options.max_nesting_depth {
                warn!(
                    depth = self.depth(),
                    limit = self.options.max_nesting_depth,
                    "nesting ceiling reached, keeping the rest of the line as text"
                );
                cursor.absorb_indentation();
                let text = cursor.remainder_text().trim_start().to_string();
                self.stack.push(Container::Paragraph { lines: vec![text] });
                return;
            }

            match found {
                BlockStart::BlockQuote => {
                    cursor.eat_blockquote();
                    self.stack.push(Container::BlockQuote { blocks: Vec::new() });
                }
                BlockStart::ListItem {
                    ordered,
                    delimiter,
                    width,
                } => {
                    let indent = cursor.take_pending_indent();
                    cursor.advance();
                    self.open_list_item(ordered, delimiter, indent + width);
                }
                BlockStart::Fence { language, .. } => {
                    let indent = cursor.take_pending_indent();
                    self.stack.push(Container::Fence {
                        language,
                        indent,
                        lines: Vec::new(),
                    });
                    return;
                }
                BlockStart::Header(level) => {
                    cursor.absorb_indentation();
                    cursor.advance();
                    let text = header_text(cursor.remainder_text());
                    let inlines = parse_inlines(text, self.depth(), self.options);
                    self.attach(Block::Header { level, inlines });
                    return;
                }
                BlockStart::ThematicBreak => {
                    self.attach(Block::ThematicBreak);
                    return;
                }
            }

            start = detect_block_start(cursor, &DetectContext::default());
        }
    }

    fn open_list_item(&mut self, ordered: bool, delimiter: char, content_indent: usize) {
        let continues = matches!(
            self.stack.last(),
            Some(Container::List { ordered: o, delimiter: d, .. }) if *o == ordered && *d == delimiter
        );
        if !continues {
            if matches!(self.stack.last(), Some(Container::List { .. })) {
                self.close_top();
            }
            self.stack.push(Container::List {
                ordered,
                delimiter,
                items: Vec::new(),
            });
        }
        self.stack.push(Container::ListItem {
            content_indent,
            blocks: Vec::new(),
        });
    }

    fn list_kind(&self, index: usize) -> Option<(bool, char)> {
        match self.stack.get(index) {
            Some(Container::List {
                ordered, delimiter, ..
            }) => Some((*ordered, *delimiter)),
            _ => None,
        }
    }

    /// Open containers below the document root.
    fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    /// Remove the container prefixes of the enclosing quotes and list items, plus the
    /// fence's own indentation, from a line of fenced content.
    fn strip_fence_prefixes(&self, line: &str) -> String {
        let mut rest = line;
        for container in &self.stack {
            match container {
                Container::BlockQuote { .. } => {
                    let (_, after_indent) = strip_columns(rest, 3);
                    if let Some(after) = after_indent.strip_prefix('>') {
                        rest = after.strip_prefix(' ').unwrap_or(after);
                    }
                }
                Container::ListItem { content_indent, .. } => {
                    rest = strip_columns(rest, *content_indent).1;
                }
                Container::Fence { indent, .. } => {
                    rest = strip_columns(rest, *indent).1;
                }
                _ => {}
            }
        }
        rest.to_string()
    }

    fn truncate_to(&mut self, keep: usize) {
        while self.stack.len() > keep.max(1) {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(container) = self.stack.pop() else {
            return;
        };
        trace!(container = container.name(), "closed");
        let block = match container {
            Container::Paragraph { lines } => {
                let text = lines.join("\n");
                Block::Paragraph {
                    inlines: parse_inlines(text.trim_end(), self.depth(), self.options),
                }
            }
            Container::Fence {
                language, lines, ..
            } => Block::FencedCodeBlock {
                language,
                literal: lines.join("\n"),
            },
            Container::BlockQuote { blocks } => Block::BlockQuote { blocks },
            Container::List { ordered, items, .. } => Block::List(List::new(ordered, items)),
            Container::ListItem { blocks, .. } => {
                if let Some(Container::List { items, .. }) = self.stack.last_mut() {
                    items.push(ListItem::new(blocks));
                }
                return;
            }
            Container::Document { .. } => return,
        };
        self.push_block(block);
    }

    /// Attach a finished leaf block to the innermost container, closing any open leaf.
    fn attach(&mut self, block: Block) {
        if matches!(
            self.stack.last(),
            Some(Container::Paragraph { .. } | Container::Fence { .. })
        ) {
            self.close_top();
        }
        self.push_block(block);
    }

    fn push_block(&mut self, block: Block) {
        match self.stack.last_mut() {
            Some(
                Container::Document { blocks }
                | Container::BlockQuote { blocks }
                | Container::ListItem { blocks, .. },
            ) => blocks.push(block),
            Some(Container::List { items, .. }) => items.push(ListItem::new(vec![block])),
            _ => {}
        }
    }

    fn finish(mut self) -> Document {
        self.truncate_to(1);
        match self.stack.pop() {
            Some(Container::Document { blocks }) => Document::new(blocks),
            _ => Document::default(),
        }
    }
}

/// Header text without surrounding whitespace and an optional closing `#` sequence.
fn header_text(raw: &str) -> &str {
    let text = raw.trim();
    let without = text.trim_end_matches('#');
    if without.len() == text.len() {
        text
    } else if without.is_empty() {
        ""
    } else if without.ends_with(' ') || without.ends_with('\t') {
        without.trim_end()
    } else {
        text
    }
}

/// Strip up to `columns` columns of leading spaces and tabs.
fn strip_columns(line: &str, columns: usize) -> (usize, &str) {
    let mut taken = 0;
    let mut end = 0;
    for c in line.chars() {
        if taken >= columns {
            break;
        }
        match c {
            ' ' => taken += 1,
            '\t' => taken += 4,
            _ => break,
        }
        end += 1;
    }
    (taken, &line[end..])
}
