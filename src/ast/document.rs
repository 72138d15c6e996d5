//! Document element
//!
//! The document is the root of the tree: an ordered sequence of blocks. It is built once
//! per parse and never mutated afterwards.

use super::block::Block;
use super::traits::{walk_document, Visitor};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn accept(&self, visitor: &mut impl Visitor) {
        walk_document(visitor, self);
    }

    /// All text content, one line per leaf block, with markup removed.
    pub fn plain_text(&self) -> String {
        let mut collector = PlainTextCollector::default();
        self.accept(&mut collector);
        collector.lines.join("\n")
    }

    /// Counts of every node kind in the tree.
    pub fn node_counts(&self) -> NodeCounts {
        let mut counts = NodeCounts::default();
        self.accept(&mut counts);
        counts
    }
}

#[derive(Default)]
struct PlainTextCollector {
    lines: Vec<String>,
}

impl Visitor for PlainTextCollector {
    fn visit_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph { inlines } | Block::Header { inlines, .. } => {
                let mut line = String::new();
                for inline in inlines {
                    super::inline::push_plain_text(inline, &mut line);
                }
                self.lines.push(line);
            }
            Block::FencedCodeBlock { literal, .. } => self.lines.push(literal.clone()),
            _ => {}
        }
    }
}

/// Number of nodes of each kind found by [`Document::node_counts`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeCounts {
    pub paragraphs: usize,
    pub headers: usize,
    pub lists: usize,
    pub list_items: usize,
    pub block_quotes: usize,
    pub fenced_code_blocks: usize,
    pub thematic_breaks: usize,
    pub inlines: usize,
}

impl Visitor for NodeCounts {
    fn visit_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph { .. } => self.paragraphs += 1,
            Block::Header { .. } => self.headers += 1,
            Block::List(_) => self.lists += 1,
            Block::BlockQuote { .. } => self.block_quotes += 1,
            Block::FencedCodeBlock { .. } => self.fenced_code_blocks += 1,
            Block::ThematicBreak => self.thematic_breaks += 1,
        }
    }

    fn visit_list_item(&mut self, _item: &super::block::ListItem) {
        self.list_items += 1;
    }

    fn visit_inline(&mut self, _inline: &super::inline::Inline) {
        self.inlines += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::super::block::{List, ListItem};
    use super::super::inline::Inline;
    use super::*;

    fn sample() -> Document {
        Document::new(vec![
            Block::Header {
                level: 1,
                inlines: vec![Inline::text("Title")],
            },
            Block::List(List::new(
                false,
                vec![
                    ListItem::new(vec![Block::Paragraph {
                        inlines: vec![Inline::Bold {
                            children: vec![Inline::text("one")],
                        }],
                    }]),
                    ListItem::new(vec![Block::BlockQuote {
                        blocks: vec![Block::FencedCodeBlock {
                            language: None,
                            literal: "x = 1".to_string(),
                        }],
                    }]),
                ],
            )),
            Block::ThematicBreak,
        ])
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(sample().plain_text(), "Title\none\nx = 1");
    }

    #[test]
    fn test_node_counts() {
        let counts = sample().node_counts();
        assert_eq!(counts.headers, 1);
        assert_eq!(counts.lists, 1);
        assert_eq!(counts.list_items, 2);
        assert_eq!(counts.paragraphs, 1);
        assert_eq!(counts.block_quotes, 1);
        assert_eq!(counts.fenced_code_blocks, 1);
        assert_eq!(counts.thematic_breaks, 1);
        // Text("Title"), Bold, Text("one")
        assert_eq!(counts.inlines, 3);
    }
}
