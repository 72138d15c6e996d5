//! Block elements
//!
//! Blocks are the line-level structure of a document. Paragraphs and headers hold inline
//! content, fenced code blocks hold their literal text untouched, and lists and block
//! quotes hold further blocks.
//!
//! Lists
//!
//!     A list is a run of items sharing one kind (ordered or not). A list item is not a
//!     block on its own: it only exists inside a [`List`], which is why it is a separate
//!     struct rather than a [`Block`] variant.

use super::inline::Inline;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Block {
    Paragraph {
        inlines: Vec<Inline>,
    },
    Header {
        level: u8,
        inlines: Vec<Inline>,
    },
    List(List),
    BlockQuote {
        blocks: Vec<Block>,
    },
    FencedCodeBlock {
        language: Option<String>,
        literal: String,
    },
    ThematicBreak,
}

/// A list contains one or more items of the same kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub blocks: Vec<Block>,
}

impl Block {
    /// Inline content of paragraphs and headers.
    pub fn inlines(&self) -> Option<&[Inline]> {
        match self {
            Block::Paragraph { inlines } | Block::Header { inlines, .. } => Some(inlines),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Block::List(_) | Block::BlockQuote { .. })
    }
}

impl List {
    pub fn new(ordered: bool, items: Vec<ListItem>) -> Self {
        Self { ordered, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ListItem {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}
