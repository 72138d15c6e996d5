//! Fluent assertions over documents, blocks and inlines

use crate::ast::{AstNode, Block, Document, Inline, List, ListItem};

pub fn assert_doc(document: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion {
        document,
        context: "doc".to_string(),
    }
}

fn summarize(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| block.node_type())
        .collect::<Vec<_>>()
        .join(", ")
}

fn nth_block<'a>(blocks: &'a [Block], index: usize, context: &str) -> &'a Block {
    blocks.get(index).unwrap_or_else(|| {
        panic!(
            "{}: block index {} out of bounds ({} blocks: [{}])",
            context,
            index,
            blocks.len(),
            summarize(blocks)
        )
    })
}

fn assert_block_count(blocks: &[Block], expected: usize, context: &str) {
    assert_eq!(
        blocks.len(),
        expected,
        "{}: expected {} blocks, found {}: [{}]",
        context,
        expected,
        blocks.len(),
        summarize(blocks)
    );
}

pub struct DocumentAssertion<'a> {
    document: &'a Document,
    context: String,
}

impl<'a> DocumentAssertion<'a> {
    pub fn block_count(self, expected: usize) -> Self {
        assert_block_count(&self.document.blocks, expected, &self.context);
        self
    }

    pub fn block<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        let block = nth_block(&self.document.blocks, index, &self.context);
        assertion(BlockAssertion {
            block,
            context: format!("{}:blocks[{}]", self.context, index),
        });
        self
    }
}

pub struct BlockAssertion<'a> {
    block: &'a Block,
    context: String,
}

impl<'a> BlockAssertion<'a> {
    fn unexpected(&self, wanted: &str) -> ! {
        panic!(
            "{}: expected {}, found {} ({:?})",
            self.context,
            wanted,
            self.block.node_type(),
            self.block.display_label()
        )
    }

    pub fn assert_paragraph(self) -> ParagraphAssertion<'a> {
        match self.block {
            Block::Paragraph { inlines } => ParagraphAssertion {
                inlines,
                context: self.context,
            },
            _ => self.unexpected("Paragraph"),
        }
    }

    pub fn assert_header(self, level: u8) -> HeaderAssertion<'a> {
        match self.block {
            Block::Header {
                level: actual,
                inlines,
            } => {
                assert_eq!(
                    *actual, level,
                    "{}: expected header level {}, found {}",
                    self.context, level, actual
                );
                HeaderAssertion {
                    inner: ParagraphAssertion {
                        inlines,
                        context: self.context,
                    },
                }
            }
            _ => self.unexpected("Header"),
        }
    }

    pub fn assert_list(self) -> ListAssertion<'a> {
        match self.block {
            Block::List(list) => ListAssertion {
                list,
                context: self.context,
            },
            _ => self.unexpected("List"),
        }
    }

    pub fn assert_quote(self) -> QuoteAssertion<'a> {
        match self.block {
            Block::BlockQuote { blocks } => QuoteAssertion {
                blocks,
                context: self.context,
            },
            _ => self.unexpected("BlockQuote"),
        }
    }

    pub fn assert_fence(self) -> FenceAssertion<'a> {
        match self.block {
            Block::FencedCodeBlock { language, literal } => FenceAssertion {
                language: language.as_deref(),
                literal,
                context: self.context,
            },
            _ => self.unexpected("FencedCodeBlock"),
        }
    }

    pub fn assert_thematic_break(self) {
        if !matches!(self.block, Block::ThematicBreak) {
            self.unexpected("ThematicBreak");
        }
    }
}

pub struct ParagraphAssertion<'a> {
    inlines: &'a [Inline],
    context: String,
}

impl<'a> ParagraphAssertion<'a> {
    /// Compare the plain text of the whole paragraph.
    pub fn text(self, expected: &str) -> Self {
        let actual: String = self.inlines.iter().map(Inline::plain_text).collect();
        assert_eq!(actual, expected, "{}: text mismatch", self.context);
        self
    }

    pub fn inlines(self, expected: &[Inline]) -> Self {
        assert_eq!(self.inlines, expected, "{}: inline mismatch", self.context);
        self
    }

    pub fn inline_count(self, expected: usize) -> Self {
        assert_eq!(
            self.inlines.len(),
            expected,
            "{}: expected {} inlines, found {:?}",
            self.context,
            expected,
            self.inlines
        );
        self
    }

    pub fn inline<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(InlineAssertion<'a>),
    {
        let inline = self.inlines.get(index).unwrap_or_else(|| {
            panic!(
                "{}: inline index {} out of bounds ({:?})",
                self.context, index, self.inlines
            )
        });
        assertion(InlineAssertion {
            inline,
            context: format!("{}:inlines[{}]", self.context, index),
        });
        self
    }
}

pub struct HeaderAssertion<'a> {
    inner: ParagraphAssertion<'a>,
}

impl<'a> HeaderAssertion<'a> {
    pub fn text(self, expected: &str) -> Self {
        Self {
            inner: self.inner.text(expected),
        }
    }

    pub fn inline<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(InlineAssertion<'a>),
    {
        Self {
            inner: self.inner.inline(index, assertion),
        }
    }
}

pub struct ListAssertion<'a> {
    list: &'a List,
    context: String,
}

impl<'a> ListAssertion<'a> {
    pub fn ordered(self, expected: bool) -> Self {
        assert_eq!(
            self.list.ordered, expected,
            "{}: expected ordered = {}",
            self.context, expected
        );
        self
    }

    pub fn item_count(self, expected: usize) -> Self {
        assert_eq!(
            self.list.len(),
            expected,
            "{}: expected {} items, found {}",
            self.context,
            expected,
            self.list.len()
        );
        self
    }

    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ListItemAssertion<'a>),
    {
        let item = self.list.items.get(index).unwrap_or_else(|| {
            panic!(
                "{}: item index {} out of bounds (list has {} items)",
                self.context,
                index,
                self.list.len()
            )
        });
        assertion(ListItemAssertion {
            item,
            context: format!("{}:items[{}]", self.context, index),
        });
        self
    }
}

pub struct ListItemAssertion<'a> {
    item: &'a ListItem,
    context: String,
}

impl<'a> ListItemAssertion<'a> {
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.item.display_label(),
            expected,
            "{}: item text mismatch",
            self.context
        );
        self
    }

    pub fn block_count(self, expected: usize) -> Self {
        assert_block_count(&self.item.blocks, expected, &self.context);
        self
    }

    pub fn block<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        let block = nth_block(&self.item.blocks, index, &self.context);
        assertion(BlockAssertion {
            block,
            context: format!("{}:blocks[{}]", self.context, index),
        });
        self
    }
}

pub struct QuoteAssertion<'a> {
    blocks: &'a [Block],
    context: String,
}

impl<'a> QuoteAssertion<'a> {
    pub fn block_count(self, expected: usize) -> Self {
        assert_block_count(self.blocks, expected, &self.context);
        self
    }

    pub fn block<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        let block = nth_block(self.blocks, index, &self.context);
        assertion(BlockAssertion {
            block,
            context: format!("{}:blocks[{}]", self.context, index),
        });
        self
    }
}

pub struct FenceAssertion<'a> {
    language: Option<&'a str>,
    literal: &'a str,
    context: String,
}

impl FenceAssertion<'_> {
    pub fn language(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.language, expected,
            "{}: fence language mismatch",
            self.context
        );
        self
    }

    pub fn literal(self, expected: &str) -> Self {
        assert_eq!(
            self.literal, expected,
            "{}: fence literal mismatch",
            self.context
        );
        self
    }
}

pub struct InlineAssertion<'a> {
    inline: &'a Inline,
    context: String,
}

impl<'a> InlineAssertion<'a> {
    fn expect_kind(&self, kind: &str) {
        assert_eq!(
            self.inline.node_type(),
            kind,
            "{}: expected {}, found {:?}",
            self.context,
            kind,
            self.inline
        );
    }

    pub fn is_text(self, expected: &str) -> Self {
        self.expect_kind("Text");
        assert_eq!(
            self.inline.as_text(),
            Some(expected),
            "{}: text mismatch",
            self.context
        );
        self
    }

    pub fn is_bold(self) -> Self {
        self.expect_kind("Bold");
        self
    }

    pub fn is_italic(self) -> Self {
        self.expect_kind("Italic");
        self
    }

    pub fn is_strikethrough(self) -> Self {
        self.expect_kind("Strikethrough");
        self
    }

    pub fn is_line_break(self) -> Self {
        self.expect_kind("LineBreak");
        self
    }

    pub fn is_code(self, expected: &str) -> Self {
        assert_eq!(
            self.inline,
            &Inline::code(expected),
            "{}: code mismatch",
            self.context
        );
        self
    }

    pub fn is_link(self, url: &str) -> Self {
        self.expect_kind("Link");
        assert_eq!(
            self.inline.display_label(),
            url,
            "{}: link url mismatch",
            self.context
        );
        self
    }

    /// Compare the plain text of this inline and its children.
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.inline.plain_text(),
            expected,
            "{}: text mismatch",
            self.context
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.inline.children().len(),
            expected,
            "{}: expected {} children, found {:?}",
            self.context,
            expected,
            self.inline.children()
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(InlineAssertion<'a>),
    {
        let child = self.inline.children().get(index).unwrap_or_else(|| {
            panic!(
                "{}: child index {} out of bounds ({:?})",
                self.context, index, self.inline
            )
        });
        assertion(InlineAssertion {
            inline: child,
            context: format!("{}:children[{}]", self.context, index),
        });
        self
    }
}
