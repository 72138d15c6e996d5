//! AST traits - Common interfaces for uniform node access
//!
//! [`AstNode`] gives every node a type name and a short display label (used by the tree
//! visualisation). [`Visitor`] walks the tree; the default methods are empty so a visitor
//! only overrides what it cares about, and the `walk_*` functions drive the traversal.

use super::block::{Block, ListItem};
use super::document::Document;
use super::inline::Inline;

pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
}

/// Visitor trait for traversing the AST
///
/// `visit_*` is called before a node's children are walked, `leave_*` after.
pub trait Visitor {
    fn visit_block(&mut self, _block: &Block) {}
    fn leave_block(&mut self, _block: &Block) {}

    fn visit_list_item(&mut self, _item: &ListItem) {}
    fn leave_list_item(&mut self, _item: &ListItem) {}

    fn visit_inline(&mut self, _inline: &Inline) {}
    fn leave_inline(&mut self, _inline: &Inline) {}
}

pub fn walk_document<V: Visitor + ?Sized>(visitor: &mut V, document: &Document) {
    for block in &document.blocks {
        walk_block(visitor, block);
    }
}

pub fn walk_block<V: Visitor + ?Sized>(visitor: &mut V, block: &Block) {
    visitor.visit_block(block);
    match block {
        Block::Paragraph { inlines } | Block::Header { inlines, .. } => {
            for inline in inlines {
                walk_inline(visitor, inline);
            }
        }
        Block::List(list) => {
            for item in &list.items {
                visitor.visit_list_item(item);
                for child in &item.blocks {
                    walk_block(visitor, child);
                }
                visitor.leave_list_item(item);
            }
        }
        Block::BlockQuote { blocks } => {
            for child in blocks {
                walk_block(visitor, child);
            }
        }
        Block::FencedCodeBlock { .. } | Block::ThematicBreak => {}
    }
    visitor.leave_block(block);
}

pub fn walk_inline<V: Visitor + ?Sized>(visitor: &mut V, inline: &Inline) {
    visitor.visit_inline(inline);
    for child in inline.children() {
        walk_inline(visitor, child);
    }
    visitor.leave_inline(inline);
}

impl AstNode for Document {
    fn node_type(&self) -> &'static str {
        "Document"
    }

    fn display_label(&self) -> String {
        format!("Document ({} blocks)", self.blocks.len())
    }
}

impl AstNode for Block {
    fn node_type(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "Paragraph",
            Block::Header { .. } => "Header",
            Block::List(_) => "List",
            Block::BlockQuote { .. } => "BlockQuote",
            Block::FencedCodeBlock { .. } => "FencedCodeBlock",
            Block::ThematicBreak => "ThematicBreak",
        }
    }

    fn display_label(&self) -> String {
        match self {
            Block::Paragraph { inlines } => inline_label(inlines),
            Block::Header { level, inlines } => format!("h{} {}", level, inline_label(inlines)),
            Block::List(list) => {
                let kind = if list.ordered { "ordered" } else { "unordered" };
                format!("{} items, {}", list.items.len(), kind)
            }
            Block::BlockQuote { blocks } => format!("{} blocks", blocks.len()),
            Block::FencedCodeBlock { language, literal } => match language {
                Some(language) => format!("[{}] {}", language, literal),
                None => literal.clone(),
            },
            Block::ThematicBreak => "---".to_string(),
        }
    }
}

impl AstNode for ListItem {
    fn node_type(&self) -> &'static str {
        "ListItem"
    }

    fn display_label(&self) -> String {
        self.blocks
            .first()
            .map(|block| block.display_label())
            .unwrap_or_default()
    }
}

impl AstNode for Inline {
    fn node_type(&self) -> &'static str {
        match self {
            Inline::Text { .. } => "Text",
            Inline::Bold { .. } => "Bold",
            Inline::Italic { .. } => "Italic",
            Inline::Strikethrough { .. } => "Strikethrough",
            Inline::Code { .. } => "Code",
            Inline::Link { .. } => "Link",
            Inline::LineBreak => "LineBreak",
        }
    }

    fn display_label(&self) -> String {
        match self {
            Inline::Link { url, .. } => url.clone(),
            Inline::LineBreak => String::new(),
            other => other.plain_text(),
        }
    }
}

fn inline_label(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct DepthTracker {
        depth: usize,
        max_depth: usize,
        leaves: Vec<String>,
    }

    impl Visitor for DepthTracker {
        fn visit_inline(&mut self, inline: &Inline) {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
            if let Some(text) = inline.as_text() {
                self.leaves.push(text.to_string());
            }
        }

        fn leave_inline(&mut self, _inline: &Inline) {
            self.depth -= 1;
        }
    }

    #[test]
    fn test_visit_and_leave_are_balanced() {
        let doc = Document::new(vec![Block::Paragraph {
            inlines: vec![
                Inline::text("a"),
                Inline::Bold {
                    children: vec![Inline::Italic {
                        children: vec![Inline::text("b")],
                    }],
                },
            ],
        }]);
        let mut tracker = DepthTracker::default();
        doc.accept(&mut tracker);
        assert_eq!(tracker.depth, 0);
        assert_eq!(tracker.max_depth, 3);
        assert_eq!(tracker.leaves, vec!["a", "b"]);
    }

    #[test]
    fn test_display_labels() {
        let header = Block::Header {
            level: 2,
            inlines: vec![Inline::text("Intro")],
        };
        assert_eq!(header.node_type(), "Header");
        assert_eq!(header.display_label(), "h2 Intro");
        assert_eq!(Block::ThematicBreak.display_label(), "---");
        assert_eq!(
            Inline::link(vec![Inline::text("x")], "https://e.com").display_label(),
            "https://e.com"
        );
    }
}
