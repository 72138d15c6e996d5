//! AST Snapshot - a normalized intermediate representation of the AST tree
//!
//! The snapshot captures the tree as node types, labels and children so that the
//! inspection views (tree visualisation, JSON) do not each reimplement the traversal.

use super::block::Block;
use super::document::Document;
use super::inline::Inline;
use super::traits::AstNode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Paragraph", "List", "Bold")
    pub node_type: String,
    /// The primary label or text content of the node
    pub label: String,
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

pub fn snapshot_from_document(doc: &Document) -> AstSnapshot {
    AstSnapshot::new(doc.node_type(), doc.display_label())
        .with_children(doc.blocks.iter().map(snapshot_from_block).collect())
}

pub fn snapshot_from_block(block: &Block) -> AstSnapshot {
    let snapshot = AstSnapshot::new(block.node_type(), block.display_label());
    let children = match block {
        Block::Paragraph { inlines } | Block::Header { inlines, .. } => {
            inlines.iter().map(snapshot_from_inline).collect()
        }
        Block::List(list) => list
            .items
            .iter()
            .map(|item| {
                AstSnapshot::new(item.node_type(), item.display_label())
                    .with_children(item.blocks.iter().map(snapshot_from_block).collect())
            })
            .collect(),
        Block::BlockQuote { blocks } => blocks.iter().map(snapshot_from_block).collect(),
        Block::FencedCodeBlock { .. } | Block::ThematicBreak => Vec::new(),
    };
    snapshot.with_children(children)
}

pub fn snapshot_from_inline(inline: &Inline) -> AstSnapshot {
    AstSnapshot::new(inline.node_type(), inline.display_label())
        .with_children(inline.children().iter().map(snapshot_from_inline).collect())
}

#[cfg(test)]
mod tests {
    use super::super::block::{List, ListItem};
    use super::*;

    #[test]
    fn test_snapshot_structure() {
        let doc = Document::new(vec![Block::List(List::new(
            true,
            vec![ListItem::new(vec![Block::Paragraph {
                inlines: vec![Inline::Bold {
                    children: vec![Inline::text("x")],
                }],
            }])],
        ))]);
        let snapshot = snapshot_from_document(&doc);
        assert_eq!(snapshot.label, "Document (1 blocks)");
        let list = &snapshot.children[0];
        assert_eq!(list.node_type, "List");
        assert_eq!(list.label, "1 items, ordered");
        let item = &list.children[0];
        assert_eq!(item.node_type, "ListItem");
        assert_eq!(item.label, "x");
        assert_eq!(item.children[0].children[0].node_type, "Bold");
        assert_eq!(item.children[0].children[0].children[0].label, "x");
    }
}
