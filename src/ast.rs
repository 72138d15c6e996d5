//! AST definitions and utilities for chatmark documents
//!
//!     A parsed source is a [`Document`]: an ordered sequence of [`Block`]s, whose leaves
//!     hold [`Inline`] content. The tree is made of exclusively owned children; there are no
//!     back references, spans or shared nodes, and it is not mutated once built.
//!
//! Blocks
//!
//!     Paragraph and Header hold inlines. List holds items of one kind, each item holding
//!     blocks. BlockQuote holds blocks. FencedCodeBlock holds its literal text, which is
//!     never inline-parsed. ThematicBreak is a leaf.
//!
//! Inlines
//!
//!     Text and Code are leaves carrying their content. Bold, Italic and Strikethrough
//!     wrap child inlines. Link carries a parsed label and a verbatim url. LineBreak is a
//!     hard break inside a paragraph; soft line endings stay in the text as `\n`.

pub mod block;
pub mod document;
pub mod inline;
pub mod snapshot;
pub mod traits;

pub use block::{Block, List, ListItem};
pub use document::{Document, NodeCounts};
pub use inline::Inline;
pub use snapshot::{snapshot_from_document, AstSnapshot};
pub use traits::{walk_block, walk_document, walk_inline, AstNode, Visitor};
