//! Testing utilities for AST assertions
//!
//! Matching on nested enums by hand gets long quickly:
//!
//! ```rust-example
//! match &doc.blocks[0] {
//!     Block::List(list) => match &list.items[0].blocks[0] {
//!         Block::Paragraph { inlines } => assert_eq!(inlines[0], Inline::text("a")),
//!         other => panic!("expected paragraph, got {:?}", other),
//!     },
//!     other => panic!("expected list, got {:?}", other),
//! }
//! ```
//!
//! The fluent [`assert_doc`] API states the same shape directly, and every failure names
//! the path to the node that did not match (`doc:blocks[0]:items[0]:blocks[0]`):
//!
//! ```rust-example
//! use chatmark::testing::assert_doc;
//!
//! assert_doc(&doc)
//!     .block_count(1)
//!     .block(0, |b| {
//!         b.assert_list().ordered(false).item(0, |item| {
//!             item.block(0, |b| {
//!                 b.assert_paragraph().text("a");
//!             });
//!         });
//!     });
//! ```

mod assertions;

pub use assertions::{
    assert_doc, BlockAssertion, DocumentAssertion, FenceAssertion, HeaderAssertion,
    InlineAssertion, ListAssertion, ListItemAssertion, ParagraphAssertion, QuoteAssertion,
};
