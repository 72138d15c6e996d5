//! Inline parsing
//!
//!     Once the block parser closes a paragraph or header, its accumulated raw text is
//!     parsed here into [`Inline`](crate::ast::Inline) nodes. Inline parsing never fails:
//!     markup that does not match up is kept as literal text.
//!
//!     See the [parser](parser) module for the ordered matcher design and
//!     [flanking](flanking) for the rule deciding which delimiter runs can open or close
//!     a span.

pub mod flanking;
mod parser;

pub use parser::parse_inlines;

use crate::ast::Inline;
use crate::parsing::ParseOptions;

/// Parse a standalone inline string with the default options.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    parse_inlines(text, 0, &ParseOptions::default())
}
