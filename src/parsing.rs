//! Block parsing
//!
//!     This module turns the token stream into a [`Document`]. The block parser lives in
//!     [blocks](blocks), the shared block-start detector in [detection](detection) and the
//!     per-line token cursor in [cursor](cursor).
//!
//!     Parsing never fails. Markup that does not form a block is paragraph text, markup
//!     that does not form a span is literal text, and nesting beyond
//!     [`ParseOptions::max_nesting_depth`] degrades to literal text as well.

pub mod blocks;
pub mod cursor;
pub mod detection;

use crate::ast::Document;
use crate::lexing::{tokenize, Token};
use blocks::BlockParser;
use std::ops::Range;
use tracing::debug;

/// Default ceiling on container and span nesting
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Containers and inline spans nested deeper than this stay literal text.
    pub max_nesting_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Build a document from an already tokenized source.
pub fn parse_blocks(
    tokens: &[(Token, Range<usize>)],
    source: &str,
    options: &ParseOptions,
) -> Document {
    let document = BlockParser::new(source, options).parse(tokens);
    debug!(
        tokens = tokens.len(),
        blocks = document.blocks.len(),
        "parsed blocks"
    );
    document
}

/// Tokenize and parse a source string.
pub fn parse_document(source: &str, options: &ParseOptions) -> Document {
    let tokens = tokenize(source);
    parse_blocks(&tokens, source, options)
}
