//! Lexer
//!
//! This module turns a chatmark source string into the linear token stream consumed by the
//! block parser.
//!
//! Structure:
//!     Tokenization is line oriented. Line-leading structure (indentation, block quote and
//!     list markers, headers and fences) is recognized by hand at the start of each line,
//!     and the remainder of the line goes through the logos-derived [`Lexeme`] lexer for the
//!     inline markers (emphasis runs, backticks, brackets, parentheses and escapes).
//!
//! Literal regions
//!
//!     The tokenizer tracks whether it is inside a fenced code block. While a fence is open
//!     the only question asked of a line is whether it closes the fence; everything else is
//!     emitted as raw text so that fence contents are never re-interpreted downstream.

pub mod tokenizer;
pub mod tokens;

pub use tokenizer::tokenize;
pub use tokens::{EmphasisKind, Lexeme, Token};

use std::ops::Range;

/// Group a token stream into lines, each slice ending with its `LineBreak`.
///
/// The trailing `Eof` is not part of any line.
pub fn split_lines(tokens: &[(Token, Range<usize>)]) -> Vec<&[(Token, Range<usize>)]> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (i, (token, _)) in tokens.iter().enumerate() {
        match token {
            Token::LineBreak => {
                lines.push(&tokens[start..=i]);
                start = i + 1;
            }
            Token::Eof => break,
            _ => {}
        }
    }
    lines
}
