//! Token definitions for chatmark sources
//!
//! Two layers of tokens live here. [`Token`] is the public stream handed to the block
//! parser: it carries line-level structure (indentation, quote and list markers, fences,
//! headers) plus the inline marker tokens found in the rest of each line. [`Lexeme`] is the
//! logos-derived character-level lexer used for the inline portion of a line.

use logos::Logos;
use serde::Serialize;
use std::fmt;

/// The character family of an emphasis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EmphasisKind {
    /// `*`
    Star,
    /// `_`
    Underscore,
    /// `~`
    Tilde,
}

impl EmphasisKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(EmphasisKind::Star),
            '_' => Some(EmphasisKind::Underscore),
            '~' => Some(EmphasisKind::Tilde),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            EmphasisKind::Star => '*',
            EmphasisKind::Underscore => '_',
            EmphasisKind::Tilde => '~',
        }
    }
}

/// All tokens produced by [`tokenize`](super::tokenize)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    /// Plain text; inside a fence this is the whole raw line
    Text(String),
    /// Leading whitespace, measured in columns (tabs advance to the next multiple of 4)
    Indentation(usize),
    /// `#` run of 1 to 6 followed by a space or end of line
    HeaderMarker(u8),
    /// `-`, `*`, `+` or `<digits>.` / `<digits>)` followed by whitespace
    ListMarker {
        ordered: bool,
        index: Option<u64>,
        delimiter: char,
        /// Marker length plus the padding that counts towards the item's content column
        width: usize,
    },
    /// `>` plus one optional space
    BlockquoteMarker,
    /// An opening or closing fence line
    FenceDelimiter {
        marker: char,
        run: usize,
        language: Option<String>,
    },
    EmphasisMarker {
        kind: EmphasisKind,
        run: usize,
    },
    CodeSpanDelimiter(usize),
    LinkTextOpen,
    LinkTextClose,
    LinkUrlOpen,
    LinkUrlClose,
    /// Backslash followed by ASCII punctuation
    Escape(char),
    LineBreak,
    Eof,
}

impl Token {
    /// Check if this token only carries line-leading structure
    pub fn is_line_prefix(&self) -> bool {
        matches!(
            self,
            Token::Indentation(_) | Token::BlockquoteMarker | Token::ListMarker { .. }
        )
    }

    /// Check if this token ends a line
    pub fn is_line_end(&self) -> bool {
        matches!(self, Token::LineBreak | Token::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text(text) => write!(f, "Text({:?})", text),
            Token::Indentation(columns) => write!(f, "Indentation({})", columns),
            Token::HeaderMarker(level) => write!(f, "HeaderMarker({})", level),
            Token::ListMarker {
                ordered,
                index,
                delimiter,
                width,
            } => match (ordered, index) {
                (true, Some(index)) => {
                    write!(f, "ListMarker({}{}, width {})", index, delimiter, width)
                }
                _ => write!(f, "ListMarker({}, width {})", delimiter, width),
            },
            Token::BlockquoteMarker => write!(f, "BlockquoteMarker"),
            Token::FenceDelimiter {
                marker,
                run,
                language,
            } => match language {
                Some(language) => write!(f, "FenceDelimiter({}x{}, {})", marker, run, language),
                None => write!(f, "FenceDelimiter({}x{})", marker, run),
            },
            Token::EmphasisMarker { kind, run } => {
                write!(f, "EmphasisMarker({}x{})", kind.as_char(), run)
            }
            Token::CodeSpanDelimiter(run) => write!(f, "CodeSpanDelimiter({})", run),
            Token::LinkTextOpen => write!(f, "LinkTextOpen"),
            Token::LinkTextClose => write!(f, "LinkTextClose"),
            Token::LinkUrlOpen => write!(f, "LinkUrlOpen"),
            Token::LinkUrlClose => write!(f, "LinkUrlClose"),
            Token::Escape(c) => write!(f, "Escape({:?})", c),
            Token::LineBreak => write!(f, "LineBreak"),
            Token::Eof => write!(f, "Eof"),
        }
    }
}

/// Character-level lexemes for the inline part of a line
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Lexeme {
    // Backslash escapes: backslash + one ASCII punctuation character
    #[regex(r"\\[!-/:-@\[-`{-~]")]
    Escape,

    #[regex(r"\*+")]
    Stars,
    #[regex(r"_+")]
    Underscores,
    #[regex(r"~+")]
    Tildes,
    #[regex(r"`+")]
    Backticks,

    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,

    // A backslash that does not start an escape is literal text
    #[token("\\")]
    Backslash,

    // Text content (catch-all for non-special characters)
    #[regex(r"[^\\*_~`\[\]()]+")]
    Text,
}
