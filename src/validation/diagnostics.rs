//! Validation diagnostics

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A location in the validated text
///
/// `line` and `column` are 0-based (the column counts characters); the `Display` form is
/// 1-based `line:column`, as editors show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Span markers of the strict dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Marker {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    LinkText,
    LinkUrl,
}

impl Marker {
    pub fn symbol(self) -> &'static str {
        match self {
            Marker::Bold => "*",
            Marker::Italic => "_",
            Marker::Underline => "__",
            Marker::Strikethrough => "~",
            Marker::Spoiler => "||",
            Marker::Code => "`",
            Marker::Pre => "```",
            Marker::LinkText => "[",
            Marker::LinkUrl => "(",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Marker::Bold => "bold",
            Marker::Italic => "italic",
            Marker::Underline => "underline",
            Marker::Strikethrough => "strikethrough",
            Marker::Spoiler => "spoiler",
            Marker::Code => "code",
            Marker::Pre => "pre block",
            Marker::LinkText => "link text",
            Marker::LinkUrl => "link url",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.name(), self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{position}: unescaped reserved character '{character}'")]
    UnescapedReservedCharacter { position: Position, character: char },

    #[error("{open}: unterminated {marker}")]
    UnterminatedSpan { open: Position, marker: Marker },

    #[error("{close}: {found} closes before {expected} opened at {open}")]
    MismatchedNesting {
        open: Position,
        close: Position,
        expected: Marker,
        found: Marker,
    },
}

impl ValidationError {
    /// Where the problem is reported: the character, the unclosed opener, or the
    /// out-of-order closer.
    pub fn position(&self) -> Position {
        match self {
            ValidationError::UnescapedReservedCharacter { position, .. } => *position,
            ValidationError::UnterminatedSpan { open, .. } => *open,
            ValidationError::MismatchedNesting { close, .. } => *close,
        }
    }

    /// The diagnostic without its position.
    pub fn message(&self) -> String {
        match self {
            ValidationError::UnescapedReservedCharacter { character, .. } => {
                format!("unescaped reserved character '{}'", character)
            }
            ValidationError::UnterminatedSpan { marker, .. } => {
                format!("unterminated {}", marker)
            }
            ValidationError::MismatchedNesting {
                open,
                expected,
                found,
                ..
            } => format!("{} closes before {} opened at {}", found, expected, open),
        }
    }
}
