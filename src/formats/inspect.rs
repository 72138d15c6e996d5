//! Inspection views
//!
//! Debugging views of a parse, as printed by `chatmark inspect`: the treeviz drawing of
//! the AST, the AST serialized as JSON, and the raw token stream with byte ranges.

use super::treeviz::to_treeviz_str;
use super::FormatError;
use crate::ast::Document;
use crate::lexing::Token;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Treeviz,
    Json,
    Tokens,
}

impl View {
    pub const ALL: [View; 3] = [View::Treeviz, View::Json, View::Tokens];

    pub fn name(self) -> &'static str {
        match self {
            View::Treeviz => "treeviz",
            View::Json => "json",
            View::Tokens => "tokens",
        }
    }

    /// Render this view of `source`, given its tokens and parsed document.
    pub fn render(
        self,
        tokens: &[(Token, Range<usize>)],
        document: &Document,
    ) -> Result<String, FormatError> {
        match self {
            View::Treeviz => Ok(to_treeviz_str(document)),
            View::Json => to_json_str(document),
            View::Tokens => Ok(to_tokens_str(tokens)),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for View {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        View::ALL
            .into_iter()
            .find(|view| view.name() == wanted)
            .ok_or_else(|| FormatError::ViewNotFound(s.to_string()))
    }
}

pub fn to_json_str(document: &Document) -> Result<String, FormatError> {
    serde_json::to_string_pretty(document).map_err(|e| FormatError::Serialization(e.to_string()))
}

/// One token per line: `start..end  Token`.
pub fn to_tokens_str(tokens: &[(Token, Range<usize>)]) -> String {
    let mut out = String::new();
    for (token, range) in tokens {
        out.push_str(&format!("{:>5}..{:<5} {}\n", range.start, range.end, token));
    }
    out
}
