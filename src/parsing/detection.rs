//! Block-start detection
//!
//! One function answers "does a new block start at the cursor?" for both contexts the
//! block parser is in. Inside an open fence only a closing fence counts; everywhere else
//! the full rule set applies (block quote, list item, fence, header, thematic break).

use super::cursor::LineCursor;
use crate::lexing::Token;
use once_cell::sync::Lazy;
use regex::Regex;

/// Three or more identical `-`, `*` or `_`, optionally separated by spaces or tabs
static THEMATIC_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:\*[ \t]*){3,}|(?:-[ \t]*){3,}|(?:_[ \t]*){3,})$")
        .expect("thematic break pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockStart {
    BlockQuote,
    ListItem {
        ordered: bool,
        delimiter: char,
        width: usize,
    },
    /// A fence opener, or a closer when detected inside a fence
    Fence {
        marker: char,
        run: usize,
        language: Option<String>,
    },
    Header(u8),
    ThematicBreak,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DetectContext {
    pub inside_fence: bool,
    /// Kind and marker of a list whose item did not continue on this line
    pub open_list: Option<(bool, char)>,
}

impl DetectContext {
    pub fn inside_fence() -> Self {
        Self {
            inside_fence: true,
            open_list: None,
        }
    }
}

pub fn detect_block_start(cursor: &LineCursor<'_>, context: &DetectContext) -> Option<BlockStart> {
    if context.inside_fence {
        return cursor
            .rest()
            .iter()
            .find(|(token, _)| {
                !matches!(token, Token::Indentation(_) | Token::BlockquoteMarker)
            })
            .and_then(|(token, _)| match token {
                Token::FenceDelimiter {
                    marker,
                    run,
                    language,
                } => Some(BlockStart::Fence {
                    marker: *marker,
                    run: *run,
                    language: language.clone(),
                }),
                _ => None,
            });
    }

    let (token, range) = cursor.significant()?;

    if is_thematic_break(cursor, range.start) {
        let continues_list = match (token, context.open_list) {
            (
                Token::ListMarker {
                    ordered, delimiter, ..
                },
                Some((open_ordered, open_delimiter)),
            ) => *ordered == open_ordered && *delimiter == open_delimiter,
            _ => false,
        };
        if !continues_list {
            return Some(BlockStart::ThematicBreak);
        }
    }

    match token {
        Token::BlockquoteMarker => Some(BlockStart::BlockQuote),
        Token::ListMarker {
            ordered,
            delimiter,
            width,
            ..
        } => Some(BlockStart::ListItem {
            ordered: *ordered,
            delimiter: *delimiter,
            width: *width,
        }),
        Token::FenceDelimiter {
            marker,
            run,
            language,
        } => Some(BlockStart::Fence {
            marker: *marker,
            run: *run,
            language: language.clone(),
        }),
        Token::HeaderMarker(level) => Some(BlockStart::Header(*level)),
        _ => None,
    }
}

fn is_thematic_break(cursor: &LineCursor<'_>, start: usize) -> bool {
    THEMATIC_BREAK.is_match(cursor.text_from(start).trim_end())
}
