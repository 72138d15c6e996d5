//! Cursor over the tokens of one line
//!
//! Container continuation and block detection both consume a line from the left. The
//! cursor tracks the current token plus the columns of indentation seen but not yet
//! claimed by a list item, so nested items can each take their share.

use crate::lexing::Token;
use std::ops::Range;

pub struct LineCursor<'t> {
    tokens: &'t [(Token, Range<usize>)],
    source: &'t str,
    pos: usize,
    pending_indent: usize,
}

impl<'t> LineCursor<'t> {
    /// `tokens` is one line as produced by [`split_lines`](crate::lexing::split_lines),
    /// ending with its `LineBreak`.
    pub fn new(tokens: &'t [(Token, Range<usize>)], source: &'t str) -> Self {
        Self {
            tokens,
            source,
            pos: 0,
            pending_indent: 0,
        }
    }

    pub fn current(&self) -> Option<&'t (Token, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    /// The first token at or after the cursor that is not indentation.
    pub fn significant(&self) -> Option<&'t (Token, Range<usize>)> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .find(|(token, _)| !matches!(token, Token::Indentation(_)))
    }

    /// Tokens from the cursor to the end of the line.
    pub fn rest(&self) -> &'t [(Token, Range<usize>)] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Fold indentation tokens at the cursor into the pending indent.
    pub fn absorb_indentation(&mut self) {
        while let Some((Token::Indentation(columns), _)) = self.current() {
            self.pending_indent += columns;
            self.pos += 1;
        }
    }

    /// Take the pending indent, leaving none.
    pub fn take_pending_indent(&mut self) -> usize {
        self.absorb_indentation();
        std::mem::take(&mut self.pending_indent)
    }

    /// Consume a `>` prefix (after optional indentation).
    pub fn eat_blockquote(&mut self) -> bool {
        let saved = (self.pos, self.pending_indent);
        self.absorb_indentation();
        if let Some((Token::BlockquoteMarker, _)) = self.current() {
            self.pos += 1;
            self.pending_indent = 0;
            true
        } else {
            (self.pos, self.pending_indent) = saved;
            false
        }
    }

    /// Claim `columns` of indentation for a list item's content.
    pub fn consume_indent(&mut self, columns: usize) -> bool {
        self.absorb_indentation();
        if self.pending_indent >= columns {
            self.pending_indent -= columns;
            true
        } else {
            false
        }
    }

    /// True when nothing but indentation is left on the line.
    pub fn is_blank(&self) -> bool {
        self.rest()
            .iter()
            .all(|(token, _)| matches!(token, Token::Indentation(_)) || token.is_line_end())
    }

    fn line_end(&self) -> usize {
        self.tokens
            .last()
            .map(|(_, range)| range.start)
            .unwrap_or_default()
    }

    /// Raw source text from the cursor to the end of the line.
    pub fn remainder_text(&self) -> &'t str {
        let end = self.line_end();
        let start = self
            .current()
            .map(|(_, range)| range.start)
            .unwrap_or(end)
            .min(end);
        &self.source[start..end]
    }

    /// Raw source text from byte offset `start` to the end of the line.
    pub fn text_from(&self, start: usize) -> &'t str {
        let end = self.line_end();
        &self.source[start.min(end)..end]
    }

    /// Raw source text of the whole line, without its terminator.
    pub fn raw_line(&self) -> &'t str {
        let end = self.line_end();
        let start = self
            .tokens
            .first()
            .map(|(_, range)| range.start)
            .unwrap_or(end)
            .min(end);
        &self.source[start..end]
    }
}
