//! Strict-dialect scanner
//!
//! One left-to-right pass over the characters with a stack of open markers. The marker on
//! top of the stack decides the mode:
//!
//!     pre block   only `\` and a closing ``` ``` ``` matter; a lone backtick is an error
//!     code        only `\` and the closing backtick matter
//!     link url    only `\` and the closing `)` matter
//!     otherwise   every reserved character is either markup or an error
//!
//! Markers toggle: a marker equal to the top of the stack closes it, one found deeper in
//! the stack closes out of order, anything else opens. The stack keeps the depths of each
//! marker kind, so finding the innermost open marker of a kind does not walk the stack.

use super::diagnostics::{Marker, Position, ValidationError};
use crate::dialect::is_reserved;

pub struct Scanner {
    chars: Vec<char>,
    positions: Vec<Position>,
    index: usize,
    at_line_start: bool,
    stack: MarkerStack,
    errors: Vec<ValidationError>,
}

const MARKER_KINDS: usize = 9;

/// Open markers, innermost last
#[derive(Default)]
struct MarkerStack {
    entries: Vec<(Marker, Position)>,
    // stack depths of the open markers of each kind, innermost last
    depths: [Vec<usize>; MARKER_KINDS],
}

impl MarkerStack {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn top(&self) -> Option<(Marker, Position)> {
        self.entries.last().copied()
    }

    fn position_at(&self, depth: usize) -> Position {
        self.entries[depth].1
    }

    /// Depth of the innermost open `marker`.
    fn innermost(&self, marker: Marker) -> Option<usize> {
        self.depths[marker as usize].last().copied()
    }

    fn push(&mut self, marker: Marker, position: Position) {
        self.depths[marker as usize].push(self.entries.len());
        self.entries.push((marker, position));
    }

    fn pop(&mut self) -> Option<(Marker, Position)> {
        let (marker, position) = self.entries.pop()?;
        self.depths[marker as usize].pop();
        Some((marker, position))
    }

    fn truncate(&mut self, depth: usize) {
        while self.entries.len() > depth {
            self.pop();
        }
    }

    fn take_all(&mut self) -> Vec<(Marker, Position)> {
        for depths in &mut self.depths {
            depths.clear();
        }
        std::mem::take(&mut self.entries)
    }
}

impl Scanner {
    pub fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut positions = Vec::with_capacity(text.len() + 1);
        let (mut line, mut column) = (0, 0);
        for (offset, c) in text.char_indices() {
            chars.push(c);
            positions.push(Position::new(offset, line, column));
            if c == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        positions.push(Position::new(text.len(), line, column));
        Self {
            chars,
            positions,
            index: 0,
            at_line_start: true,
            stack: MarkerStack::default(),
            errors: Vec::new(),
        }
    }

    pub fn run(mut self) -> Vec<ValidationError> {
        while self.index < self.chars.len() {
            let mode = self.stack.top().map(|(marker, _)| marker);
            match mode {
                Some(Marker::Pre) => self.step_pre(),
                Some(Marker::Code) => self.step_until(Marker::Code, '`'),
                Some(Marker::LinkUrl) => self.step_until(Marker::LinkUrl, ')'),
                _ => self.step_text(),
            }
        }
        for (marker, open) in self.stack.take_all() {
            self.errors
                .push(ValidationError::UnterminatedSpan { open, marker });
        }
        self.errors
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.index + ahead).copied()
    }

    fn position(&self) -> Position {
        self.positions[self.index.min(self.positions.len() - 1)]
    }

    fn advance(&mut self, count: usize) {
        for _ in 0..count {
            if let Some(c) = self.peek(0) {
                if c == '\n' {
                    self.at_line_start = true;
                } else if c != ' ' && c != '\t' {
                    self.at_line_start = false;
                }
                self.index += 1;
            }
        }
    }

    fn reserved(&mut self, character: char) {
        self.errors.push(ValidationError::UnescapedReservedCharacter {
            position: self.position(),
            character,
        });
        self.advance(1);
    }

    /// A backslash escapes any character with a code from 1 to 126.
    fn escape(&mut self) {
        match self.peek(1) {
            Some(next) if (1..=126).contains(&(next as u32)) => self.advance(2),
            _ => self.reserved('\\'),
        }
    }

    fn step_text(&mut self) {
        let Some(c) = self.peek(0) else {
            return;
        };
        match c {
            '\\' => self.escape(),
            '*' => self.toggle(Marker::Bold, 1),
            '_' if self.peek(1) == Some('_') => self.toggle(Marker::Underline, 2),
            '_' => self.toggle(Marker::Italic, 1),
            '~' => self.toggle(Marker::Strikethrough, 1),
            '|' if self.peek(1) == Some('|') => self.toggle(Marker::Spoiler, 2),
            '`' if self.peek(1) == Some('`') && self.peek(2) == Some('`') => self.open_pre(),
            '`' => self.open(Marker::Code, 1),
            '[' => self.open(Marker::LinkText, 1),
            ']' => self.close_link_text(),
            '>' if self.at_line_start => self.advance(1),
            c if is_reserved(c) => self.reserved(c),
            _ => self.advance(1),
        }
    }

    fn step_pre(&mut self) {
        match self.peek(0) {
            Some('\\') => self.escape(),
            Some('`') if self.peek(1) == Some('`') && self.peek(2) == Some('`') => {
                self.stack.pop();
                self.advance(3);
            }
            Some('`') => self.reserved('`'),
            _ => self.advance(1),
        }
    }

    fn step_until(&mut self, marker: Marker, closer: char) {
        match self.peek(0) {
            Some('\\') => self.escape(),
            Some(c) if c == closer => {
                if matches!(self.stack.top(), Some((top, _)) if top == marker) {
                    self.stack.pop();
                }
                self.advance(1);
            }
            _ => self.advance(1),
        }
    }

    fn open(&mut self, marker: Marker, width: usize) {
        let position = self.position();
        self.stack.push(marker, position);
        self.advance(width);
    }

    fn open_pre(&mut self) {
        self.open(Marker::Pre, 3);
        // the language tag runs to the end of the line
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.advance(1);
        }
    }

    fn toggle(&mut self, marker: Marker, width: usize) {
        match self.stack.innermost(marker) {
            Some(depth) if depth + 1 == self.stack.len() => {
                self.stack.pop();
                self.advance(width);
            }
            Some(depth) => {
                self.mismatched(depth, marker);
                self.advance(width);
            }
            None => self.open(marker, width),
        }
    }

    /// Report a closer found below the top of the stack and pop down through it.
    fn mismatched(&mut self, depth: usize, found: Marker) {
        if let Some((expected, open)) = self.stack.top() {
            self.errors.push(ValidationError::MismatchedNesting {
                open,
                close: self.position(),
                expected,
                found,
            });
        }
        self.stack.truncate(depth);
    }

    fn close_link_text(&mut self) {
        let Some(depth) = self.stack.innermost(Marker::LinkText) else {
            self.reserved(']');
            return;
        };
        let open = self.stack.position_at(depth);
        if depth + 1 == self.stack.len() {
            self.stack.pop();
        } else {
            self.mismatched(depth, Marker::LinkText);
        }
        self.advance(1);
        if self.peek(0) == Some('(') {
            self.open(Marker::LinkUrl, 1);
        } else {
            self.errors.push(ValidationError::UnterminatedSpan {
                open,
                marker: Marker::LinkText,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<ValidationError> {
        Scanner::new(text).run()
    }

    #[test]
    fn test_positions_track_lines() {
        let errors = scan("ok\nab.");
        assert_eq!(
            errors,
            vec![ValidationError::UnescapedReservedCharacter {
                position: Position::new(5, 1, 2),
                character: '.',
            }]
        );
    }

    #[test]
    fn test_underline_is_greedy() {
        assert!(scan("__u__ _i_").is_empty());
        let errors = scan("_a__b_");
        assert!(matches!(
            errors[0],
            ValidationError::MismatchedNesting {
                expected: Marker::Underline,
                found: Marker::Italic,
                ..
            }
        ));
    }

    #[test]
    fn test_pre_block_mode() {
        assert!(scan("```c++\nint x = a.b(*p);\n```").is_empty());
        let errors = scan("```\na ` b\n```");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::UnescapedReservedCharacter { character: '`', .. }
        ));
    }

    #[test]
    fn test_link_modes() {
        assert!(scan("[a *b*](https://x.org/a_(b\\))").is_empty());
        let errors = scan("[text] more");
        assert!(matches!(
            errors[0],
            ValidationError::UnterminatedSpan {
                marker: Marker::LinkText,
                ..
            }
        ));
    }

    #[test]
    fn test_escapes() {
        assert!(scan("\\. \\\\ \\>").is_empty());
        let errors = scan("end\\");
        assert!(matches!(
            errors[0],
            ValidationError::UnescapedReservedCharacter { character: '\\', .. }
        ));
        assert!(!scan("\\é").is_empty());
    }

    #[test]
    fn test_marker_table_covers_every_kind() {
        assert_eq!(Marker::LinkUrl as usize + 1, MARKER_KINDS);
    }

    #[test]
    fn test_marker_stack_tracks_innermost() {
        let at = |offset| Position::new(offset, 0, offset);
        let mut stack = MarkerStack::default();
        stack.push(Marker::Bold, at(0));
        stack.push(Marker::LinkText, at(1));
        stack.push(Marker::Bold, at(2));
        assert_eq!(stack.innermost(Marker::Bold), Some(2));
        assert_eq!(stack.innermost(Marker::LinkText), Some(1));

        stack.truncate(1);
        assert_eq!(stack.innermost(Marker::Bold), Some(0));
        assert_eq!(stack.innermost(Marker::LinkText), None);
        assert_eq!(stack.take_all(), vec![(Marker::Bold, at(0))]);
        assert_eq!(stack.innermost(Marker::Bold), None);
    }

    #[test]
    fn test_toggles_under_unclosed_link_texts() {
        let errors = scan("[[[*a* _b_");
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|error| matches!(
            error,
            ValidationError::UnterminatedSpan {
                marker: Marker::LinkText,
                ..
            }
        )));
    }
}
