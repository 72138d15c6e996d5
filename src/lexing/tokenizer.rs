//! Line-oriented tokenizer
//!
//!     The tokenizer makes one forward pass over the source, one line at a time. Each line
//!     is split into its leading structure (indentation, `>` markers, list markers), an
//!     optional block opener (fence or header) and the inline remainder, which is handed to
//!     the logos [`Lexeme`] lexer.
//!
//!     Fenced regions are literal. Once a fence opens, every following line is emitted as a
//!     single raw [`Token::Text`] until a line closes the fence: same marker character, a run
//!     at least as long as the opening one and nothing but whitespace after it. No other
//!     marker is recognized inside the fence.

use super::tokens::{EmphasisKind, Lexeme, Token};
use logos::Logos;
use std::ops::Range;

/// Tabs count as four columns of indentation
const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy)]
struct OpenFence {
    marker: char,
    run: usize,
    quote_depth: usize,
}

/// Tokenize a full source string, line by line.
///
/// Every line ends with [`Token::LineBreak`] (an empty range for a final line without a
/// terminator) and the stream ends with [`Token::Eof`].
pub fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
    let mut tokens = Vec::new();
    let mut fence: Option<OpenFence> = None;
    let mut offset = 0;

    for raw_line in source.split_inclusive('\n') {
        let content = raw_line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(raw_line);
        let line_end = offset + content.len();

        fence = match fence {
            Some(open) => tokenize_fenced_line(content, offset, open, &mut tokens),
            None => tokenize_line(content, offset, &mut tokens),
        };

        tokens.push((Token::LineBreak, line_end..offset + raw_line.len()));
        offset += raw_line.len();
    }

    tokens.push((Token::Eof, source.len()..source.len()));
    tokens
}

/// Tokenize a line outside any fence. Returns the fence opened by this line, if any.
fn tokenize_line(
    line: &str,
    base: usize,
    tokens: &mut Vec<(Token, Range<usize>)>,
) -> Option<OpenFence> {
    let mut pos = 0;
    let mut quote_depth = 0;

    loop {
        let (columns, next) = scan_indentation(line, pos);
        if next > pos {
            tokens.push((Token::Indentation(columns), base + pos..base + next));
            pos = next;
        }
        if line[pos..].starts_with('>') {
            let mut end = pos + 1;
            if line[end..].starts_with(' ') {
                end += 1;
            }
            tokens.push((Token::BlockquoteMarker, base + pos..base + end));
            quote_depth += 1;
            pos = end;
            continue;
        }
        if let Some((marker, len)) = scan_list_marker(&line[pos..]) {
            tokens.push((marker, base + pos..base + pos + len));
            pos += len;
            continue;
        }
        break;
    }

    let rest = &line[pos..];
    if let Some((marker, run, language)) = scan_fence_opener(rest) {
        tokens.push((
            Token::FenceDelimiter {
                marker,
                run,
                language,
            },
            base + pos..base + line.len(),
        ));
        return Some(OpenFence {
            marker,
            run,
            quote_depth,
        });
    }

    if let Some((level, len)) = scan_header_marker(rest) {
        tokens.push((Token::HeaderMarker(level), base + pos..base + pos + len));
        pos += len;
    }

    tokenize_inline(&line[pos..], base + pos, tokens);
    None
}

/// Tokenize a line inside an open fence. Returns the fence if it stays open.
fn tokenize_fenced_line(
    line: &str,
    base: usize,
    open: OpenFence,
    tokens: &mut Vec<(Token, Range<usize>)>,
) -> Option<OpenFence> {
    let mut prefix = Vec::new();
    let mut pos = 0;
    let mut depth = 0;

    loop {
        let (columns, next) = scan_indentation(line, pos);
        if next > pos {
            prefix.push((Token::Indentation(columns), base + pos..base + next));
            pos = next;
        }
        if depth < open.quote_depth && line[pos..].starts_with('>') {
            let mut end = pos + 1;
            if line[end..].starts_with(' ') {
                end += 1;
            }
            prefix.push((Token::BlockquoteMarker, base + pos..base + end));
            depth += 1;
            pos = end;
            continue;
        }
        break;
    }

    if let Some(run) = scan_fence_closer(&line[pos..], open.marker, open.run) {
        tokens.extend(prefix);
        tokens.push((
            Token::FenceDelimiter {
                marker: open.marker,
                run,
                language: None,
            },
            base + pos..base + line.len(),
        ));
        return None;
    }

    if !line.is_empty() {
        tokens.push((Token::Text(line.to_string()), base..base + line.len()));
    }
    Some(open)
}

/// Run the logos lexer over the inline part of a line, merging adjacent text.
fn tokenize_inline(text: &str, base: usize, tokens: &mut Vec<(Token, Range<usize>)>) {
    let mut lexer = Lexeme::lexer(text);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let range = base + span.start..base + span.end;
        let token = match result {
            Ok(Lexeme::Escape) => match slice.chars().nth(1) {
                Some(c) => Token::Escape(c),
                None => Token::Text(slice.to_string()),
            },
            Ok(Lexeme::Stars) => emphasis(EmphasisKind::Star, slice),
            Ok(Lexeme::Underscores) => emphasis(EmphasisKind::Underscore, slice),
            Ok(Lexeme::Tildes) => emphasis(EmphasisKind::Tilde, slice),
            Ok(Lexeme::Backticks) => Token::CodeSpanDelimiter(slice.len()),
            Ok(Lexeme::OpenBracket) => Token::LinkTextOpen,
            Ok(Lexeme::CloseBracket) => Token::LinkTextClose,
            Ok(Lexeme::OpenParen) => Token::LinkUrlOpen,
            Ok(Lexeme::CloseParen) => Token::LinkUrlClose,
            Ok(Lexeme::Backslash) | Ok(Lexeme::Text) | Err(_) => {
                if let Some((Token::Text(previous), previous_range)) = tokens.last_mut() {
                    if previous_range.end == range.start {
                        previous.push_str(slice);
                        previous_range.end = range.end;
                        continue;
                    }
                }
                Token::Text(slice.to_string())
            }
        };
        tokens.push((token, range));
    }
}

fn emphasis(kind: EmphasisKind, slice: &str) -> Token {
    Token::EmphasisMarker {
        kind,
        run: slice.len(),
    }
}

/// Measure leading spaces and tabs from `pos`. Returns (columns, end position).
pub(crate) fn scan_indentation(line: &str, pos: usize) -> (usize, usize) {
    let mut columns = 0;
    let mut end = pos;
    for c in line[pos..].chars() {
        match c {
            ' ' => columns += 1,
            '\t' => columns += TAB_WIDTH,
            _ => break,
        }
        end += 1;
    }
    (columns, end)
}

/// Recognize a list marker followed by whitespace and content.
fn scan_list_marker(rest: &str) -> Option<(Token, usize)> {
    let bytes = rest.as_bytes();
    let first = *bytes.first()?;

    let (ordered, index, delimiter, marker_len) = match first {
        b'-' | b'*' | b'+' => (false, None, first as char, 1),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits > 9 {
                return None;
            }
            let delimiter = *bytes.get(digits)?;
            if delimiter != b'.' && delimiter != b')' {
                return None;
            }
            let index = rest[..digits].parse::<u64>().ok()?;
            (true, Some(index), delimiter as char, digits + 1)
        }
        _ => return None,
    };

    let (padding, ws_end) = scan_indentation(rest, marker_len);
    if padding == 0 || rest[ws_end..].trim().is_empty() {
        return None;
    }
    let width = marker_len + if padding > 4 { 1 } else { padding };

    Some((
        Token::ListMarker {
            ordered,
            index,
            delimiter,
            width,
        },
        ws_end,
    ))
}

/// Recognize a fence opener: three or more backticks or tildes plus an info string.
fn scan_fence_opener(rest: &str) -> Option<(char, usize, Option<String>)> {
    let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let run = rest.chars().take_while(|c| *c == marker).count();
    if run < 3 {
        return None;
    }
    let info = &rest[run..];
    if marker == '`' && info.contains('`') {
        return None;
    }
    let language = info.split_whitespace().next().map(str::to_string);
    Some((marker, run, language))
}

/// Recognize a closing fence for an open fence. Returns the closing run length.
fn scan_fence_closer(rest: &str, marker: char, min_run: usize) -> Option<usize> {
    let run = rest.chars().take_while(|c| *c == marker).count();
    if run >= min_run && rest[run..].trim().is_empty() {
        Some(run)
    } else {
        None
    }
}

/// Recognize an ATX header marker. Returns (level, consumed length).
fn scan_header_marker(rest: &str) -> Option<(u8, usize)> {
    let level = rest.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let after = &rest[level..];
    if !after.is_empty() && !after.starts_with(' ') && !after.starts_with('\t') {
        return None;
    }
    let (_, end) = scan_indentation(rest, level);
    Some((level as u8, end))
}
