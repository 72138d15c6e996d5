//! Inline parser
//!
//!     The text of a leaf block is parsed by an ordered list of matchers. The text starts as
//!     a sequence of character pieces; each matcher scans the pieces left by the previous
//!     ones and replaces every span it recognizes with an opaque slot (a placeholder holding
//!     the finished node). A later matcher never looks inside a slot, so bold and italic
//!     markers, which share characters, cannot corrupt each other, and code span contents
//!     are never re-parsed.
//!
//!     The matchers run in this order:
//!
//!         1. code spans, together with backslash escapes
//!         2. hard line breaks
//!         3. links
//!         4. bold (`**`, `__`)
//!         5. strikethrough (`~~`)
//!         6. italic (`*`, `_`)
//!
//!     Span contents (link labels, emphasis children) are parsed by the matchers that come
//!     after the one that found them. Anything left unmatched at the end is literal text.
//!
//! Nesting
//!
//!     Every span built one level deeper increments the depth. At the configured ceiling
//!     links and emphasis are no longer matched, so deeper markup stays literal text.

use super::flanking::{classify_run, CharClass};
use crate::ast::Inline;
use crate::parsing::ParseOptions;
use std::collections::HashMap;

/// Parse inline nodes from a raw string, starting at nesting depth `depth`.
pub fn parse_inlines(text: &str, depth: usize, options: &ParseOptions) -> Vec<Inline> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut parser = InlineParser::new(options);
    let pieces = text.chars().map(Piece::Char).collect();
    let pieces = parser.run_matchers(pieces, 0, depth);
    parser.finish(pieces)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    /// A character that may still act as markup
    Char(char),
    /// A backslash-escaped character, always literal
    Escaped(char),
    /// Placeholder for an already matched span
    Slot(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Matcher {
    CodeSpans,
    LineBreaks,
    Links,
    Delimited(DelimiterFamily),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Bold,
    Strikethrough,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DelimiterFamily {
    chars: &'static [char],
    width: usize,
    kind: SpanKind,
}

const STRONG: DelimiterFamily = DelimiterFamily {
    chars: &['*', '_'],
    width: 2,
    kind: SpanKind::Bold,
};

const STRIKE: DelimiterFamily = DelimiterFamily {
    chars: &['~'],
    width: 2,
    kind: SpanKind::Strikethrough,
};

const EMPHASIS: DelimiterFamily = DelimiterFamily {
    chars: &['*', '_'],
    width: 1,
    kind: SpanKind::Italic,
};

const MATCHERS: &[Matcher] = &[
    Matcher::CodeSpans,
    Matcher::LineBreaks,
    Matcher::Links,
    Matcher::Delimited(STRONG),
    Matcher::Delimited(STRIKE),
    Matcher::Delimited(EMPHASIS),
];

struct Slot {
    node: Option<Inline>,
    raw: String,
}

/// A maximal run of one delimiter character
#[derive(Debug, Clone, Copy)]
struct Run {
    len: usize,
    family_index: usize,
    can_open: bool,
    can_close: bool,
    /// Unused part of the run
    lo: usize,
    hi: usize,
}

impl Run {
    fn remaining(&self) -> usize {
        self.hi - self.lo
    }
}

#[derive(Debug, Clone, Copy)]
struct Pair {
    open_end: usize,
    close_start: usize,
    close_end: usize,
}

struct InlineParser<'a> {
    slots: Vec<Slot>,
    options: &'a ParseOptions,
}

impl<'a> InlineParser<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        Self {
            slots: Vec::new(),
            options,
        }
    }

    fn run_matchers(&mut self, mut pieces: Vec<Piece>, from: usize, depth: usize) -> Vec<Piece> {
        for (index, matcher) in MATCHERS.iter().enumerate().skip(from) {
            pieces = match matcher {
                Matcher::CodeSpans => self.match_code_spans(pieces),
                Matcher::LineBreaks => self.match_line_breaks(pieces),
                Matcher::Links => self.match_links(pieces, index, depth),
                Matcher::Delimited(family) => self.match_delimited(pieces, family, index, depth),
            };
        }
        pieces
    }

    fn push_slot(&mut self, node: Inline, raw: String) -> Piece {
        self.slots.push(Slot {
            node: Some(node),
            raw,
        });
        Piece::Slot(self.slots.len() - 1)
    }

    fn is_break(&self, piece: &Piece) -> bool {
        match piece {
            Piece::Slot(id) => matches!(self.slots[*id].node, Some(Inline::LineBreak)),
            _ => false,
        }
    }

    fn class_of(&self, piece: Option<&Piece>) -> CharClass {
        match piece {
            None => CharClass::Whitespace,
            Some(Piece::Char(c)) | Some(Piece::Escaped(c)) => CharClass::of(*c),
            Some(slot) if self.is_break(slot) => CharClass::Whitespace,
            Some(Piece::Slot(_)) => CharClass::Other,
        }
    }

    fn raw_of(&self, pieces: &[Piece]) -> String {
        let mut raw = String::new();
        for piece in pieces {
            match piece {
                Piece::Char(c) => raw.push(*c),
                Piece::Escaped(c) => {
                    raw.push('\\');
                    raw.push(*c);
                }
                Piece::Slot(id) => raw.push_str(&self.slots[*id].raw),
            }
        }
        raw
    }

    /// Code spans and backslash escapes, in one left-to-right scan.
    ///
    /// A run of N backticks closes at the next run of exactly N backticks. Backslashes have
    /// no effect inside a code span.
    fn match_code_spans(&mut self, pieces: Vec<Piece>) -> Vec<Piece> {
        let chars: Vec<char> = pieces
            .iter()
            .map(|piece| match piece {
                Piece::Char(c) | Piece::Escaped(c) => *c,
                Piece::Slot(_) => '\u{fffc}',
            })
            .collect();

        let mut runs_by_len: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == '`' {
                let len = run_length(&chars, i, '`');
                runs_by_len.entry(len).or_default().push(i);
                i += len;
            } else {
                i += 1;
            }
        }

        let mut out = Vec::with_capacity(pieces.len());
        let mut i = 0;
        while i < pieces.len() {
            let Piece::Char(c) = pieces[i] else {
                out.push(pieces[i]);
                i += 1;
                continue;
            };

            if c == '\\' {
                if let Some(Piece::Char(next)) = pieces.get(i + 1) {
                    if next.is_ascii_punctuation() {
                        out.push(Piece::Escaped(*next));
                        i += 2;
                        continue;
                    }
                }
            }

            if c == '`' {
                let len = run_length(&chars, i, '`');
                let closer = runs_by_len.get(&len).and_then(|starts| {
                    let idx = starts.partition_point(|&s| s < i + len);
                    starts.get(idx).copied()
                });
                match closer {
                    Some(close) => {
                        let content = normalize_code_content(&chars[i + len..close]);
                        let raw: String = chars[i..close + len].iter().collect();
                        let slot = self.push_slot(Inline::code(content), raw);
                        out.push(slot);
                        i = close + len;
                    }
                    None => {
                        out.extend(std::iter::repeat(Piece::Char('`')).take(len));
                        i += len;
                    }
                }
                continue;
            }

            out.push(Piece::Char(c));
            i += 1;
        }
        out
    }

    /// Hard breaks are two or more spaces, or a backslash, before a line ending. Spaces
    /// before a soft line ending are dropped.
    fn match_line_breaks(&mut self, pieces: Vec<Piece>) -> Vec<Piece> {
        let mut out: Vec<Piece> = Vec::with_capacity(pieces.len());
        for piece in pieces {
            if piece != Piece::Char('\n') {
                out.push(piece);
                continue;
            }
            let spaces = out
                .iter()
                .rev()
                .take_while(|p| **p == Piece::Char(' '))
                .count();
            if spaces >= 2 {
                out.truncate(out.len() - spaces);
                let raw = format!("{}\n", " ".repeat(spaces));
                let slot = self.push_slot(Inline::LineBreak, raw);
                out.push(slot);
            } else if spaces == 0 && out.last() == Some(&Piece::Char('\\')) {
                out.pop();
                let slot = self.push_slot(Inline::LineBreak, "\\\n".to_string());
                out.push(slot);
            } else {
                out.truncate(out.len() - spaces);
                out.push(Piece::Char('\n'));
            }
        }
        out
    }

    /// `[label](url)`. The label is parsed by the later matchers; the url runs to the
    /// matching unescaped `)`, may hold balanced parentheses and may not span lines.
    fn match_links(&mut self, pieces: Vec<Piece>, index: usize, depth: usize) -> Vec<Piece> {
        if depth >= self.options.max_nesting_depth {
            return pieces;
        }

        let brackets = match_pairs(&pieces, '[', ']');
        let parens = match_pairs(&pieces, '(', ')');

        let mut out = Vec::with_capacity(pieces.len());
        let mut i = 0;
        while i < pieces.len() {
            if pieces[i] == Piece::Char('[') {
                if let Some(link) = self.link_at(&pieces, i, &brackets, &parens) {
                    let (close_bracket, close_paren, url) = link;
                    let label = pieces[i + 1..close_bracket].to_vec();
                    let label = self.run_matchers(label, index + 1, depth + 1);
                    let label = self.finish(label);
                    let raw = self.raw_of(&pieces[i..=close_paren]);
                    let slot = self.push_slot(Inline::link(label, url), raw);
                    out.push(slot);
                    i = close_paren + 1;
                    continue;
                }
            }
            out.push(pieces[i]);
            i += 1;
        }
        out
    }

    fn link_at(
        &self,
        pieces: &[Piece],
        open: usize,
        brackets: &[Option<usize>],
        parens: &[Option<usize>],
    ) -> Option<(usize, usize, String)> {
        let close_bracket = brackets[open]?;
        let url_open = close_bracket + 1;
        if pieces.get(url_open) != Some(&Piece::Char('(')) {
            return None;
        }
        let close_paren = parens[url_open]?;

        let mut url = String::new();
        for piece in &pieces[url_open + 1..close_paren] {
            match piece {
                Piece::Char(c) | Piece::Escaped(c) => url.push(*c),
                Piece::Slot(id) => url.push_str(&self.slots[*id].raw),
            }
        }
        if url.contains('\n') {
            return None;
        }
        Some((close_bracket, close_paren, url.trim().to_string()))
    }

    /// One delimiter family: find opener/closer pairs with a delimiter stack, then rebuild
    /// the pieces with every pair replaced by a slot.
    fn match_delimited(
        &mut self,
        pieces: Vec<Piece>,
        family: &DelimiterFamily,
        index: usize,
        depth: usize,
    ) -> Vec<Piece> {
        if depth >= self.options.max_nesting_depth {
            return pieces;
        }
        let mut runs = self.collect_runs(&pieces, family);
        if runs.is_empty() {
            return pieces;
        }
        let pairs = pair_runs(&mut runs, family);
        if pairs.is_empty() {
            return pieces;
        }
        self.build_range(&pieces, &pairs, 0, pieces.len(), family, index, depth)
    }

    fn collect_runs(&self, pieces: &[Piece], family: &DelimiterFamily) -> Vec<Run> {
        let mut runs = Vec::new();
        let mut i = 0;
        while i < pieces.len() {
            let Piece::Char(c) = pieces[i] else {
                i += 1;
                continue;
            };
            let Some(family_index) = family.chars.iter().position(|m| *m == c) else {
                i += 1;
                continue;
            };
            let mut end = i;
            while pieces.get(end) == Some(&Piece::Char(c)) {
                end += 1;
            }
            let prev = self.class_of(if i == 0 { None } else { pieces.get(i - 1) });
            let next = self.class_of(pieces.get(end));
            let flanking = classify_run(c, prev, next);
            runs.push(Run {
                len: end - i,
                family_index,
                can_open: flanking.can_open,
                can_close: flanking.can_close,
                lo: i,
                hi: end,
            });
            i = end;
        }
        runs
    }

    #[allow(clippy::too_many_arguments)]
    fn build_range(
        &mut self,
        pieces: &[Piece],
        pairs: &HashMap<usize, Pair>,
        lo: usize,
        hi: usize,
        family: &DelimiterFamily,
        index: usize,
        depth: usize,
    ) -> Vec<Piece> {
        let mut out = Vec::with_capacity(hi - lo);
        let mut i = lo;
        while i < hi {
            if let Some(pair) = pairs.get(&i) {
                if pair.close_end <= hi && depth < self.options.max_nesting_depth {
                    let inner = self.build_range(
                        pieces,
                        pairs,
                        pair.open_end,
                        pair.close_start,
                        family,
                        index,
                        depth + 1,
                    );
                    let inner = self.run_matchers(inner, index + 1, depth + 1);
                    let children = self.finish(inner);
                    let node = match family.kind {
                        SpanKind::Bold => Inline::Bold { children },
                        SpanKind::Strikethrough => Inline::Strikethrough { children },
                        SpanKind::Italic => Inline::Italic { children },
                    };
                    let raw = self.raw_of(&pieces[i..pair.close_end]);
                    let slot = self.push_slot(node, raw);
                    out.push(slot);
                    i = pair.close_end;
                    continue;
                }
            }
            out.push(pieces[i]);
            i += 1;
        }
        out
    }

    /// Resolve pieces into inline nodes, merging adjacent text.
    fn finish(&mut self, pieces: Vec<Piece>) -> Vec<Inline> {
        let mut nodes = Vec::new();
        let mut buffer = String::new();
        for piece in pieces {
            match piece {
                Piece::Char(c) | Piece::Escaped(c) => buffer.push(c),
                Piece::Slot(id) => {
                    if let Some(node) = self.slots[id].node.take() {
                        flush_buffer(&mut buffer, &mut nodes);
                        nodes.push(node);
                    }
                }
            }
        }
        flush_buffer(&mut buffer, &mut nodes);
        nodes
    }
}

fn flush_buffer(buffer: &mut String, nodes: &mut Vec<Inline>) {
    if !buffer.is_empty() {
        nodes.push(Inline::text(std::mem::take(buffer)));
    }
}

fn run_length(chars: &[char], start: usize, c: char) -> usize {
    chars[start..].iter().take_while(|x| **x == c).count()
}

/// Line endings become spaces; one space is stripped from each side when both sides have
/// one and the content is not all spaces.
fn normalize_code_content(chars: &[char]) -> String {
    let content: String = chars
        .iter()
        .map(|c| if *c == '\n' { ' ' } else { *c })
        .collect();
    if content.len() >= 2
        && content.starts_with(' ')
        && content.ends_with(' ')
        && !content.chars().all(|c| c == ' ')
    {
        content[1..content.len() - 1].to_string()
    } else {
        content
    }
}

/// Match open/close characters by nesting depth, ignoring escaped ones.
fn match_pairs(pieces: &[Piece], open: char, close: char) -> Vec<Option<usize>> {
    let mut matches = vec![None; pieces.len()];
    let mut stack = Vec::new();
    for (i, piece) in pieces.iter().enumerate() {
        match piece {
            Piece::Char(c) if *c == open => stack.push(i),
            Piece::Char(c) if *c == close => {
                if let Some(o) = stack.pop() {
                    matches[o] = Some(i);
                }
            }
            _ => {}
        }
    }
    matches
}

/// Pair delimiter runs with a stack of potential openers.
///
/// Each match takes `family.width` characters from both runs. Normally the opener gives
/// up its last characters and the closer its first, so surplus characters stay outside
/// the span. When a shorter run of the same character sits between them (as in
/// `***a* b**`) the surplus belongs to that inner span instead and is left inside.
fn pair_runs(runs: &mut [Run], family: &DelimiterFamily) -> HashMap<usize, Pair> {
    let n = family.width;
    let families = family.chars.len();

    // Prefix counts of short runs per character, for the surplus check
    let mut short_openers = vec![vec![0usize; runs.len() + 1]; families];
    let mut short_closers = vec![vec![0usize; runs.len() + 1]; families];
    for (k, run) in runs.iter().enumerate() {
        for f in 0..families {
            let short = run.family_index == f && run.len < n;
            short_openers[f][k + 1] = short_openers[f][k] + usize::from(short && run.can_open);
            short_closers[f][k + 1] = short_closers[f][k] + usize::from(short && run.can_close);
        }
    }

    let mut stacks: Vec<Vec<usize>> = vec![Vec::new(); families];
    let mut pairs = HashMap::new();

    for r in 0..runs.len() {
        let f = runs[r].family_index;
        if runs[r].can_close {
            while runs[r].remaining() >= n {
                let Some(&o) = stacks[f].last() else {
                    break;
                };

                let surplus_inside_opener =
                    runs[o].len > n && short_closers[f][r] > short_closers[f][o + 1];
                let surplus_inside_closer =
                    runs[r].len > n && short_openers[f][r] > short_openers[f][o + 1];

                let open_range = if surplus_inside_opener {
                    let range = runs[o].lo..runs[o].lo + n;
                    runs[o].hi = runs[o].lo;
                    range
                } else {
                    runs[o].hi -= n;
                    runs[o].hi..runs[o].hi + n
                };
                let close_range = if surplus_inside_closer {
                    let range = runs[r].hi - n..runs[r].hi;
                    runs[r].lo = runs[r].hi;
                    range
                } else {
                    runs[r].lo += n;
                    runs[r].lo - n..runs[r].lo
                };

                pairs.insert(
                    open_range.start,
                    Pair {
                        open_end: open_range.end,
                        close_start: close_range.start,
                        close_end: close_range.end,
                    },
                );

                // Openers between the pair can no longer match without crossing it
                for (g, stack) in stacks.iter_mut().enumerate() {
                    if g != f {
                        while stack.last().is_some_and(|&top| top > o) {
                            stack.pop();
                        }
                    }
                }
                if runs[o].remaining() < n {
                    stacks[f].pop();
                }
            }
        }
        if runs[r].can_open && runs[r].remaining() >= n {
            stacks[f].push(r);
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Inline> {
        parse_inlines(text, 0, &ParseOptions::default())
    }

    fn text(s: &str) -> Inline {
        Inline::text(s)
    }

    fn bold(children: Vec<Inline>) -> Inline {
        Inline::Bold { children }
    }

    fn italic(children: Vec<Inline>) -> Inline {
        Inline::Italic { children }
    }

    fn strike(children: Vec<Inline>) -> Inline {
        Inline::Strikethrough { children }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse("hello world"), vec![text("hello world")]);
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_bold_and_italic_are_disambiguated() {
        assert_eq!(
            parse("This is **bold** and *italic*."),
            vec![
                text("This is "),
                bold(vec![text("bold")]),
                text(" and "),
                italic(vec![text("italic")]),
                text("."),
            ]
        );
    }

    #[test]
    fn test_underscore_variants() {
        assert_eq!(
            parse("__b__ _i_"),
            vec![bold(vec![text("b")]), text(" "), italic(vec![text("i")])]
        );
        // intraword underscores stay literal
        assert_eq!(parse("snake_case_name"), vec![text("snake_case_name")]);
    }

    #[test]
    fn test_intraword_star_emphasis() {
        assert_eq!(
            parse("un*frigging*believable"),
            vec![
                text("un"),
                italic(vec![text("frigging")]),
                text("believable")
            ]
        );
    }

    #[test]
    fn test_strikethrough_needs_two_tildes() {
        assert_eq!(parse("~~gone~~"), vec![strike(vec![text("gone")])]);
        assert_eq!(parse("~kept~"), vec![text("~kept~")]);
    }

    #[test]
    fn test_unmatched_markers_are_literal() {
        assert_eq!(parse("*"), vec![text("*")]);
        assert_eq!(parse("**a"), vec![text("**a")]);
        assert_eq!(parse("2 * 3 * 4"), vec![text("2 * 3 * 4")]);
        assert_eq!(parse("[a](b"), vec![text("[a](b")]);
    }

    #[test]
    fn test_nested_emphasis() {
        assert_eq!(
            parse("**a *b* c**"),
            vec![bold(vec![text("a "), italic(vec![text("b")]), text(" c")])]
        );
        assert_eq!(parse("***a***"), vec![italic(vec![bold(vec![text("a")])])]);
        assert_eq!(
            parse("**a *b***"),
            vec![bold(vec![text("a "), italic(vec![text("b")])])]
        );
        assert_eq!(
            parse("***a* b**"),
            vec![bold(vec![italic(vec![text("a")]), text(" b")])]
        );
    }

    #[test]
    fn test_adjacent_spans() {
        assert_eq!(
            parse("**a***b*"),
            vec![bold(vec![text("a")]), italic(vec![text("b")])]
        );
        assert_eq!(
            parse("*a***b**"),
            vec![italic(vec![text("a")]), bold(vec![text("b")])]
        );
        assert_eq!(
            parse("*a**b*"),
            vec![italic(vec![text("a")]), italic(vec![text("b")])]
        );
    }

    #[test]
    fn test_code_span_shields_content() {
        assert_eq!(
            parse("`**not bold**` and **bold**"),
            vec![
                Inline::code("**not bold**"),
                text(" and "),
                bold(vec![text("bold")]),
            ]
        );
    }

    #[test]
    fn test_code_span_rules() {
        assert_eq!(parse("`` a`b ``"), vec![Inline::code("a`b")]);
        assert_eq!(parse("` `"), vec![Inline::code(" ")]);
        assert_eq!(parse(r"`a\`"), vec![Inline::code(r"a\")]);
        assert_eq!(parse("`a\nb`"), vec![Inline::code("a b")]);
        assert_eq!(parse("``a`"), vec![text("``a`")]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(parse(r"\*not italic\*"), vec![text("*not italic*")]);
        assert_eq!(parse(r"\`x`"), vec![text("`x`")]);
        assert_eq!(parse(r"a\b"), vec![text(r"a\b")]);
    }

    #[test]
    fn test_link_with_balanced_parens() {
        assert_eq!(
            parse("[click](https://example.com/(x))"),
            vec![Inline::link(vec![text("click")], "https://example.com/(x)")]
        );
    }

    #[test]
    fn test_link_label_is_parsed() {
        assert_eq!(
            parse("see [**docs**](http://a.b/c_d) now"),
            vec![
                text("see "),
                Inline::link(vec![bold(vec![text("docs")])], "http://a.b/c_d"),
                text(" now"),
            ]
        );
    }

    #[test]
    fn test_link_url_escapes() {
        assert_eq!(
            parse(r"[a](x\)y)"),
            vec![Inline::link(vec![text("a")], "x)y")]
        );
    }

    #[test]
    fn test_parens_without_link_are_text() {
        assert_eq!(
            parse("Visit (https://example.com/a_b) now"),
            vec![text("Visit (https://example.com/a_b) now")]
        );
    }

    #[test]
    fn test_inner_link_wins_over_unclosed_outer() {
        assert_eq!(
            parse("[a [b](c)"),
            vec![text("[a "), Inline::link(vec![text("b")], "c")]
        );
    }

    #[test]
    fn test_hard_and_soft_breaks() {
        assert_eq!(
            parse("a  \nb\\\nc \nd"),
            vec![
                text("a"),
                Inline::LineBreak,
                text("b"),
                Inline::LineBreak,
                text("c\nd"),
            ]
        );
    }

    #[test]
    fn test_depth_ceiling_leaves_markup_literal() {
        let options = ParseOptions {
            max_nesting_depth: 2,
        };
        assert_eq!(
            parse_inlines("**a *b* c**", 0, &options),
            vec![bold(vec![text("a "), italic(vec![text("b")]), text(" c")])]
        );
        assert_eq!(
            parse_inlines("**a *b* c**", 1, &options),
            vec![bold(vec![text("a *b* c")])]
        );
        assert_eq!(
            parse_inlines("**a**", 2, &options),
            vec![text("**a**")]
        );
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let source = format!("{}x{}", "[".repeat(5000), "](u)".repeat(5000));
        let nodes = parse(&source);
        assert!(!nodes.is_empty());
        let stars = format!("{}x{}", "*a ".repeat(5000), " a*".repeat(5000));
        assert!(!parse(&stars).is_empty());
    }
}
