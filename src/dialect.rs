//! The strict chat dialect
//!
//! Character rules shared by the strict renderer and the validator. In plain text every
//! reserved character must be preceded by a backslash; inside code and pre blocks only the
//! backslash and the backtick are special, and inside a link url only the backslash and
//! the closing parenthesis.

/// Characters that must be escaped in strict-dialect plain text
pub const RESERVED: [char; 18] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

pub fn is_reserved(c: char) -> bool {
    RESERVED.contains(&c)
}

/// Escape plain text: every reserved character and the backslash.
pub fn escape_text(text: &str) -> String {
    escape_with(text, |c| c == '\\' || is_reserved(c))
}

/// Escape the content of inline code and pre blocks.
pub fn escape_code(text: &str) -> String {
    escape_with(text, |c| c == '\\' || c == '`')
}

/// Escape a link destination.
pub fn escape_link_url(url: &str) -> String {
    escape_with(url, |c| c == '\\' || c == ')')
}

fn escape_with(text: &str, needs_escape: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if needs_escape(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a_b.c!"), "a\\_b\\.c\\!");
        assert_eq!(escape_text("back\\slash"), "back\\\\slash");
        assert_eq!(escape_text("plain words"), "plain words");
    }

    #[test]
    fn test_escape_code_and_url() {
        assert_eq!(escape_code("a_`b`\\"), "a_\\`b\\`\\\\");
        assert_eq!(escape_link_url("https://x.org/(a)"), "https://x.org/(a\\)");
    }
}
