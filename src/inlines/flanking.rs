//! Delimiter-run flanking rules
//!
//! A run of emphasis characters may open a span when it is left-flanking and close one
//! when it is right-flanking, following the CommonMark definitions:
//!
//!     left-flanking:  not followed by whitespace, and either not followed by punctuation
//!                     or preceded by whitespace or punctuation
//!     right-flanking: not preceded by whitespace, and either not preceded by punctuation
//!                     or followed by whitespace or punctuation
//!
//! `_` runs are stricter and cannot open or close inside a word. The start and end of the
//! scanned text count as whitespace.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    Punctuation,
    Other,
}

impl CharClass {
    pub fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Whitespace
        } else if c.is_ascii_punctuation() || (!c.is_ascii() && !c.is_alphanumeric()) {
            CharClass::Punctuation
        } else {
            CharClass::Other
        }
    }
}

/// Opening/closing capability of one delimiter run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flanking {
    pub can_open: bool,
    pub can_close: bool,
}

pub fn classify_run(marker: char, prev: CharClass, next: CharClass) -> Flanking {
    let left = next != CharClass::Whitespace
        && (next != CharClass::Punctuation || prev != CharClass::Other);
    let right = prev != CharClass::Whitespace
        && (prev != CharClass::Punctuation || next != CharClass::Other);

    if marker == '_' {
        Flanking {
            can_open: left && (!right || prev == CharClass::Punctuation),
            can_close: right && (!left || next == CharClass::Punctuation),
        }
    } else {
        Flanking {
            can_open: left,
            can_close: right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CharClass::*;
    use super::*;

    #[test]
    fn test_star_between_spaces_is_inert() {
        let f = classify_run('*', Whitespace, Whitespace);
        assert!(!f.can_open && !f.can_close);
    }

    #[test]
    fn test_star_intraword_opens_and_closes() {
        let f = classify_run('*', Other, Other);
        assert!(f.can_open && f.can_close);
    }

    #[test]
    fn test_underscore_intraword_is_inert() {
        let f = classify_run('_', Other, Other);
        assert!(!f.can_open && !f.can_close);
    }

    #[test]
    fn test_punctuation_neighbours() {
        // "a**.b": left side is a word, right side punctuation -> closes only
        let f = classify_run('*', Other, Punctuation);
        assert!(!f.can_open && f.can_close);
        // " **(": opens only
        let f = classify_run('*', Whitespace, Punctuation);
        assert!(f.can_open && !f.can_close);
        // "_" after punctuation and before a word may open
        let f = classify_run('_', Punctuation, Other);
        assert!(f.can_open);
    }

    #[test]
    fn test_char_classes() {
        assert_eq!(CharClass::of(' '), Whitespace);
        assert_eq!(CharClass::of('\n'), Whitespace);
        assert_eq!(CharClass::of('.'), Punctuation);
        assert_eq!(CharClass::of('—'), Punctuation);
        assert_eq!(CharClass::of('é'), Other);
        assert_eq!(CharClass::of('7'), Other);
    }
}
