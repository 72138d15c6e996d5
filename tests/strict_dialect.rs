//! Strict dialect rendering
//!
//! Everything the strict renderer emits must pass the validator, and plain text must come
//! out with each reserved character escaped exactly once.

use chatmark::dialect::RESERVED;
use chatmark::validation::validate;
use chatmark::{render, Format};
use rstest::rstest;

fn strict(source: &str) -> String {
    render(source, Format::Strict)
}

#[test]
fn test_bare_url_is_escaped() {
    insta::assert_snapshot!(
        strict("Visit (https://example.com/a_b) now"),
        @r"Visit \(https://example\.com/a\_b\) now"
    );
}

#[test]
fn test_bold_and_italic_are_disambiguated() {
    insta::assert_snapshot!(
        strict("This is **bold** and *italic*."),
        @r"This is *bold* and _italic_\."
    );
}

#[test]
fn test_link_with_balanced_parens() {
    insta::assert_snapshot!(
        strict("[click](https://example.com/(x))"),
        @r"[click](https://example.com/(x\))"
    );
}

#[rstest]
#[case::plain("hello world", "hello world")]
#[case::punctuation("1 + 1 = 2.", r"1 \+ 1 \= 2\.")]
#[case::stray_star("2 * 3", r"2 \* 3")]
#[case::braces("{a|b}", r"\{a\|b\}")]
#[case::backslash(r"a \ b", r"a \\ b")]
#[case::strike("~~gone~~", "~gone~")]
#[case::code("`x.y`", "`x.y`")]
#[case::header("# Title!", r"*Title\!*")]
#[case::quote("> quoted.", r">quoted\.")]
#[case::thematic_break("***", r"\-\-\-")]
fn test_renders(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(strict(source), expected);
}

#[test]
fn test_every_reserved_character_is_escaped_once() {
    let text: String = RESERVED.iter().flat_map(|c| [*c, ' ']).collect();
    let source = format!("x {}", text);
    let output = strict(&source);
    for c in RESERVED {
        assert!(
            output.contains(&format!("\\{}", c)),
            "{:?} not escaped in {:?}",
            c,
            output
        );
        assert!(
            !output.contains(&format!("\\\\{}", c)),
            "{:?} escaped twice in {:?}",
            c,
            output
        );
    }
    assert_eq!(validate(&output), Ok(()));
}

#[rstest]
#[case::lists("- one\n- two.\n\n1. first\n2. second")]
#[case::nested_list("- a\n  - b\n    - c")]
#[case::quote_in_list("- > quoted (1)")]
#[case::fence("```rust\nlet s = `a` + \"\\n\";\n```")]
#[case::mixed_spans("**bold _italic ~~strike~~_** and `code` [l_i.nk](https://e.com/a_(b))")]
#[case::adjacent_italics("*a**b*")]
#[case::line_break("first\\\nsecond")]
fn test_output_validates(#[case] source: &str) {
    let output = strict(source);
    assert_eq!(validate(&output), Ok(()), "invalid output {:?}", output);
}
