//! Property-based tests over generated documents
//!
//! - normalized output parses back to the same document
//! - no input makes the pipeline panic
//! - strict output always passes the validator

use chatmark::formats::{Format, RenderOptions, View};
use chatmark::pipeline::Pipeline;
use chatmark::validation::validate;
use chatmark::{parse, render};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn words() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..4).prop_map(|words| words.join(" "))
}

/// A word or a span wrapping a few words, never touching its neighbours.
fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => word(),
        1 => words().prop_map(|w| format!("**{}**", w)),
        1 => words().prop_map(|w| format!("*{}*", w)),
        1 => words().prop_map(|w| format!("~~{}~~", w)),
        1 => words().prop_map(|w| format!("`{}`", w)),
        1 => (words(), word()).prop_map(|(label, path)| format!("[{}](https://x.io/{})", label, path)),
    ]
}

fn line() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..6).prop_map(|segments| segments.join(" "))
}

fn block() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::collection::vec(line(), 1..3).prop_map(|lines| lines.join("\n")),
        1 => (1usize..=6, line()).prop_map(|(level, text)| format!("{} {}", "#".repeat(level), text)),
        2 => prop::collection::vec(line(), 1..4)
            .prop_map(|items| items.iter().map(|i| format!("- {}", i)).collect::<Vec<_>>().join("\n")),
        1 => prop::collection::vec(line(), 1..4).prop_map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(n, i)| format!("{}. {}", n + 1, i))
                .collect::<Vec<_>>()
                .join("\n")
        }),
        1 => line().prop_map(|text| format!("> {}", text)),
        1 => (prop::option::of("[a-z]{1,5}"), prop::collection::vec(words(), 1..3)).prop_map(|(lang, lines)| {
            format!("```{}\n{}\n```", lang.unwrap_or_default(), lines.join("\n"))
        }),
        1 => Just("***".to_string()),
    ]
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(block(), 1..6).prop_map(|blocks| blocks.join("\n\n"))
}

fn markup_soup() -> impl Strategy<Value = String> {
    "[a-z0-9 *_~`\\[\\]()#>+.!|{}=\\\\\n-]{0,80}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_normalized_round_trip(source in document()) {
        let document = parse(&source);
        let normalized = render(&source, Format::Normalized);
        prop_assert_eq!(parse(&normalized), document, "normalized: {:?}", normalized);
    }

    #[test]
    fn prop_normalized_is_stable(source in document()) {
        let once = render(&source, Format::Normalized);
        let twice = render(&once, Format::Normalized);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_never_panics(source in markup_soup()) {
        let pipeline = Pipeline::default();
        let document = pipeline.parse(&source).unwrap();
        for format in Format::ALL {
            format.render(&document, &RenderOptions::default());
        }
        for view in View::ALL {
            pipeline.inspect(&source, view).unwrap();
        }
    }

    #[test]
    fn prop_strict_output_validates(source in markup_soup()) {
        let output = render(&source, Format::Strict);
        prop_assert_eq!(validate(&output), Ok(()), "output: {:?}", output);
    }

    #[test]
    fn prop_arbitrary_text_renders_valid_strict(source in "\\PC{0,120}") {
        let output = render(&source, Format::Strict);
        prop_assert!(validate(&output).is_ok(), "output: {:?}", output);
    }
}
