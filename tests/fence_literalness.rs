//! Fenced code blocks keep their interior verbatim
//!
//! Lines that look like list items, headers or quotes between an opening and a closing
//! fence must stay in the block's literal text and never produce structure.

use chatmark::ast::{Block, NodeCounts};
use chatmark::{parse, render, Format};
use chatmark::testing::assert_doc;
use proptest::prelude::*;

fn count(source: &str) -> NodeCounts {
    parse(source).node_counts()
}

#[test]
fn test_markers_inside_fence_stay_literal() {
    let doc = parse("``` \n* not a list\n# not a header\n```");
    assert_doc(&doc).block_count(1).block(0, |b| {
        b.assert_fence()
            .language(None)
            .literal("* not a list\n# not a header");
    });
    let counter = count("``` \n* not a list\n# not a header\n```");
    assert_eq!((counter.lists, counter.headers), (0, 0));
}

#[test]
fn test_shorter_or_foreign_closer_does_not_end_fence() {
    let doc = parse("````md\n```\n~~~\n- still code\n````\nafter");
    assert_doc(&doc)
        .block_count(2)
        .block(0, |b| {
            b.assert_fence()
                .language(Some("md"))
                .literal("```\n~~~\n- still code");
        })
        .block(1, |b| {
            b.assert_paragraph().text("after");
        });
}

#[test]
fn test_unterminated_fence_runs_to_end() {
    let doc = parse("```\n> quote\n1. item");
    assert_doc(&doc).block_count(1).block(0, |b| {
        b.assert_fence().literal("> quote\n1. item");
    });
}

#[test]
fn test_fence_in_list_item_renders_verbatim() {
    let source = "- a\n  ```\n  x\n    y\n  ```";
    assert_doc(&parse(source)).block(0, |b| {
        b.assert_list().item(0, |item| {
            item.block(1, |b| {
                b.assert_fence().literal("x\n  y");
            });
        });
    });
    assert_eq!(
        render(source, Format::Rich),
        "• a\n\n  <pre><code>x\n  y</code></pre>"
    );
    assert_eq!(render(source, Format::Strict), "• a\n\n```\nx\n  y\n```");
}

#[test]
fn test_fence_in_ordered_item_renders_verbatim() {
    let source = "1. a\n\n   ```\n   code\n   ```";
    assert_eq!(
        render(source, Format::Rich),
        "1. a\n\n   <pre><code>code</code></pre>"
    );
    assert_eq!(render(source, Format::Strict), "1\\. a\n\n```\ncode\n```");
}

fn marker_line() -> impl Strategy<Value = String> {
    let marker = prop_oneof![
        Just("- "),
        Just("* "),
        Just("+ "),
        Just("1. "),
        Just("2) "),
        Just("> "),
        Just("# "),
        Just("### "),
        Just(""),
    ];
    (" {0,3}", marker, "[a-z*_#>~ -]{0,12}")
        .prop_map(|(indent, marker, rest)| format!("{}{}{}", indent, marker, rest))
}

proptest! {
    #[test]
    fn prop_fence_interior_is_literal(lines in prop::collection::vec(marker_line(), 1..8)) {
        let body = lines.join("\n");
        let source = format!("```\n{}\n```", body);
        let counter = count(&source);
        prop_assert_eq!(counter.fenced_code_blocks, 1);
        prop_assert_eq!(counter.lists + counter.headers + counter.block_quotes, 0);

        let doc = parse(&source);
        match &doc.blocks[..] {
            [Block::FencedCodeBlock { literal, .. }] => prop_assert_eq!(literal, &body),
            other => prop_assert!(false, "unexpected blocks {:?}", other),
        }
    }

    #[test]
    fn prop_fence_in_nested_items_renders_verbatim(
        depth in 1usize..4,
        lines in prop::collection::vec(" {0,4}[a-z][a-z ]{0,8}", 1..5),
    ) {
        let literal = lines.join("\n");
        let mut source = String::new();
        for level in 0..depth {
            source.push_str(&format!("{}- item\n", "  ".repeat(level)));
        }
        let indent = "  ".repeat(depth);
        source.push_str(&format!("{}```\n", indent));
        for line in &lines {
            source.push_str(&format!("{}{}\n", indent, line));
        }
        source.push_str(&format!("{}```", indent));

        let rich = render(&source, Format::Rich);
        let strict = render(&source, Format::Strict);
        let pre = format!("<pre><code>{}</code></pre>", literal);
        let fence = format!("\n```\n{}\n```", literal);
        prop_assert!(rich.contains(&pre), "rich: {:?}", rich);
        prop_assert!(strict.contains(&fence), "strict: {:?}", strict);
    }
}
