//! Parsed document shapes, checked with the fluent assertions

use chatmark::ast::Inline;
use chatmark::parse;
use chatmark::testing::assert_doc;

#[test]
fn test_link_keeps_balanced_parens() {
    let doc = parse("[click](https://example.com/(x))");
    assert_doc(&doc).block_count(1).block(0, |b| {
        b.assert_paragraph().inline_count(1).inline(0, |i| {
            i.is_link("https://example.com/(x)").child(0, |label| {
                label.is_text("click");
            });
        });
    });
}

#[test]
fn test_inline_kinds() {
    let doc = parse("~~gone~~ `a*b` **[x](u)**\\\nnext");
    assert_doc(&doc).block(0, |b| {
        b.assert_paragraph()
            .text("gone a*b x\nnext")
            .inline(0, |i| {
                i.is_strikethrough().child_count(1).text("gone");
            })
            .inline(2, |i| {
                i.is_code("a*b");
            })
            .inline(4, |i| {
                i.is_bold().child(0, |c| {
                    c.is_link("u").text("x");
                });
            })
            .inline(5, |i| {
                i.is_line_break();
            });
    });
}

#[test]
fn test_stray_marker_is_literal_text() {
    let doc = parse("2 * 3");
    assert_doc(&doc).block(0, |b| {
        b.assert_paragraph().inlines(&[Inline::text("2 * 3")]);
    });
}

#[test]
fn test_quote_holding_list() {
    let doc = parse("> 1. one\n> 2. two");
    assert_doc(&doc).block(0, |b| {
        b.assert_quote().block_count(1).block(0, |b| {
            b.assert_list()
                .ordered(true)
                .item_count(2)
                .item(1, |item| {
                    item.text("two").block_count(1);
                });
        });
    });
}
