//! Treeviz view of a document
//!
//! Treeviz is a one line per node rendering of the AST, meant for quickly scanning the
//! structure the parser built. Nesting is drawn with `├─`/`└─` connectors, and every
//! line is `<connectors> <icon> <label>` with the label truncated to 30 characters.
//!
//!     ⧉ Document (2 blocks)
//!     ├─ ⊤ h1 Title
//!     │ └─ ◦ Title
//!     └─ ☰ 2 items, unordered
//!       ├─ • one
//!       │ └─ ¶ one
//!       ...
//!
//! Icons
//!     Blocks:
//!         Document: ⧉
//!         Header: ⊤
//!         Paragraph: ¶
//!         List: ☰
//!         ListItem: •
//!         BlockQuote: ❝
//!         FencedCodeBlock: 𝒱
//!         ThematicBreak: ―
//!     Inlines:
//!         Text: ◦
//!         Bold: 𝐁
//!         Italic: 𝐼
//!         Strikethrough: ∼
//!         Code: ƒ
//!         Link: ⊕
//!         LineBreak: ↵

use crate::ast::{snapshot_from_document, AstSnapshot, Document};

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    let single_line = s.replace('\n', "↵");
    if single_line.chars().count() > max_chars {
        let mut truncated = single_line.chars().take(max_chars).collect::<String>();
        truncated.push('…');
        truncated
    } else {
        single_line
    }
}

fn icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Header" => "⊤",
        "Paragraph" => "¶",
        "List" => "☰",
        "ListItem" => "•",
        "BlockQuote" => "❝",
        "FencedCodeBlock" => "𝒱",
        "ThematicBreak" => "―",
        "Text" => "◦",
        "Bold" => "𝐁",
        "Italic" => "𝐼",
        "Strikethrough" => "∼",
        "Code" => "ƒ",
        "Link" => "⊕",
        "LineBreak" => "↵",
        _ => "○",
    }
}

fn format_snapshot(snapshot: &AstSnapshot, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon(&snapshot.node_type),
        truncate(&snapshot.label, LABEL_WIDTH)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, &child_prefix, i + 1 == count, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let snapshot = snapshot_from_document(doc);
    let mut output = format!(
        "{} {}\n",
        icon(&snapshot.node_type),
        truncate(&snapshot.label, LABEL_WIDTH)
    );
    let count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, "", i + 1 == count, &mut output);
    }
    output
}
