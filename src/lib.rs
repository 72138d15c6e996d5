//! # chatmark
//!
//! A Markdown-like markup engine for chat messages.
//!
//! Source text goes through three stages:
//!
//!     source ─ lexing ─▶ tokens ─ parsing + inlines ─▶ ast::Document ─ formats ─▶ String
//!
//! - [lexing] turns the source into `(Token, byte range)` pairs.
//! - [parsing] builds the block structure and hands paragraph and header text to [inlines].
//! - [formats] renders a document as rich text, the strict chat dialect or normalized
//!   Markdown.
//!
//! The strict dialect has a [validation] scanner that checks text against the dialect's
//! escaping and nesting rules, and [dialect] holds its reserved characters and escaping
//! helpers.
//!
//! [pipeline] bundles the stages with one [config] and is what the `chatmark` binary uses.
//!
//! ## Testing
//!
//! The [testing] module provides fluent AST assertions used across the test suite.

pub mod ast;
pub mod config;
pub mod dialect;
pub mod formats;
pub mod inlines;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod testing;
pub mod validation;

pub use ast::Document;
pub use formats::Format;
pub use pipeline::{Pipeline, PipelineError};
pub use validation::{validate, ValidationError};

/// Parse `source` with the default options.
pub fn parse(source: &str) -> Document {
    parsing::parse_document(source, &parsing::ParseOptions::default())
}

/// Parse `source` and render it in `format` with the default options.
pub fn render(source: &str, format: Format) -> String {
    format.render(&parse(source), &formats::RenderOptions::default())
}
