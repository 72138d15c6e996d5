//! Processing pipeline
//!
//!     The pipeline bundles the three stages with one configuration:
//!
//!         source ─ tokenize ─▶ tokens ─ parse blocks + inlines ─▶ Document ─ render ─▶ String
//!
//!     Each call is independent; a pipeline holds only its options and can be shared
//!     between threads. The only failure is a resource one: inputs over the configured
//!     size ceiling are refused before any work is done, and that includes text handed to
//!     the strict-dialect validator.

use crate::ast::Document;
use crate::config::ChatmarkConfig;
use crate::formats::{Format, FormatError, RenderOptions, View};
use crate::lexing::{tokenize, Token};
use crate::parsing::{parse_blocks, ParseOptions};
use crate::validation::{validate, ValidationError};
use std::ops::Range;
use thiserror::Error;
use tracing::{debug, warn};

/// Default ceiling on input size, in bytes
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error(transparent)]
    Format(#[from] FormatError),
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    max_input_bytes: usize,
    default_format: Format,
}

impl Pipeline {
    pub fn new(config: &ChatmarkConfig) -> Self {
        Self {
            parse_options: config.parse_options(),
            render_options: config.render_options(),
            max_input_bytes: config.limits.max_input_bytes,
            default_format: config.render.default_format,
        }
    }

    pub fn default_format(&self) -> Format {
        self.default_format
    }

    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    fn check_size(&self, source: &str) -> Result<(), PipelineError> {
        if source.len() > self.max_input_bytes {
            warn!(
                size = source.len(),
                limit = self.max_input_bytes,
                "input refused"
            );
            return Err(PipelineError::InputTooLarge {
                size: source.len(),
                limit: self.max_input_bytes,
            });
        }
        Ok(())
    }

    pub fn tokenize(&self, source: &str) -> Result<Vec<(Token, Range<usize>)>, PipelineError> {
        self.check_size(source)?;
        let tokens = tokenize(source);
        debug!(bytes = source.len(), tokens = tokens.len(), "tokenized");
        Ok(tokens)
    }

    pub fn parse(&self, source: &str) -> Result<Document, PipelineError> {
        let tokens = self.tokenize(source)?;
        Ok(parse_blocks(&tokens, source, &self.parse_options))
    }

    pub fn render(&self, document: &Document, format: Format) -> String {
        let output = format.render(document, &self.render_options);
        debug!(format = %format, bytes = output.len(), "rendered");
        output
    }

    /// Parse and render in one step.
    pub fn execute(&self, source: &str, format: Format) -> Result<String, PipelineError> {
        let document = self.parse(source)?;
        Ok(self.render(&document, format))
    }

    /// Check `text` against the strict dialect; an empty list means it is valid.
    pub fn validate(&self, text: &str) -> Result<Vec<ValidationError>, PipelineError> {
        self.check_size(text)?;
        Ok(validate(text).err().unwrap_or_default())
    }

    /// Produce one of the inspection views of `source`.
    pub fn inspect(&self, source: &str, view: View) -> Result<String, PipelineError> {
        let tokens = self.tokenize(source)?;
        let document = parse_blocks(&tokens, source, &self.parse_options);
        Ok(view.render(&tokens, &document)?)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            default_format: Format::Strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Loader;

    #[test]
    fn test_execute_renders_each_format() {
        let pipeline = Pipeline::default();
        let source = "This is **bold** and *italic*.";
        assert_eq!(
            pipeline.execute(source, Format::Strict).unwrap(),
            "This is *bold* and _italic_\\."
        );
        assert_eq!(
            pipeline.execute(source, Format::Rich).unwrap(),
            "This is <b>bold</b> and <i>italic</i>."
        );
        assert_eq!(
            pipeline.execute(source, Format::Normalized).unwrap(),
            source
        );
    }

    #[test]
    fn test_input_size_ceiling() {
        let config = Loader::new()
            .set_override("limits.max_input_bytes", 4_i64)
            .unwrap()
            .build()
            .unwrap();
        let pipeline = Pipeline::new(&config);
        assert!(pipeline.parse("abcd").is_ok());
        assert_eq!(
            pipeline.parse("abcde"),
            Err(PipelineError::InputTooLarge { size: 5, limit: 4 })
        );
    }

    #[test]
    fn test_validate_respects_size_ceiling() {
        let config = Loader::new()
            .set_override("limits.max_input_bytes", 4_i64)
            .unwrap()
            .build()
            .unwrap();
        let pipeline = Pipeline::new(&config);
        assert_eq!(pipeline.validate("a\\.b"), Ok(vec![]));
        assert_eq!(pipeline.validate("a.b").unwrap().len(), 1);
        assert_eq!(
            pipeline.validate("a.b.c"),
            Err(PipelineError::InputTooLarge { size: 5, limit: 4 })
        );
    }

    #[test]
    fn test_default_matches_embedded_config() {
        let config = crate::config::load_defaults().unwrap();
        let from_config = Pipeline::new(&config);
        let default = Pipeline::default();
        assert_eq!(from_config.default_format(), default.default_format());
        assert_eq!(from_config.parse_options(), default.parse_options());
    }

    #[test]
    fn test_inspect_views() {
        let pipeline = Pipeline::default();
        let tree = pipeline.inspect("# Hi", View::Treeviz).unwrap();
        assert!(tree.starts_with("⧉ Document (1 blocks)"));
        let tokens = pipeline.inspect("# Hi", View::Tokens).unwrap();
        assert!(tokens.contains("HeaderMarker(1)"));
    }
}
