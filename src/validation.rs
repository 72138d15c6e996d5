//! Strict-dialect validation
//!
//!     The validator checks whether a string already conforms to the strict chat dialect,
//!     independently of the parser and the AST. It is usually run on strict renderer output
//!     before it is sent, but accepts any text.
//!
//!     It reports three kinds of problems, each with its position: reserved characters
//!     that are not escaped, spans that are never closed, and spans closed out of order.
//!     A `>` is only allowed as the first non-whitespace character of a line, where it
//!     starts a quote. Validation never panics.

pub mod diagnostics;
pub mod scanner;

pub use diagnostics::{Marker, Position, ValidationError};

use scanner::Scanner;
use tracing::debug;

pub fn validate(text: &str) -> Result<(), Vec<ValidationError>> {
    let errors = Scanner::new(text).run();
    debug!(bytes = text.len(), errors = errors.len(), "validated");
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn is_valid(text: &str) -> bool {
    validate(text).is_ok()
}
