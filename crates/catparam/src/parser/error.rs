//! Parse error types for structured literals.

use thiserror::Error;

/// An error that occurred while parsing a structured literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The input was empty or whitespace only.
    #[error("empty literal")]
    Empty,
}
