//! Template and literal parsers.
//!
//! This module provides parsing for argument template strings and for the
//! textual form of structured (list and dict) values. The template parser
//! produces an AST that the resolver expands, or that external tooling can
//! inspect.

pub mod ast;
pub mod error;
mod literal;
mod template;

pub use ast::*;
pub use error::LiteralError;
pub use literal::parse_literal;
pub use template::{parse_template, recognize};
