//! Plugfetch Parser - version match expression parser using nom combinators.
//!
//! Accepts exact versions (`1.2.3`), ranges (`>=1.0.0 <2.0.0 || >=3.0.0`),
//! exclusions (`!3.0.1-beta.1`) and wildcards (`0.8.x`, `1.*`, `x`).

mod combinators;
mod error;
mod lexer;
mod parser;

pub use error::ParseError;
pub use parser::parse_match;

use plugfetch_core::{Result, VersionMatch};

/// Parses a match expression, mapping failures into the core error type.
pub fn parse_str(expression: &str) -> Result<VersionMatch> {
    parse_match(expression).map_err(Into::into)
}
