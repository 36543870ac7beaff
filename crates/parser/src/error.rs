//! Parser error types.

use miette::{Diagnostic, SourceSpan};
use plugfetch_core::FetchError;
use thiserror::Error;

/// Error type for match expression parsing failures.
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid version match expression: {message}")]
#[diagnostic(
    code(plugfetch::parser::error),
    help("use an exact version (1.2.3), a range (>=1.0.0 <2.0.0 || >=3.0.0) or a wildcard (0.8.x)")
)]
pub struct ParseError {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: Option<SourceSpan>,

    pub offset: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, src: &str, offset: usize) -> Self {
        let end = (offset + 1).min(src.len()).max(offset);
        Self {
            message: message.into(),
            src: src.to_string(),
            span: Some(SourceSpan::from(offset..end)),
            offset,
        }
    }

    pub fn eof(src: &str) -> Self {
        Self {
            message: "Unexpected end of expression".to_string(),
            src: src.to_string(),
            span: Some(SourceSpan::from(src.len().saturating_sub(1)..src.len())),
            offset: src.len(),
        }
    }
}

impl From<ParseError> for FetchError {
    fn from(err: ParseError) -> Self {
        FetchError::InvalidMatchExpression {
            expression: err.src,
            message: err.message,
            offset: err.offset,
        }
    }
}
