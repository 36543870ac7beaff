//! Expression entry point and error mapping.

use plugfetch_core::VersionMatch;

use crate::combinators;
use crate::error::ParseError;
use crate::lexer::span;

/// Parses a version match expression.
pub fn parse_match(expression: &str) -> Result<VersionMatch, ParseError> {
    let input = span(expression);

    let (rest, parsed) = match combinators::expression(input) {
        Ok(result) => result,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(error_at(expression, e.input.location_offset()));
        }
        Err(nom::Err::Incomplete(_)) => return Err(ParseError::eof(expression)),
    };

    if !rest.fragment().is_empty() {
        return Err(error_at(expression, rest.location_offset()));
    }

    Ok(parsed)
}

fn error_at(expression: &str, offset: usize) -> ParseError {
    match expression[offset..].chars().next() {
        Some(c) => ParseError::new(format!("Unexpected `{}`", c), expression, offset),
        None => ParseError::eof(expression),
    }
}
