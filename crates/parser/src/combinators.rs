//! Nom parser combinators for version match expressions.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0, multispace1, one_of},
    combinator::{map, map_res, opt, recognize, value},
    multi::{many_m_n, separated_list1},
    sequence::{delimited, preceded},
};
use plugfetch_core::{Comparator, Op, PartialVersion, VersionMatch};
use semver::Version;

use crate::lexer::Span;

// ============================================================================
// Version components
// ============================================================================

/// Parses a numeric component.
fn number(input: Span) -> IResult<Span, u64> {
    map_res(digit1, |s: Span| s.fragment().parse::<u64>()).parse(input)
}

/// Parses a wildcard component: `x`, `X` or `*`.
fn wildcard(input: Span) -> IResult<Span, ()> {
    value((), one_of("xX*")).parse(input)
}

/// Parses a component that is either a number or a wildcard.
fn component(input: Span) -> IResult<Span, Option<u64>> {
    alt((value(None, wildcard), map(number, Some))).parse(input)
}

/// Parses prerelease/build identifiers: [0-9A-Za-z.-]+
fn identifiers(input: Span) -> IResult<Span, Span> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '.' || c == '-').parse(input)
}

/// Parses a complete version: 1.2.3, 1.2.3-beta.1, 1.2.3+build.5
pub fn full_version(input: Span) -> IResult<Span, Version> {
    map_res(
        recognize((
            digit1,
            char('.'),
            digit1,
            char('.'),
            digit1,
            opt(preceded(char('-'), identifiers)),
            opt(preceded(char('+'), identifiers)),
        )),
        |s: Span| Version::parse(s.fragment()),
    )
    .parse(input)
}

/// Parses a version with open trailing components: 1, 1.x, 1.2, 1.2.x
fn open_version(input: Span) -> IResult<Span, PartialVersion> {
    let (input, major) = number(input)?;
    let (input, minor) = opt(preceded(char('.'), component)).parse(input)?;
    let (input, _) = opt(preceded(char('.'), wildcard)).parse(input)?;

    let version = match minor {
        Some(Some(minor)) => PartialVersion::Minor(major, minor),
        _ => PartialVersion::Major(major),
    };

    Ok((input, version))
}

/// Parses a fully open version: x, x.x, *.*.*
fn any_version(input: Span) -> IResult<Span, ()> {
    value((), (wildcard, many_m_n(0, 2, preceded(char('.'), wildcard)))).parse(input)
}

/// Parses any version operand, with an optional `v` prefix.
pub fn partial_version(input: Span) -> IResult<Span, PartialVersion> {
    let (input, _) = opt(one_of("vV")).parse(input)?;

    alt((
        value(PartialVersion::Any, any_version),
        map(full_version, PartialVersion::Full),
        open_version,
    ))
    .parse(input)
}

// ============================================================================
// Operators and comparators
// ============================================================================

/// Parses a comparison operator. Longer operators are tried first.
pub fn operator(input: Span) -> IResult<Span, Op> {
    alt((
        value(Op::Ge, tag(">=")),
        value(Op::Le, tag("<=")),
        value(Op::Ne, tag("!=")),
        value(Op::Eq, tag("==")),
        value(Op::Gt, tag(">")),
        value(Op::Lt, tag("<")),
        value(Op::Ne, tag("!")),
        value(Op::Eq, tag("=")),
    ))
    .parse(input)
}

/// Parses a comparator: [op] version. A missing operator means equality.
pub fn comparator(input: Span) -> IResult<Span, Comparator> {
    let (input, op) = opt(operator).parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, version) = partial_version(input)?;

    Ok((input, Comparator::new(op.unwrap_or(Op::Eq), version)))
}

/// Separator between comparators of one alternative: whitespace or a comma.
fn and_separator(input: Span) -> IResult<Span, ()> {
    alt((
        value((), (multispace0, char(','), multispace0)),
        value((), multispace1),
    ))
    .parse(input)
}

/// Parses comparators that must all hold.
fn conjunction(input: Span) -> IResult<Span, Vec<Comparator>> {
    separated_list1(and_separator, comparator).parse(input)
}

/// Parses a full expression: alternatives joined by `||`.
pub fn expression(input: Span) -> IResult<Span, VersionMatch> {
    map(
        delimited(
            multispace0,
            separated_list1((multispace0, tag("||"), multispace0), conjunction),
            multispace0,
        ),
        VersionMatch::new,
    )
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::span;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_full_version() {
        let (rest, version) = full_version(span("1.2.3-beta.1+build.9")).unwrap();
        assert!(rest.fragment().is_empty());
        assert_eq!(version, v("1.2.3-beta.1+build.9"));
    }

    #[test]
    fn test_partial_versions() {
        let cases = [
            ("x", PartialVersion::Any),
            ("*", PartialVersion::Any),
            ("x.x.x", PartialVersion::Any),
            ("*.*", PartialVersion::Any),
            ("X.*", PartialVersion::Any),
            ("1", PartialVersion::Major(1)),
            ("1.x", PartialVersion::Major(1)),
            ("1.x.x", PartialVersion::Major(1)),
            ("0.8", PartialVersion::Minor(0, 8)),
            ("0.8.x", PartialVersion::Minor(0, 8)),
            ("v0.8.X", PartialVersion::Minor(0, 8)),
            ("1.2.3", PartialVersion::Full(v("1.2.3"))),
        ];

        for (input, expected) in cases {
            let (rest, parsed) = partial_version(span(input)).unwrap();
            assert!(rest.fragment().is_empty(), "leftover for {}", input);
            assert_eq!(parsed, expected, "input {}", input);
        }
    }

    #[test]
    fn test_wildcard_stops_after_three_components() {
        let (rest, parsed) = partial_version(span("x.x.x.x")).unwrap();
        assert_eq!(parsed, PartialVersion::Any);
        assert_eq!(*rest.fragment(), ".x");
    }

    #[test]
    fn test_operators() {
        assert_eq!(operator(span(">=")).unwrap().1, Op::Ge);
        assert_eq!(operator(span("<=")).unwrap().1, Op::Le);
        assert_eq!(operator(span(">")).unwrap().1, Op::Gt);
        assert_eq!(operator(span("!=")).unwrap().1, Op::Ne);
        assert_eq!(operator(span("!")).unwrap().1, Op::Ne);
        assert_eq!(operator(span("==")).unwrap().1, Op::Eq);
        assert!(operator(span("~")).is_err());
    }

    #[test]
    fn test_comparator_with_space_after_operator() {
        let (_, c) = comparator(span(">= 1.0.0")).unwrap();
        assert_eq!(c, Comparator::new(Op::Ge, PartialVersion::Full(v("1.0.0"))));
    }

    #[test]
    fn test_expression_alternatives() {
        let (rest, expr) = expression(span(">=1.0.0 <2.0.0 || >=3.0.0 !3.0.1-beta.1")).unwrap();
        assert!(rest.fragment().is_empty());
        assert_eq!(expr.alternatives.len(), 2);
        assert_eq!(expr.alternatives[0].len(), 2);
        assert_eq!(
            expr.alternatives[1][1],
            Comparator::new(Op::Ne, PartialVersion::Full(v("3.0.1-beta.1")))
        );
    }

    #[test]
    fn test_expression_comma_separator() {
        let (rest, expr) = expression(span(">=1.0.0, <2.0.0")).unwrap();
        assert!(rest.fragment().is_empty());
        assert_eq!(expr.alternatives, vec![vec![
            Comparator::new(Op::Ge, PartialVersion::Full(v("1.0.0"))),
            Comparator::new(Op::Lt, PartialVersion::Full(v("2.0.0"))),
        ]]);
    }

    #[test]
    fn test_expression_stops_at_garbage() {
        let (rest, _) = expression(span("1.0.0 ~2")).unwrap();
        assert_eq!(*rest.fragment(), "~2");
        assert_eq!(rest.location_offset(), 6);
    }
}
