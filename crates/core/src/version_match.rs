//! Version match expressions: exact versions, ranges and wildcards.

use std::cmp::Ordering;
use std::fmt;

use semver::Version;

/// A parsed match expression.
///
/// The expression holds alternatives joined by `||`; each alternative is a
/// set of comparators that must all hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMatch {
    pub alternatives: Vec<Vec<Comparator>>,
}

/// A single comparison against a (possibly partial) version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    pub op: Op,
    pub version: PartialVersion,
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

/// A version that may leave trailing components open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialVersion {
    /// `x` or `*`.
    Any,

    /// `1`, `1.x`.
    Major(u64),

    /// `1.2`, `1.2.x`.
    Minor(u64, u64),

    /// `1.2.3`, `1.2.3-beta.1`.
    Full(Version),
}

impl VersionMatch {
    /// Creates an expression from its alternatives.
    pub fn new(alternatives: Vec<Vec<Comparator>>) -> Self {
        Self { alternatives }
    }

    /// Returns true if any alternative holds for `version`.
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives
            .iter()
            .any(|all| all.iter().all(|c| c.matches(version)))
    }
}

impl Comparator {
    pub fn new(op: Op, version: PartialVersion) -> Self {
        Self { op, version }
    }

    /// Returns true if `version` satisfies this comparator.
    pub fn matches(&self, version: &Version) -> bool {
        self.op.accepts(self.version.compare(version))
    }
}

impl Op {
    /// Whether an ordering of `candidate` relative to the bound satisfies the operator.
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Ge => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Le => ordering != Ordering::Greater,
        }
    }
}

impl PartialVersion {
    /// Orders `candidate` against this bound, looking only at the components it fixes.
    ///
    /// Full versions compare by semver precedence, so build metadata is ignored.
    pub fn compare(&self, candidate: &Version) -> Ordering {
        match self {
            PartialVersion::Any => Ordering::Equal,
            PartialVersion::Major(major) => candidate.major.cmp(major),
            PartialVersion::Minor(major, minor) => {
                (candidate.major, candidate.minor).cmp(&(*major, *minor))
            }
            PartialVersion::Full(bound) => candidate.cmp_precedence(bound),
        }
    }
}

impl fmt::Display for VersionMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, all) in self.alternatives.iter().enumerate() {
            if i > 0 {
                write!(f, " || ")?;
            }
            for (j, comparator) in all.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", comparator)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::Eq => "",
            Op::Ne => "!",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Lt => "<",
            Op::Le => "<=",
        };
        f.write_str(s)
    }
}

impl fmt::Display for PartialVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialVersion::Any => write!(f, "x"),
            PartialVersion::Major(major) => write!(f, "{}.x", major),
            PartialVersion::Minor(major, minor) => write!(f, "{}.{}.x", major, minor),
            PartialVersion::Full(version) => write!(f, "{}", version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn cmp(op: Op, version: PartialVersion) -> Comparator {
        Comparator::new(op, version)
    }

    #[test]
    fn test_wildcard_equality() {
        let c = cmp(Op::Eq, PartialVersion::Minor(0, 8));
        assert!(c.matches(&v("0.8.0")));
        assert!(c.matches(&v("0.8.9")));
        assert!(!c.matches(&v("0.9.0")));
        assert!(!c.matches(&v("0.9.0-beta.1")));
        assert!(!c.matches(&v("0.7.99")));
    }

    #[test]
    fn test_wildcard_bounds() {
        assert!(cmp(Op::Gt, PartialVersion::Major(1)).matches(&v("2.0.0")));
        assert!(!cmp(Op::Gt, PartialVersion::Major(1)).matches(&v("1.9.0")));
        assert!(cmp(Op::Le, PartialVersion::Major(1)).matches(&v("1.9.0")));
        assert!(!cmp(Op::Lt, PartialVersion::Major(1)).matches(&v("1.0.0")));
        assert!(cmp(Op::Ne, PartialVersion::Minor(1, 2)).matches(&v("1.3.0")));
    }

    #[test]
    fn test_any_matches_everything() {
        let c = cmp(Op::Eq, PartialVersion::Any);
        assert!(c.matches(&v("0.0.1")));
        assert!(c.matches(&v("9.9.9-rc.1")));
        assert!(!cmp(Op::Ne, PartialVersion::Any).matches(&v("1.0.0")));
    }

    #[test]
    fn test_full_version_precedence() {
        let c = cmp(Op::Ge, PartialVersion::Full(v("1.0.0")));
        assert!(c.matches(&v("1.0.0")));
        assert!(c.matches(&v("2.0.0-beta.1")));
        assert!(!c.matches(&v("1.0.0-rc.1")));

        let exact = cmp(Op::Eq, PartialVersion::Full(v("1.2.3")));
        assert!(exact.matches(&v("1.2.3+build.7")));
        assert!(!exact.matches(&v("1.2.3-beta")));
    }

    #[test]
    fn test_alternatives() {
        // >=1.0.0 <2.0.0 || >=3.0.0 !3.0.1-beta.1
        let expr = VersionMatch::new(vec![
            vec![
                cmp(Op::Ge, PartialVersion::Full(v("1.0.0"))),
                cmp(Op::Lt, PartialVersion::Full(v("2.0.0"))),
            ],
            vec![
                cmp(Op::Ge, PartialVersion::Full(v("3.0.0"))),
                cmp(Op::Ne, PartialVersion::Full(v("3.0.1-beta.1"))),
            ],
        ]);

        assert!(expr.matches(&v("1.5.0")));
        assert!(!expr.matches(&v("2.5.0")));
        assert!(expr.matches(&v("3.0.0")));
        assert!(!expr.matches(&v("3.0.1-beta.1")));
        assert!(expr.matches(&v("3.0.1")));
        assert_eq!(
            expr.to_string(),
            ">=1.0.0 <2.0.0 || >=3.0.0 !3.0.1-beta.1"
        );
    }
}
