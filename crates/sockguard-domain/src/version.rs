//! Version-range expressions used by package rules.
//!
//! Supported forms:
//! - `*` matches every version string, including malformed ones
//! - `1.2.3` exact match
//! - `>=1.0.0`, `<=1.0`, `>1`, `<2.0.0`, `=1.4.0` comparators
//! - `1.2.x`, `1.x` prefix match
//!
//! Versions compare as `major.minor.patch`, numerically and component by component.
//! Missing components are padded with 0. Pre-release and build suffixes
//! (`-beta.1`, `+sha`) are ignored for matching.

use crate::error::PolicyError;
use std::fmt;
use std::str::FromStr;

/// A numeric `major.minor.patch` triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a package version. Returns `None` for anything that is not 1-3 numeric components.
    pub fn parse(input: &str) -> Option<Version> {
        let core = input
            .trim()
            .split(['-', '+'])
            .next()
            .unwrap_or_default();
        let parts = numeric_components(core)?;
        Some(Version::from_parts(&parts))
    }

    fn from_parts(parts: &[u64]) -> Version {
        let at = |i: usize| parts.get(i).copied().unwrap_or(0);
        Version::new(at(0), at(1), at(2))
    }

    fn component(&self, i: usize) -> u64 {
        match i {
            0 => self.major,
            1 => self.minor,
            _ => self.patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparator {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
}

impl Comparator {
    fn as_str(self) -> &'static str {
        match self {
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Eq => "=",
        }
    }

    fn holds(self, lhs: Version, rhs: Version) -> bool {
        match self {
            Comparator::Gt => lhs > rhs,
            Comparator::Ge => lhs >= rhs,
            Comparator::Lt => lhs < rhs,
            Comparator::Le => lhs <= rhs,
            Comparator::Eq => lhs == rhs,
        }
    }
}

/// Closed set of range forms. Each variant has its own matching rule in [`VersionRange::matches`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum VersionRange {
    Any,
    Exact(Version),
    Compare(Comparator, Version),
    /// Leading components that must match exactly (`1.2.x` -> `[1, 2]`).
    Prefix(Vec<u64>),
}

impl VersionRange {
    pub fn parse(input: &str) -> Result<VersionRange, PolicyError> {
        let s = input.trim();
        let invalid = |reason: &'static str| PolicyError::InvalidVersionRange {
            range: input.to_string(),
            reason,
        };

        if s.is_empty() {
            return Err(invalid("empty range"));
        }
        if s == "*" {
            return Ok(VersionRange::Any);
        }

        // Two-character operators first so `>=` is not read as `>` followed by `=1.0`.
        let operators = [
            (">=", Comparator::Ge),
            ("<=", Comparator::Le),
            (">", Comparator::Gt),
            ("<", Comparator::Lt),
            ("=", Comparator::Eq),
        ];
        for (op, cmp) in operators {
            if let Some(rest) = s.strip_prefix(op) {
                let parts = numeric_components(rest.trim())
                    .ok_or_else(|| invalid("comparator must be followed by a numeric version"))?;
                return Ok(VersionRange::Compare(cmp, Version::from_parts(&parts)));
            }
        }

        if let Some(head) = s.strip_suffix(".x").or_else(|| s.strip_suffix(".X")) {
            let parts =
                numeric_components(head).ok_or_else(|| invalid("x-range prefix must be numeric"))?;
            if parts.len() > 2 {
                return Err(invalid("x-range has too many components"));
            }
            return Ok(VersionRange::Prefix(parts));
        }

        numeric_components(s)
            .map(|parts| VersionRange::Exact(Version::from_parts(&parts)))
            .ok_or_else(|| invalid("expected `*`, an exact version, a comparator, or an x-range"))
    }

    /// Whether `version` satisfies this range.
    ///
    /// Only [`VersionRange::Any`] matches versions that do not parse.
    pub fn matches(&self, version: &str) -> bool {
        if let VersionRange::Any = self {
            return true;
        }
        let Some(v) = Version::parse(version) else {
            return false;
        };
        match self {
            VersionRange::Any => true,
            VersionRange::Exact(want) => v == *want,
            VersionRange::Compare(cmp, bound) => cmp.holds(v, *bound),
            VersionRange::Prefix(prefix) => prefix
                .iter()
                .enumerate()
                .all(|(i, p)| v.component(i) == *p),
        }
    }
}

impl FromStr for VersionRange {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionRange::parse(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRange::Any => f.write_str("*"),
            VersionRange::Exact(v) => write!(f, "{v}"),
            VersionRange::Compare(cmp, v) => write!(f, "{}{v}", cmp.as_str()),
            VersionRange::Prefix(parts) => {
                for p in parts {
                    write!(f, "{p}.")?;
                }
                f.write_str("x")
            }
        }
    }
}

/// `1`, `1.2`, `1.2.3` -> components. Anything else -> `None`.
fn numeric_components(s: &str) -> Option<Vec<u64>> {
    if s.is_empty() {
        return None;
    }
    let parts = s
        .split('.')
        .map(|p| {
            if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) {
                p.parse::<u64>().ok()
            } else {
                None
            }
        })
        .collect::<Option<Vec<u64>>>()?;
    (parts.len() <= 3).then_some(parts)
}
