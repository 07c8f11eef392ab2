//! Version parsing and comparison
//!
//! Versions are dot-separated numeric segments (`1.2.3`) whose last segment may
//! carry a single trailing ASCII letter (`1.2.3a`). When both sides carry a
//! letter the letters decide first. The result is not transitive across
//! lettered and unlettered versions, so `Version` has no `PartialOrd`.

use crate::constants::VERSION_SEPARATOR;
use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Outcome of comparing version `a` against version `b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    /// `a` and `b` denote the same version
    Equal,
    /// `a` is older than `b`
    Less,
    /// `a` is newer than `b`
    Greater,
    /// `a` and `b` cannot be ordered against each other
    Incomparable,
}

impl Comparison {
    /// The comparison seen from the other side
    pub fn reverse(self) -> Self {
        match self {
            Comparison::Less => Comparison::Greater,
            Comparison::Greater => Comparison::Less,
            other => other,
        }
    }

    /// Convert to a standard ordering, `None` when incomparable
    pub fn as_ordering(self) -> Option<Ordering> {
        match self {
            Comparison::Equal => Some(Ordering::Equal),
            Comparison::Less => Some(Ordering::Less),
            Comparison::Greater => Some(Ordering::Greater),
            Comparison::Incomparable => None,
        }
    }
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Equal => Comparison::Equal,
            Ordering::Less => Comparison::Less,
            Ordering::Greater => Comparison::Greater,
        }
    }
}

/// A parsed bundle or host version
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    segments: Vec<u64>,
    suffix: Option<char>,
}

impl Version {
    /// Create a version from numeric segments and an optional letter suffix
    pub fn new(segments: Vec<u64>, suffix: Option<char>) -> Self {
        Self { segments, suffix }
    }

    /// Parse a version string.
    /// Supports formats like: "1.2.3", "0.0.1", "2.4.10b"
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let parts: Vec<&str> = version.split(VERSION_SEPARATOR).collect();
        let last = parts.len() - 1;

        let mut segments = Vec::with_capacity(parts.len());
        let mut suffix = None;

        for (index, part) in parts.iter().enumerate() {
            let mut digits = *part;

            if index == last {
                if let Some(letter) = digits.chars().last().filter(char::is_ascii_alphabetic) {
                    suffix = Some(letter);
                    digits = &digits[..digits.len() - 1];
                }
            }

            if digits.is_empty() {
                return Err(VersionError::format(
                    version,
                    format!("segment {} has no digits", index + 1),
                ));
            }

            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::format(
                    version,
                    format!("segment {} ('{}') is not numeric", index + 1, part),
                ));
            }

            let value = digits.parse::<u64>().map_err(|e| {
                VersionError::format(version, format!("segment {}: {}", index + 1, e))
            })?;
            segments.push(value);
        }

        Ok(Self { segments, suffix })
    }

    /// Numeric segments, most significant first
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Trailing letter of the last segment
    pub fn suffix(&self) -> Option<char> {
        self.suffix
    }

    /// Compare this version against another.
    ///
    /// If both sides carry a letter the higher letter wins outright and equal
    /// letters fall through to the numeric segments. Otherwise the numeric
    /// segments decide; a letter on only one side of equal segments leaves
    /// the pair incomparable.
    pub fn compare(&self, other: &Version) -> Comparison {
        if self.segments.len() != other.segments.len() {
            return Comparison::Incomparable;
        }

        if let (Some(a), Some(b)) = (self.suffix, other.suffix) {
            if a != b {
                return a.cmp(&b).into();
            }
        }

        match self.segments.cmp(&other.segments) {
            Ordering::Equal if self.suffix.is_some() != other.suffix.is_some() => {
                Comparison::Incomparable
            }
            core => core.into(),
        }
    }

    /// Whether this version is strictly older than `other`
    pub fn is_older_than(&self, other: &Version) -> Result<bool, VersionError> {
        match self.compare(other) {
            Comparison::Less => Ok(true),
            Comparison::Equal | Comparison::Greater => Ok(false),
            Comparison::Incomparable => Err(VersionError::incomparable(
                self.to_string(),
                other.to_string(),
            )),
        }
    }
}

/// Compare two version strings.
///
/// Segment-count mismatches are reported as [`Comparison::Incomparable`] before
/// either side is parsed; a malformed segment is a [`VersionError::Format`].
pub fn compare_versions(a: &str, b: &str) -> Result<Comparison, VersionError> {
    let a_count = a.split(VERSION_SEPARATOR).count();
    let b_count = b.split(VERSION_SEPARATOR).count();
    if a_count != b_count {
        return Ok(Comparison::Incomparable);
    }

    let a = Version::parse(a)?;
    let b = Version::parse(b)?;
    Ok(a.compare(&b))
}

/// Whether version string `a` is strictly older than `b`.
///
/// Incomparable pairs are surfaced as errors rather than treated as equal.
pub fn is_older(a: &str, b: &str) -> Result<bool, VersionError> {
    match compare_versions(a, b)? {
        Comparison::Less => Ok(true),
        Comparison::Equal | Comparison::Greater => Ok(false),
        Comparison::Incomparable => Err(VersionError::incomparable(a, b)),
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, "{}", VERSION_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        if let Some(letter) = self.suffix {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Comparison::Equal
    }
}
