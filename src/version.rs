//! Dotted version identifiers with numeric ordering.
//!
//! Catalog versions and OS versions are plain dot-delimited numeric strings
//! ("2.4.1", "14.0"). Comparison is component-wise numeric, never
//! lexicographic, and the shorter sequence is padded with zeros, so
//! "2.0" == "2.0.0" and "1.10.0" > "1.9.0".

use crate::error::{LookoutError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A dot-delimited numeric version identifier.
///
/// Construction goes through [`FromStr`] / [`VersionIdentifier::parse`],
/// which rejects malformed strings. Once constructed, comparison is total
/// and cannot fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionIdentifier {
    components: Vec<u64>,
}

impl VersionIdentifier {
    /// Parse a version from its dotted string form.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Parse`] for empty input, empty components
    /// ("1..2"), or non-numeric components ("1.beta").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LookoutError::Parse("empty version string".to_owned()));
        }

        let components = s
            .split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|_| {
                    LookoutError::Parse(format!("invalid version component {part:?} in {s:?}"))
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        Ok(Self { components })
    }

    /// The numeric components as parsed, without normalization.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Which component position separates `self` from a newer version.
    ///
    /// Returns `None` when the versions compare equal. Positions past the
    /// fourth all count as a revision change.
    pub fn severity_against(&self, newer: &VersionIdentifier) -> Option<UpdateSeverity> {
        let len = self.components.len().max(newer.components.len());
        for index in 0..len {
            let ours = self.components.get(index).copied().unwrap_or(0);
            let theirs = newer.components.get(index).copied().unwrap_or(0);
            if ours != theirs {
                return Some(match index {
                    0 => UpdateSeverity::Major,
                    1 => UpdateSeverity::Minor,
                    2 => UpdateSeverity::Patch,
                    _ => UpdateSeverity::Revision,
                });
            }
        }
        None
    }
}

impl Ord for VersionIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for index in 0..len {
            let ours = self.components.get(index).copied().unwrap_or(0);
            let theirs = other.components.get(index).copied().unwrap_or(0);
            match ours.cmp(&theirs) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionIdentifier {}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{component}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for VersionIdentifier {
    type Err = LookoutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionIdentifier {
    type Error = LookoutError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<VersionIdentifier> for String {
    fn from(version: VersionIdentifier) -> Self {
        version.to_string()
    }
}

/// Which component position changed between an installed version and a
/// newer catalog version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateSeverity {
    /// First component changed (1.x → 2.x).
    Major,
    /// Second component changed (1.2.x → 1.3.x).
    Minor,
    /// Third component changed (1.2.3 → 1.2.4).
    Patch,
    /// Fourth or later component changed (1.2.3.4 → 1.2.3.5).
    Revision,
}

impl fmt::Display for UpdateSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
            Self::Revision => write!(f, "revision"),
        }
    }
}
