//! ROCm release version handling
//!
//! This module handles:
//! - Parsing dotted numeric version strings ("6.2", "6.2.1")
//! - Zero-padding to the canonical three-component form
//! - Total ordering over the canonical (major, minor, patch) triple
//!
//! The original spelling is preserved so that shorthand versions ("6.2")
//! can still be rendered as written, e.g. for the `rocm-6.2` alias tag.

use std::fmt;
use std::str::FromStr;

use crate::error::{AutotagError, Result};

/// A ROCm release version, canonicalized to major.minor.patch.
///
/// Equality, ordering and hashing only consider the canonical triple, so
/// `"6.2"` and `"6.2.0"` are the same version. `components` records how many
/// components the input had (1 to 3) for display purposes only.
#[derive(Debug, Clone, Copy)]
pub struct RocmVersion {
    major: u64,
    minor: u64,
    patch: u64,
    components: u8,
}

impl RocmVersion {
    /// The canonical zero-padded form, e.g. "6.2.0"
    pub fn full(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Whether the original input had fewer than three components
    pub fn is_shorthand(&self) -> bool {
        self.components < 3
    }
}

impl FromStr for RocmVersion {
    type Err = AutotagError;

    /// Parse a dotted numeric version string.
    ///
    /// Accepts one to three numeric components; anything else (empty input,
    /// non-numeric segments, four or more components) is rejected. Missing
    /// components are treated as zero.
    fn from_str(text: &str) -> Result<Self> {
        let parse_failed = || AutotagError::VersionParseFailed {
            input: text.to_string(),
        };

        let segments: Vec<&str> = text.split('.').collect();
        if segments.is_empty() || segments.len() > 3 {
            return Err(parse_failed());
        }

        let mut parts = [0u64; 3];
        for (i, segment) in segments.iter().enumerate() {
            if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit()) {
                return Err(parse_failed());
            }
            parts[i] = segment.parse().map_err(|_| parse_failed())?;
        }

        Ok(Self {
            major: parts[0],
            minor: parts[1],
            patch: parts[2],
            components: segments.len() as u8,
        })
    }
}

impl fmt::Display for RocmVersion {
    /// Renders the version as originally spelled (shorthand stays shorthand)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.components {
            1 => write!(f, "{}", self.major),
            2 => write!(f, "{}.{}", self.major, self.minor),
            _ => write!(f, "{}.{}.{}", self.major, self.minor, self.patch),
        }
    }
}

impl PartialEq for RocmVersion {
    fn eq(&self, other: &Self) -> bool {
        (self.major, self.minor, self.patch) == (other.major, other.minor, other.patch)
    }
}

impl Eq for RocmVersion {}

impl PartialOrd for RocmVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RocmVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl std::hash::Hash for RocmVersion {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (self.major, self.minor, self.patch).hash(state);
    }
}
