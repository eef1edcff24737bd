//! Remote tag index
//!
//! This module handles:
//! - Listing a repository's tags via `git ls-remote` without cloning
//! - Filtering for `rocm-N.N(.N)` release tags and mapping them to commits
//! - Memoizing one listing per repository URL for the process lifetime

use std::collections::{BTreeMap, HashMap};
use std::process::Command;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{AutotagError, Result};
use crate::version::RocmVersion;

/// Version-to-commit mapping for one repository
pub type VersionMap = BTreeMap<RocmVersion, String>;

fn release_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        #[allow(clippy::expect_used)]
        Regex::new(r"rocm-(\d+(?:\.\d+)+)").expect("release tag pattern is valid")
    })
}

/// Parse `git ls-remote --tags` output into a version map.
///
/// Lines are `{sha}\t{refname}`. Refs that do not carry a `rocm-` dotted
/// numeric suffix are skipped, as are versions that fail to canonicalize
/// (e.g. four components). When two refs canonicalize to the same version
/// the later line wins, so peeled `^{}` entries supersede the annotated
/// tag object they follow.
pub fn parse_tag_listing(output: &str) -> VersionMap {
    let mut result = VersionMap::new();

    for line in output.lines() {
        let mut columns = line.split('\t');
        let (Some(sha), Some(refname)) = (columns.next(), columns.next()) else {
            continue;
        };

        let Some(captures) = release_tag_pattern().captures(refname) else {
            continue;
        };

        if let Ok(version) = captures[1].parse::<RocmVersion>() {
            result.insert(version, sha.to_string());
        }
    }

    result
}

/// Fetch the version-to-commit map for a repository URL.
///
/// Queries the remote's tag refs without cloning. A transport failure is
/// fatal to the caller; there is no retry here.
pub fn fetch_tags(url: &str) -> Result<VersionMap> {
    let output = Command::new("git")
        .args(["ls-remote", "--tags", url])
        .output()
        .map_err(|e| AutotagError::TagListingFailed {
            url: url.to_string(),
            reason: format!("git ls-remote failed: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AutotagError::TagListingFailed {
            url: url.to_string(),
            reason: stderr.trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_tag_listing(&stdout))
}

/// Process-lifetime cache of tag listings, keyed by repository URL
#[derive(Debug, Default)]
pub struct TagIndex {
    listings: HashMap<String, VersionMap>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The version map for a repository, fetching it on first reference.
    ///
    /// A cache hit short-circuits the network call entirely.
    pub fn tags(&mut self, url: &str) -> Result<&VersionMap> {
        if !self.listings.contains_key(url) {
            let listing = fetch_tags(url)?;
            self.listings.insert(url.to_string(), listing);
        }

        #[allow(clippy::expect_used)]
        Ok(self
            .listings
            .get(url)
            .expect("listing inserted on the line above"))
    }

    /// The commit for a version in a repository, if tagged
    pub fn commit_for(&mut self, url: &str, version: &RocmVersion) -> Result<Option<String>> {
        Ok(self.tags(url)?.get(version).cloned())
    }
}
