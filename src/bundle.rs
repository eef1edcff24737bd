//! Release bundle construction
//!
//! A bundle is the resolved set of per-library commits for one ROCm
//! version. For each manifest component, in manifest order, the builder
//! resolves repository handles, looks the version up in the component's
//! tag index, and either takes the tagged commit, falls back to the tip of
//! the configured release branch (in-flight releases only), or omits the
//! component from the bundle.
//!
//! Missing fallback branches are collected as advisories, not errors.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::github::RepoHandle;
use crate::manifest::Manifest;
use crate::resolver::RepoResolver;
use crate::tags::TagIndex;
use crate::version::RocmVersion;

/// The resolved unit of work for one library at one ROCm version.
///
/// Created once by the bundle builder after successful commit resolution
/// and immutable afterward.
#[derive(Debug, Clone)]
pub struct ReleaseLibrary {
    pub name: String,
    pub repo: RepoHandle,
    pub pr_repo: RepoHandle,
    pub commit: String,
    pub version: RocmVersion,
    /// Display group label; empty when identical to the previous entry
    pub group: String,
    /// Display category label; empty when identical to the previous entry
    pub category: String,
}

impl ReleaseLibrary {
    /// Repo qualified with user/organization
    pub fn qualified_repo(&self) -> &str {
        &self.repo.full_name
    }

    /// The full zero-padded version string
    pub fn full_version(&self) -> String {
        self.version.full()
    }

    /// The annotated tag for this release
    pub fn tag(&self) -> String {
        format!("rocm-{}", self.full_version())
    }

    /// The alias tag for a shorthand version spelling, if any
    pub fn alias_tag(&self) -> Option<String> {
        self.version
            .is_shorthand()
            .then(|| format!("rocm-{}", self.version))
    }

    /// The release branch for this release, using the version as spelled
    pub fn branch(&self) -> String {
        format!("release/rocm-rel-{}", self.version)
    }

    /// The GitHub URL of the release
    pub fn release_url(&self) -> String {
        format!(
            "https://github.com/{}/releases/tag/{}",
            self.qualified_repo(),
            self.tag()
        )
    }

    /// The documentation site for this library
    pub fn documentation_url(&self) -> String {
        format!(
            "https://rocm.docs.amd.com/projects/{}/en/latest",
            self.repo.name
        )
    }

    /// The GitHub repository URL
    pub fn repository_url(&self) -> &str {
        &self.repo.html_url
    }
}

/// The libraries bundled into one ROCm release, in manifest order
#[derive(Debug, Clone)]
pub struct ReleaseBundle {
    pub version: RocmVersion,
    libraries: Vec<ReleaseLibrary>,
}

impl ReleaseBundle {
    pub fn libraries(&self) -> &[ReleaseLibrary] {
        &self.libraries
    }

    pub fn get(&self, name: &str) -> Option<&ReleaseLibrary> {
        self.libraries.iter().find(|lib| lib.name == name)
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

/// A component whose fallback branch was missing; advisory, not fatal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingBranch {
    pub component: String,
    pub branch: String,
}

impl std::fmt::Display for MissingBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} for {}", self.branch, self.component)
    }
}

/// One built bundle plus its advisories
#[derive(Debug, Clone)]
pub struct BundleReport {
    pub bundle: ReleaseBundle,
    pub missing_branches: Vec<MissingBranch>,
}

/// Run-length suppression of repeated display labels.
///
/// Keys are compared; the first occurrence in a run renders its mapped
/// label, repeats render empty. State is local to one bundle build.
struct LabelRun {
    prev: Option<String>,
}

impl LabelRun {
    fn new() -> Self {
        Self { prev: None }
    }

    fn next(&mut self, key: &str, label: String) -> String {
        if self.prev.as_deref() == Some(key) {
            String::new()
        } else {
            self.prev = Some(key.to_string());
            label
        }
    }
}

/// Builds release bundles across a range of ROCm versions
pub struct BundleFactory {
    resolver: RepoResolver,
    tags: TagIndex,
    product_repo: String,
    fallback_branch: String,
    product_clone_url: Option<String>,
}

impl BundleFactory {
    /// Create a factory.
    ///
    /// `product_repo` is the qualified umbrella repository ("ROCm/ROCm")
    /// whose tags define the set of released ROCm versions;
    /// `fallback_branch` is tried for components that have not tagged an
    /// in-flight release yet.
    pub fn new(
        resolver: RepoResolver,
        product_repo: impl Into<String>,
        fallback_branch: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            tags: TagIndex::new(),
            product_repo: product_repo.into(),
            fallback_branch: fallback_branch.into(),
            product_clone_url: None,
        }
    }

    /// Clone URL of the umbrella product repository, resolved once
    fn product_clone_url(&mut self) -> Result<String> {
        if self.product_clone_url.is_none() {
            let (owner, name) = self
                .product_repo
                .split_once('/')
                .ok_or_else(|| crate::error::AutotagError::RepoNotFound {
                    path: self.product_repo.clone(),
                })?;
            let repo = self.resolver.client().repo(owner, name)?;
            self.product_clone_url = Some(repo.clone_url);
        }

        #[allow(clippy::expect_used)]
        Ok(self
            .product_clone_url
            .clone()
            .expect("resolved on the line above"))
    }

    /// Build the bundle for one ROCm version.
    ///
    /// Components without a tag for `version` are skipped unless
    /// `allow_untagged` is set, in which case the fallback branch tip is
    /// substituted; components whose fallback branch is also missing are
    /// recorded as advisories and skipped.
    pub fn build_bundle(
        &mut self,
        version: &RocmVersion,
        manifest: &Manifest,
        allow_untagged: bool,
    ) -> Result<BundleReport> {
        let mut libraries = Vec::new();
        let mut missing_branches = Vec::new();
        let mut group_run = LabelRun::new();
        let mut category_run = LabelRun::new();

        for component in &manifest.components {
            let (repo, pr_repo) = self
                .resolver
                .repos(&component.name, component.remote.as_deref())?;

            let commit = match self.tags.commit_for(&repo.clone_url, version)? {
                Some(sha) => sha,
                None if !allow_untagged => continue,
                None => {
                    match self
                        .resolver
                        .client()
                        .branch_commit(&repo.full_name, &self.fallback_branch)?
                    {
                        Some(sha) => sha,
                        None => {
                            missing_branches.push(MissingBranch {
                                component: component.name.clone(),
                                branch: self.fallback_branch.clone(),
                            });
                            continue;
                        }
                    }
                }
            };

            // Suppression state only advances for components that made it
            // into the bundle.
            let group = group_run.next(&component.group, manifest.group_label(&component.group));
            let category = category_run.next(
                &component.category,
                manifest.category_label(&component.category),
            );

            libraries.push(ReleaseLibrary {
                name: component.name.clone(),
                repo,
                pr_repo,
                commit,
                version: *version,
                group,
                category,
            });
        }

        Ok(BundleReport {
            bundle: ReleaseBundle {
                version: *version,
                libraries,
            },
            missing_branches,
        })
    }

    /// ROCm versions released in `[min, up_to]`, ascending, with `up_to`
    /// included even when the umbrella repository has not tagged it yet
    pub fn release_versions(
        &mut self,
        up_to: &RocmVersion,
        min: &RocmVersion,
    ) -> Result<Vec<RocmVersion>> {
        let url = self.product_clone_url()?;
        let mut versions: Vec<RocmVersion> = self
            .tags
            .tags(&url)?
            .keys()
            .filter(|v| *v >= min && *v <= up_to)
            .copied()
            .collect();

        if !versions.contains(up_to) {
            versions.push(*up_to);
            versions.sort();
        }

        Ok(versions)
    }

    /// Build one bundle per released ROCm version in `[min, up_to]`.
    ///
    /// Only the maximum version, the in-flight release, may fall back to
    /// untagged branch tips; historical versions must be tagged.
    pub fn build_range(
        &mut self,
        up_to: &RocmVersion,
        manifest: &Manifest,
        min: &RocmVersion,
    ) -> Result<BTreeMap<RocmVersion, BundleReport>> {
        let versions = self.release_versions(up_to, min)?;
        let max = versions.last().copied();

        let mut reports = BTreeMap::new();
        for version in versions {
            let allow_untagged = Some(version) == max;
            let report = self.build_bundle(&version, manifest, allow_untagged)?;
            reports.insert(version, report);
        }

        Ok(reports)
    }
}
