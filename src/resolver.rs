//! Namespace and repository resolution
//!
//! This module handles:
//! - Translating manifest remote shorthands to organization names
//! - Resolving an organization name to a namespace pair, one per API
//!   identity (source and PR)
//! - Resolving a component name to its source repository and the
//!   `{name}-internal` PR mirror, falling back to the source repository
//!   itself when no mirror exists
//!
//! All three lookups are memoized in instance-owned maps for the process
//! lifetime; a cached entry is never re-resolved mid-run.

use std::collections::HashMap;

use crate::error::Result;
use crate::github::{GithubClient, Namespace, RepoHandle};

/// Resolves and caches repository handles for release components
#[derive(Debug)]
pub struct RepoResolver {
    gh: GithubClient,
    pr_gh: GithubClient,
    default_remote: String,
    remotes: HashMap<String, String>,
    namespaces: HashMap<String, (Namespace, Namespace)>,
    repos: HashMap<String, (RepoHandle, RepoHandle)>,
}

impl RepoResolver {
    /// Create a resolver over the two API identities.
    ///
    /// `remotes` translates manifest shorthands to organization names;
    /// anything absent from the table falls back to `default_remote`.
    pub fn new(
        gh: GithubClient,
        pr_gh: GithubClient,
        default_remote: impl Into<String>,
        remotes: HashMap<String, String>,
    ) -> Self {
        Self {
            gh,
            pr_gh,
            default_remote: default_remote.into(),
            remotes,
            namespaces: HashMap::new(),
            repos: HashMap::new(),
        }
    }

    /// The source-identity client
    pub fn client(&self) -> &GithubClient {
        &self.gh
    }

    /// Organization name for a remote shorthand, or the configured default
    pub fn org_for(&self, remote: Option<&str>) -> &str {
        remote
            .and_then(|r| self.remotes.get(r))
            .map_or(self.default_remote.as_str(), String::as_str)
    }

    /// Namespace pair for an organization name, resolved at most once.
    ///
    /// Both identities must resolve the same logical name; an unresolvable
    /// name is a fatal configuration error.
    fn namespace_pair(&mut self, org: &str) -> Result<&(Namespace, Namespace)> {
        if !self.namespaces.contains_key(org) {
            let ns = self.gh.namespace(org)?;
            let pr_ns = self.pr_gh.namespace(org)?;
            self.namespaces.insert(org.to_string(), (ns, pr_ns));
        }

        #[allow(clippy::expect_used)]
        Ok(self
            .namespaces
            .get(org)
            .expect("namespace inserted on the line above"))
    }

    /// Source and PR repository handles for a component, resolved at most
    /// once per component name.
    ///
    /// The PR side prefers `{name}-internal`, falling back to `{name}`.
    pub fn repos(&mut self, name: &str, remote: Option<&str>) -> Result<(RepoHandle, RepoHandle)> {
        if !self.repos.contains_key(name) {
            let org = self.org_for(remote).to_string();
            let (ns, pr_ns) = self.namespace_pair(&org)?.clone();

            let repo = self.gh.repo(ns.login(), name)?;
            let pr_repo = match self
                .pr_gh
                .try_repo(pr_ns.login(), &format!("{name}-internal"))?
            {
                Some(mirror) => mirror,
                None => self.pr_gh.repo(pr_ns.login(), name)?,
            };

            self.repos
                .insert(name.to_string(), (repo, pr_repo));
        }

        #[allow(clippy::expect_used)]
        Ok(self
            .repos
            .get(name)
            .cloned()
            .expect("repos inserted on the line above"))
    }
}
