//! Command implementations for the autotag CLI

pub mod bundle;
pub mod completions;
pub mod release;
pub mod version;

use std::collections::HashMap;

use crate::error::Result;
use crate::github::GithubClient;
use crate::manifest::Manifest;
use crate::resolver::RepoResolver;

/// Build a resolver over the two API identities and the manifest's remote
/// table, honoring a --org override of the default organization
fn build_resolver(
    api_url: &str,
    manifest: &Manifest,
    org_override: Option<&str>,
    token: Option<String>,
    pr_token: Option<String>,
) -> Result<RepoResolver> {
    let gh = GithubClient::new(api_url, token)?;
    let pr_gh = GithubClient::new(api_url, pr_token)?;
    let default_remote = org_override.unwrap_or(&manifest.default_remote).to_string();
    let remotes: HashMap<String, String> = manifest.remotes.clone();
    Ok(RepoResolver::new(gh, pr_gh, default_remote, remotes))
}

/// Fallback branch name: explicit --branch, or derived from the version
/// as spelled
fn fallback_branch(branch: Option<&str>, version: &crate::version::RocmVersion) -> String {
    match branch {
        Some(name) => name.to_string(),
        None => format!("release/rocm-rel-{version}"),
    }
}
