//! Wire models for the subset of the GitHub REST API that autotag consumes

use serde::Deserialize;

/// Repository owner as returned inside repository payloads
#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// A resolved repository handle.
///
/// Projected from the host API repository object; resolved once per
/// component and cached for the process lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoHandle {
    pub name: String,
    pub full_name: String,
    pub clone_url: String,
    pub html_url: String,
    pub owner: Owner,
}

/// An organization or user account payload
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: String,
}

/// A namespace is either an organization or an individual account.
///
/// Both carry a single capability: repositories are fetched by name under
/// the login. Which variant resolved is decided once, at namespace
/// resolution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    Org(String),
    User(String),
}

impl Namespace {
    pub fn login(&self) -> &str {
        match self {
            Namespace::Org(login) | Namespace::User(login) => login,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// Branch payload; only the tip commit is consumed
#[derive(Debug, Clone, Deserialize)]
pub struct BranchInfo {
    pub commit: CommitRef,
}

/// Annotated tag object created via the git data API
#[derive(Debug, Clone, Deserialize)]
pub struct TagObject {
    pub sha: String,
}

/// A published release
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub html_url: String,
}

/// A created pull request
#[derive(Debug, Clone, Deserialize)]
pub struct Pull {
    pub number: u64,
    pub html_url: String,
}

/// Error body shape shared by GitHub API failures
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// Outcome of a ref-creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefCreation {
    Created,
    /// The host reported the ref as a duplicate; benign for idempotent tagging
    AlreadyExists,
}
