//! GitHub REST API client
//!
//! This module handles:
//! - Organization/user lookup with the user fallback
//! - Repository and branch queries
//! - Tag, release and pull request creation
//!
//! Two independently authenticated clients are used per run: the source
//! identity for read access and the PR identity for opening pull requests.
//! All calls are blocking request-response with no explicit timeout.

pub mod models;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde_json::json;

pub use models::{
    Account, ApiMessage, BranchInfo, Namespace, Pull, RefCreation, Release, RepoHandle, TagObject,
};

use crate::error::{AutotagError, Result};

/// Default API base; override with --api-url for GitHub Enterprise or tests
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Blocking GitHub API session
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_base: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(api_base: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("rocm-autotag/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn get(&self, path: &str) -> Result<Response> {
        let mut request = self.http.get(self.url(path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request.send()?)
    }

    fn post(&self, path: &str, body: &serde_json::Value) -> Result<Response> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request.send()?)
    }

    /// Map a non-success response to the fatal API error
    fn api_error(response: Response) -> AutotagError {
        let status = response.status().as_u16();
        let message = response
            .json::<ApiMessage>()
            .map(|m| m.message)
            .unwrap_or_default();
        AutotagError::ApiRequestFailed { status, message }
    }

    /// Resolve a name to an organization, retrying as an individual account.
    ///
    /// Both lookups missing is a fatal configuration error.
    pub fn namespace(&self, name: &str) -> Result<Namespace> {
        let response = self.get(&format!("/orgs/{name}"))?;
        match response.status() {
            StatusCode::NOT_FOUND => {}
            s if s.is_success() => {
                let account: Account = response.json()?;
                return Ok(Namespace::Org(account.login));
            }
            _ => return Err(Self::api_error(response)),
        }

        let response = self.get(&format!("/users/{name}"))?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(AutotagError::UnknownNamespace {
                name: name.to_string(),
            }),
            s if s.is_success() => {
                let account: Account = response.json()?;
                Ok(Namespace::User(account.login))
            }
            _ => Err(Self::api_error(response)),
        }
    }

    /// Fetch a repository by exact name
    pub fn repo(&self, owner: &str, name: &str) -> Result<RepoHandle> {
        self.try_repo(owner, name)?
            .ok_or_else(|| AutotagError::RepoNotFound {
                path: format!("{owner}/{name}"),
            })
    }

    /// Fetch a repository, signalling absence instead of failing
    pub fn try_repo(&self, owner: &str, name: &str) -> Result<Option<RepoHandle>> {
        let response = self.get(&format!("/repos/{owner}/{name}"))?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => Ok(Some(response.json()?)),
            _ => Err(Self::api_error(response)),
        }
    }

    /// Tip commit of a branch, or None when the branch does not exist
    pub fn branch_commit(&self, repo_full_name: &str, branch: &str) -> Result<Option<String>> {
        let response = self.get(&format!("/repos/{repo_full_name}/branches/{branch}"))?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => {
                let branch: BranchInfo = response.json()?;
                Ok(Some(branch.commit.sha))
            }
            _ => Err(Self::api_error(response)),
        }
    }

    /// Whether a tag ref already exists in the repository
    pub fn tag_exists(&self, repo_full_name: &str, tag: &str) -> Result<bool> {
        let response = self.get(&format!("/repos/{repo_full_name}/git/ref/tags/{tag}"))?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            _ => Err(Self::api_error(response)),
        }
    }

    /// Create an annotated tag object pointing at a commit
    pub fn create_tag_object(
        &self,
        repo_full_name: &str,
        tag: &str,
        message: &str,
        commit: &str,
    ) -> Result<TagObject> {
        let body = json!({
            "tag": tag,
            "message": message,
            "object": commit,
            "type": "commit",
        });
        let response = self.post(&format!("/repos/{repo_full_name}/git/tags"), &body)?;
        if response.status().is_success() {
            Ok(response.json()?)
        } else {
            Err(Self::api_error(response))
        }
    }

    /// Create a tag ref pointing at an object sha.
    ///
    /// A duplicate-ref conflict from the host is reported as a named
    /// outcome rather than an error; everything else propagates.
    pub fn create_tag_ref(
        &self,
        repo_full_name: &str,
        tag: &str,
        sha: &str,
    ) -> Result<RefCreation> {
        let body = json!({
            "ref": format!("refs/tags/{tag}"),
            "sha": sha,
        });
        let response = self.post(&format!("/repos/{repo_full_name}/git/refs"), &body)?;

        if response.status().is_success() {
            return Ok(RefCreation::Created);
        }
        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            let message = response
                .json::<ApiMessage>()
                .map(|m| m.message)
                .unwrap_or_default();
            if message.to_lowercase().contains("already exists") {
                return Ok(RefCreation::AlreadyExists);
            }
            return Err(AutotagError::ApiRequestFailed {
                status: 422,
                message,
            });
        }
        Err(Self::api_error(response))
    }

    /// Create a release object for an existing tag
    pub fn create_release(
        &self,
        repo_full_name: &str,
        tag: &str,
        name: &str,
        body_text: &str,
    ) -> Result<Release> {
        let body = json!({
            "tag_name": tag,
            "name": name,
            "body": body_text,
        });
        let response = self.post(&format!("/repos/{repo_full_name}/releases"), &body)?;
        if response.status().is_success() {
            Ok(response.json()?)
        } else {
            Err(Self::api_error(response))
        }
    }

    /// Open a pull request
    pub fn create_pull(
        &self,
        repo_full_name: &str,
        title: &str,
        body_text: &str,
        head: &str,
        base: &str,
    ) -> Result<Pull> {
        let body = json!({
            "title": title,
            "body": body_text,
            "head": head,
            "base": base,
        });
        let response = self.post(&format!("/repos/{repo_full_name}/pulls"), &body)?;
        if response.status().is_success() {
            Ok(response.json()?)
        } else {
            Err(Self::api_error(response))
        }
    }
}
