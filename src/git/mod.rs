//! Git operations for the back-port flow
//!
//! This module handles:
//! - Initializing a scratch repository and fetching the source remote
//! - Creating the local release branch at the resolved commit
//! - Pushing that branch to the bot fork with token credentials
//!
//! Read access relies on git's native credential system (SSH keys,
//! credential helpers); the push uses the bot identity's token.

use std::path::Path;

use git2::{Cred, CredentialType, FetchOptions, PushOptions, RemoteCallbacks, Repository};

use crate::error::{AutotagError, Result};

/// Local branch name staged in the scratch repository before the push
const STAGING_BRANCH: &str = "release";

/// Set up authentication callbacks for read access
///
/// Delegates to git's native credential system: default credentials for
/// public repositories, then SSH agent, then credential helpers.
fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks) {
    callbacks.credentials(|url, username_from_url, allowed_types| {
        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(username) = username_from_url {
                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Ok(config) = git2::Config::open_default() {
                if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
                    return Ok(cred);
                }
            }
            if let Ok(cred) = Cred::userpass_plaintext("", "") {
                return Ok(cred);
            }
        }

        Err(git2::Error::new(
            git2::ErrorCode::Auth,
            git2::ErrorClass::Http,
            "authentication failed",
        ))
    });
}

/// Token credentials for pushing as the bot identity
fn setup_token_callbacks<'a>(callbacks: &mut RemoteCallbacks<'a>, user: &'a str, token: &'a str) {
    callbacks.credentials(move |_url, _username, _allowed| Cred::userpass_plaintext(user, token));
}

/// Initialize a scratch repository and fetch the source remote's branches
/// and tags into it
pub fn fetch_source(scratch: &Path, source_url: &str) -> Result<Repository> {
    let local = Repository::init(scratch)?;

    {
        let mut external = local.remote("external", source_url)?;
        let mut callbacks = RemoteCallbacks::new();
        setup_auth_callbacks(&mut callbacks);
        let mut options = FetchOptions::new();
        options.remote_callbacks(callbacks);

        external
            .fetch(
                &[
                    "+refs/heads/*:refs/remotes/external/*",
                    "+refs/tags/*:refs/tags/*",
                ],
                Some(&mut options),
                None,
            )
            .map_err(|e| AutotagError::GitFetchFailed {
                reason: e.message().to_string(),
            })?;
    }

    Ok(local)
}

/// Create the staging branch at the resolved commit and check it out
pub fn stage_release_branch(repo: &Repository, commit: &str) -> Result<()> {
    let oid = git2::Oid::from_str(commit)?;
    let commit_obj = repo
        .find_commit(oid)
        .map_err(|e| AutotagError::GitFetchFailed {
            reason: format!("commit {commit} not found after fetch: {}", e.message()),
        })?;

    repo.branch(STAGING_BRANCH, &commit_obj, true)?;
    repo.set_head(&format!("refs/heads/{STAGING_BRANCH}"))?;

    let mut checkout = git2::build::CheckoutBuilder::new();
    checkout.force();
    repo.checkout_head(Some(&mut checkout))?;

    Ok(())
}

/// Push the staging branch to `fork_url` under `branch`, authenticating
/// with the bot identity's token
pub fn push_to_fork(repo: &Repository, fork_url: &str, branch: &str, user: &str, token: &str) -> Result<()> {
    let mut fork = repo.remote("fork", fork_url)?;

    let mut callbacks = RemoteCallbacks::new();
    setup_token_callbacks(&mut callbacks, user, token);
    let mut options = PushOptions::new();
    options.remote_callbacks(callbacks);

    let refspec = format!("refs/heads/{STAGING_BRANCH}:refs/heads/{branch}");
    fork.push(&[refspec.as_str()], Some(&mut options))
        .map_err(|e| AutotagError::GitPushFailed {
            branch: branch.to_string(),
            reason: e.message().to_string(),
        })
}
