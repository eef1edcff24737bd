//! Release orchestration
//!
//! Two independent, user-confirmed transitions per resolved library:
//!
//! - tag + release: annotated tag and release object at the resolved
//!   commit, plus an unannotated alias tag when the version was requested
//!   in shorthand ("6.2") so both spellings resolve
//! - back-port pull request: push the release commit to the bot fork as
//!   the release branch and open a PR into the mirror's develop branch
//!
//! Tagging is idempotent: an existing tag is an informational no-op.
//! Back-port failures propagate; the scratch clone is removed either way.

use crate::bundle::ReleaseLibrary;
use crate::error::Result;
use crate::git;
use crate::github::{GithubClient, Pull, RefCreation, Release};
use crate::temp;
use crate::ui::prompt;

/// Base branch that back-port pull requests target
const DEVELOP_BRANCH: &str = "develop";

/// Outcome of the tag + release transition
#[derive(Debug)]
pub enum ReleaseOutcome {
    Released(Release),
    /// The tag already existed; nothing was created
    AlreadyReleased,
    Declined,
}

/// Outcome of the back-port transition
#[derive(Debug)]
pub enum BackportOutcome {
    Created(Pull),
    Declined,
}

/// Create the annotated tag, the release and the optional alias tag for a
/// resolved library.
///
/// The tag is checked for existence first; a pre-existing tag (or a
/// duplicate-ref conflict racing the check) is reported as
/// `AlreadyReleased` rather than an error.
pub fn publish(
    entry: &ReleaseLibrary,
    gh: &GithubClient,
    message: &str,
    notes: &str,
    assume: Option<bool>,
) -> Result<ReleaseOutcome> {
    if !prompt::confirm("Would you like to create this tag and release?", assume)? {
        return Ok(ReleaseOutcome::Declined);
    }

    let repo = entry.qualified_repo();
    let tag = entry.tag();

    if gh.tag_exists(repo, &tag)? {
        return Ok(ReleaseOutcome::AlreadyReleased);
    }

    let tag_object = gh.create_tag_object(repo, &tag, message, &entry.commit)?;
    if gh.create_tag_ref(repo, &tag, &tag_object.sha)? == RefCreation::AlreadyExists {
        return Ok(ReleaseOutcome::AlreadyReleased);
    }

    let release = gh.create_release(repo, &tag, message, notes)?;

    // The alias lets the unpadded spelling resolve too; it points straight
    // at the commit, no tag object.
    if let Some(alias) = entry.alias_tag() {
        gh.create_tag_ref(repo, &alias, &entry.commit)?;
    }

    Ok(ReleaseOutcome::Released(release))
}

/// Push the release commit to the bot fork and open the back-port pull
/// request into the mirror's develop branch.
///
/// The scratch clone lives in a uniquely named temporary directory and is
/// removed when this function returns, success or not.
pub fn backport(
    entry: &ReleaseLibrary,
    pr_gh: &GithubClient,
    bot_user: &str,
    token: &str,
    assume: Option<bool>,
) -> Result<BackportOutcome> {
    let question = format!(
        "Do you want to create a pull request from this release to {}:{DEVELOP_BRANCH}?",
        entry.pr_repo.full_name
    );
    if !prompt::confirm(&question, assume)? {
        return Ok(BackportOutcome::Declined);
    }

    let branch = entry.branch();

    let scratch = tempfile::Builder::new()
        .prefix(&format!("autotag-{}-", entry.name))
        .tempdir_in(temp::temp_dir_base())?;

    let local = git::fetch_source(scratch.path(), &entry.repo.clone_url)?;
    git::stage_release_branch(&local, &entry.commit)?;

    let fork_url = format!("https://github.com/{bot_user}/{}", entry.pr_repo.name);
    git::push_to_fork(&local, &fork_url, &branch, bot_user, token)?;
    drop(local);
    drop(scratch);

    let title = format!(
        "Hotfixes from {branch} at release {}",
        entry.full_version()
    );
    let body = format!(
        "This is an autogenerated PR.\n This is intended to pull any hotfixes for ROCm \
         release {} (including changelogs and documentation) back into {DEVELOP_BRANCH}.",
        entry.full_version()
    );

    let pull = pr_gh.create_pull(
        &entry.pr_repo.full_name,
        &title,
        &body,
        &format!("{bot_user}:{branch}"),
        DEVELOP_BRANCH,
    )?;

    Ok(BackportOutcome::Created(pull))
}
