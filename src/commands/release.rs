//! Release command implementation
//!
//! Resolves the bundle for the target ROCm version (branch fallback
//! allowed, since the release may not be tagged yet) and then walks the
//! orchestrator's two transitions for every resolved library: tag +
//! release, then the back-port pull request. Each transition is gated by
//! its own confirmation.

use crate::bundle::BundleFactory;
use crate::cli::ReleaseArgs;
use crate::error::{AutotagError, Result};
use crate::github::GithubClient;
use crate::manifest::Manifest;
use crate::progress;
use crate::release;
use crate::ui::display;
use crate::version::RocmVersion;

/// Run the release command
pub fn run(api_url: &str, args: ReleaseArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let version: RocmVersion = args.version.parse()?;

    // The PR identity also needs a push credential; require it up front
    // unless back-ports are switched off entirely.
    let pull_assume = args.pull_assume();
    let pr_token = match (&args.pr_token, pull_assume) {
        (Some(token), _) => Some(token.clone()),
        (None, Some(false)) => None,
        (None, _) => {
            return Err(AutotagError::MissingToken {
                which: "AUTOTAG_PR_TOKEN".to_string(),
            });
        }
    };

    let gh = GithubClient::new(api_url, args.token.clone())?;
    let pr_gh = GithubClient::new(api_url, pr_token.clone())?;

    let resolver = super::build_resolver(
        api_url,
        &manifest,
        args.org.as_deref(),
        args.token.clone(),
        pr_token.clone(),
    )?;
    let branch = super::fallback_branch(args.branch.as_deref(), &version);
    let mut factory = BundleFactory::new(resolver, manifest.product_repo.clone(), branch);

    let spinner = progress::resolving_spinner("Resolving release bundle...");
    let report = factory.build_bundle(&version, &manifest, true);
    spinner.finish_and_clear();
    let report = report?;

    display::display_bundle(&report);

    if report.bundle.is_empty() {
        println!("Nothing to release for rocm-{version}");
        return Ok(());
    }

    for entry in report.bundle.libraries() {
        let message = args.message.replace("{version}", &entry.full_version());
        let notes = args.notes.replace("{version}", &entry.full_version());

        display::display_release_plan(entry, &message);
        let outcome = release::publish(entry, &gh, &message, &notes, args.release_assume())?;
        display::display_release_outcome(entry, &outcome);

        let backport_outcome = match &pr_token {
            Some(token) => {
                release::backport(entry, &pr_gh, &args.bot_user, token, pull_assume)?
            }
            None => release::BackportOutcome::Declined,
        };
        display::display_backport_outcome(&backport_outcome);
    }

    Ok(())
}
