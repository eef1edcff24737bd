//! Display functions for release bundles and orchestrator outcomes

use console::Style;

use crate::bundle::{BundleReport, ReleaseLibrary};
use crate::release::{BackportOutcome, ReleaseOutcome};

/// Print one bundle as a table, group/category columns blank where the
/// label repeats the previous row, followed by any missing-branch
/// advisories
pub fn display_bundle(report: &BundleReport) {
    let header = Style::new().bold();
    let commit_style = Style::new().dim();

    println!(
        "\n{}",
        header.apply_to(format!("Libraries for rocm-{}:", report.bundle.version))
    );

    for lib in report.bundle.libraries() {
        println!(
            "  {:<14} {:<12} {:<24} {}",
            lib.group,
            lib.category,
            lib.name,
            commit_style.apply_to(&lib.commit)
        );
    }

    let warn = Style::new().yellow();
    for missing in &report.missing_branches {
        println!(
            "{}",
            warn.apply_to(format!("Could not find the following branch: {missing}"))
        );
    }
}

/// Print what the tag + release transition is about to do
pub fn display_release_plan(entry: &ReleaseLibrary, message: &str) {
    let label = Style::new().bold();
    println!();
    println!("{} {}", label.apply_to("Repo:"), entry.qualified_repo());
    println!("{} '{}'", label.apply_to("Tag Version:"), entry.tag());
    println!("{} '{message}'", label.apply_to("Release Message:"));
    println!("{} '{}'", label.apply_to("Release Commit:"), entry.commit);
}

/// Print the outcome of the tag + release transition
pub fn display_release_outcome(entry: &ReleaseLibrary, outcome: &ReleaseOutcome) {
    match outcome {
        ReleaseOutcome::Released(release) => println!("{}", release.html_url),
        ReleaseOutcome::AlreadyReleased => println!("Already released {}", entry.name),
        ReleaseOutcome::Declined => {}
    }
}

/// Print the outcome of the back-port transition
pub fn display_backport_outcome(outcome: &BackportOutcome) {
    match outcome {
        BackportOutcome::Created(pull) => {
            println!("Pull request #{} created: {}", pull.number, pull.html_url);
        }
        BackportOutcome::Declined => {}
    }
}
