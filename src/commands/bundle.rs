//! Bundle command implementation
//!
//! Resolves one release bundle per ROCm version in the requested range
//! and prints them, oldest first. Read-only: no tags, releases or pull
//! requests are created here.

use crate::bundle::BundleFactory;
use crate::cli::BundleArgs;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::progress;
use crate::ui::display;
use crate::version::RocmVersion;

/// Run the bundle command
pub fn run(api_url: &str, args: BundleArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let version: RocmVersion = args.version.parse()?;
    let min_version: RocmVersion = args.min_version.parse()?;

    let resolver = super::build_resolver(
        api_url,
        &manifest,
        args.org.as_deref(),
        args.token.clone(),
        args.token,
    )?;
    let branch = super::fallback_branch(args.branch.as_deref(), &version);
    let mut factory = BundleFactory::new(resolver, manifest.product_repo.clone(), branch);

    let spinner = progress::resolving_spinner("Resolving release bundles...");
    let reports = factory.build_range(&version, &manifest, &min_version);
    spinner.finish_and_clear();

    for report in reports?.values() {
        display::display_bundle(report);
    }

    Ok(())
}
