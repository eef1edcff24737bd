//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// autotag - ROCm release tagging tool
///
/// Resolve per-library commits for ROCm releases and drive tagging,
/// releases and back-port pull requests.
#[derive(Parser, Debug)]
#[command(
    name = "autotag",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "ROCm release tagging tool",
    long_about = "autotag resolves, for each library bundled into a ROCm release, the exact \
                  source commit behind a ROCm version, and drives the release protocol: \
                  annotated tags, GitHub releases and back-port pull requests.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  autotag bundle 6.2 --manifest components.yaml\n    \
                  autotag release 6.2 --manifest components.yaml --yes-release --no-pull\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/ROCm/rocm-autotag"
)]
pub struct Cli {
    /// GitHub API base URL
    #[arg(long, global = true, env = "AUTOTAG_API_URL",
          default_value = crate::github::DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve and print release bundles for a range of ROCm versions
    Bundle(BundleArgs),

    /// Tag, release and back-port one ROCm version across all libraries
    Release(ReleaseArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the bundle command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show bundles from 5.0.0 up to an in-flight 6.2:\n    \
                  autotag bundle 6.2 --manifest components.yaml\n\n  \
                  Narrow the range:\n    \
                  autotag bundle 6.2 --manifest components.yaml --min-version 6.0")]
pub struct BundleArgs {
    /// Target ROCm version, e.g. 6.2 or 6.2.1
    pub version: String,

    /// Component manifest file
    #[arg(long, short = 'm')]
    pub manifest: PathBuf,

    /// Oldest ROCm version to include
    #[arg(long, default_value = "5.0.0")]
    pub min_version: String,

    /// Fallback branch for untagged components (defaults to
    /// release/rocm-rel-{version})
    #[arg(long, short = 'b')]
    pub branch: Option<String>,

    /// Override the manifest's default organization
    #[arg(long)]
    pub org: Option<String>,

    /// GitHub token for API reads
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Arguments for the release command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Interactive release:\n    \
                  autotag release 6.2 --manifest components.yaml\n\n  \
                  Non-interactive, tags only:\n    \
                  autotag release 6.2 --manifest components.yaml --yes-release --no-pull\n\n  \
                  Back-port PRs only:\n    \
                  autotag release 6.2 --manifest components.yaml --no-release --yes-pull")]
pub struct ReleaseArgs {
    /// Target ROCm version, e.g. 6.2 or 6.2.1
    pub version: String,

    /// Component manifest file
    #[arg(long, short = 'm')]
    pub manifest: PathBuf,

    /// Fallback branch for untagged components (defaults to
    /// release/rocm-rel-{version})
    #[arg(long, short = 'b')]
    pub branch: Option<String>,

    /// Override the manifest's default organization
    #[arg(long)]
    pub org: Option<String>,

    /// Release title; {version} expands to the full version
    #[arg(long, default_value = "ROCm {version}")]
    pub message: String,

    /// Release notes body; {version} expands to the full version
    #[arg(long, default_value = "ROCm release {version}")]
    pub notes: String,

    /// GitHub token for API reads and tag/release creation
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Token for the bot identity opening back-port pull requests
    #[arg(long, env = "AUTOTAG_PR_TOKEN", hide_env_values = true)]
    pub pr_token: Option<String>,

    /// Bot account that pushes release branches and owns the PR head
    #[arg(long, default_value = "ROCmMathLibrariesBot")]
    pub bot_user: String,

    /// Create tags and releases without prompting
    #[arg(long, conflicts_with = "no_release")]
    pub yes_release: bool,

    /// Skip tag and release creation without prompting
    #[arg(long)]
    pub no_release: bool,

    /// Create back-port pull requests without prompting
    #[arg(long, conflicts_with = "no_pull")]
    pub yes_pull: bool,

    /// Skip back-port pull requests without prompting
    #[arg(long)]
    pub no_pull: bool,
}

impl ReleaseArgs {
    /// Pre-supplied answer for the tag + release prompt, if any
    pub fn release_assume(&self) -> Option<bool> {
        match (self.yes_release, self.no_release) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Pre-supplied answer for the back-port prompt, if any
    pub fn pull_assume(&self) -> Option<bool> {
        match (self.yes_pull, self.no_pull) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    autotag completions --shell bash > ~/.bash_completion.d/autotag\n\n  \
                  Generate zsh completions:\n    autotag completions --shell zsh > ~/.zfunc/_autotag")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
