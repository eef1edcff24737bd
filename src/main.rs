//! autotag - ROCm release tagging tool
//!
//! Resolves, for each library bundled into a ROCm release, the exact
//! source commit behind a ROCm version, and drives the release protocol
//! against GitHub: annotated tags, releases and back-port pull requests.

use clap::Parser;

mod bundle;
mod cli;
mod commands;
mod error;
mod git;
mod github;
mod manifest;
mod progress;
mod release;
mod resolver;
mod tags;
mod temp;
#[cfg(test)]
mod test_fixtures;
mod ui;
mod version;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let api_url = cli.api_url;

    let result = match cli.command {
        Commands::Bundle(args) => commands::bundle::run(&api_url, args),
        Commands::Release(args) => commands::release::run(&api_url, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
