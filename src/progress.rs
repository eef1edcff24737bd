//! Progress display for bundle resolution

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while tag listings and repository handles are fetched
pub fn resolving_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
