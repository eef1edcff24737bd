//! Console presentation and confirmation prompts

pub mod display;
pub mod prompt;
