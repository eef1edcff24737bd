//! Yes/no confirmation gate for side-effecting operations
//!
//! The answer may be pre-supplied (non-interactive runs, e.g. CI) or
//! queried interactively.

use inquire::Confirm;

use crate::error::{AutotagError, Result};

/// Ask a yes/no question, unless `assume` already answers it.
///
/// Side-effecting operations default to "no" when the user just presses
/// Enter.
pub fn confirm(question: &str, assume: Option<bool>) -> Result<bool> {
    if let Some(answer) = assume {
        return Ok(answer);
    }

    Confirm::new(question)
        .with_default(false)
        .with_help_message("Press 'y' to confirm, Enter to skip")
        .prompt()
        .map_err(|e| AutotagError::PromptFailed {
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presupplied_answer_skips_prompt() {
        assert!(confirm("irrelevant?", Some(true)).unwrap());
        assert!(!confirm("irrelevant?", Some(false)).unwrap());
    }
}
