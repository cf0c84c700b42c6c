//! Yes/no confirmations.
//!
//! Prompts only appear on an interactive terminal and only when the
//! `interactive` feature is compiled in. Everywhere else the default answer
//! is taken, so scripts and CI never block on stdin.

use std::io::IsTerminal;

use crate::error::CliResult;

/// Ask `question`, returning `default` when no prompt can be shown.
pub fn confirm(question: &str, default: bool) -> CliResult<bool> {
    if !std::io::stdin().is_terminal() || !std::io::stderr().is_terminal() {
        tracing::debug!(question, default, "Not a terminal; using default answer");
        return Ok(default);
    }
    ask(question, default)
}

#[cfg(feature = "interactive")]
fn ask(question: &str, default: bool) -> CliResult<bool> {
    use dialoguer::Confirm;

    Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact()
        .map_err(|e| crate::error::CliError::PromptFailed {
            message: e.to_string(),
        })
}

#[cfg(not(feature = "interactive"))]
fn ask(_question: &str, default: bool) -> CliResult<bool> {
    Ok(default)
}
