//! Spinner around external commands.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use trowel_core::{application::CommandRunner, error::TrowelResult};

/// Wraps another [`CommandRunner`] and shows a spinner while it runs.
///
/// The spinner is hidden when `enabled` is false (quiet mode, non-human
/// output) and indicatif hides it by itself when stderr is not a terminal.
pub struct SpinnerRunner<R> {
    inner: R,
    enabled: bool,
}

impl<R: CommandRunner> SpinnerRunner<R> {
    pub fn new(inner: R, enabled: bool) -> Self {
        Self { inner, enabled }
    }

    fn spinner(&self, message: String) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }
}

impl<R: CommandRunner> CommandRunner for SpinnerRunner<R> {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> TrowelResult<()> {
        let command = format!("{program} {}", args.join(" "));
        let spinner = self.spinner(format!("Running {command}..."));

        let result = self.inner.run(program, args, cwd);
        match &result {
            Ok(()) => spinner.finish_with_message(format!("{command} done")),
            Err(_) => spinner.finish_and_clear(),
        }
        result
    }
}
