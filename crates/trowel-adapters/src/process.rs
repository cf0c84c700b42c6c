//! Child-process adapters for the package installer and version control.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
    sync::{Arc, Mutex},
};

use tracing::{debug, instrument};
use trowel_core::{
    application::{ApplicationError, ports::CommandRunner},
    error::TrowelResult,
};

/// Runs programs with `std::process::Command`, waiting for each to exit.
///
/// Output is captured rather than inherited so that a spinner can own the
/// terminal; stderr ends up in the error when the program fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(program = %program, cwd = %cwd.display()))]
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> TrowelResult<()> {
        let command = command_line(program, args);
        debug!(%command, "Spawning");

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::ExternalCommandFailed {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = match stderr.trim() {
            "" => format!("exited with {}", output.status),
            detail => format!("exited with {}: {}", output.status, detail),
        };
        Err(ApplicationError::ExternalCommandFailed { command, reason }.into())
    }
}

/// One call seen by a [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// Test runner that records invocations instead of spawning anything.
///
/// Programs registered with [`failing`](Self::failing) return
/// `ExternalCommandFailed`; everything else succeeds.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<Invocation>>>,
    failing: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call to `program` fail.
    pub fn failing(mut self, program: impl Into<String>) -> Self {
        self.failing.push(program.into());
        self
    }

    /// Calls made so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> TrowelResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Invocation {
                program: program.to_string(),
                args: args.to_vec(),
                cwd: cwd.to_path_buf(),
            });
        }

        if self.failing.iter().any(|p| p == program) {
            return Err(ApplicationError::ExternalCommandFailed {
                command: command_line(program, args),
                reason: "simulated failure".into(),
            }
            .into());
        }
        Ok(())
    }
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
