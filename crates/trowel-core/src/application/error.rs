//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Template lookup failed (no entry and no fallback).
    #[error("Template resolution failed for '{name}': {reason}")]
    TemplateResolution { name: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError {
        path: PathBuf,
        kind: io::ErrorKind,
        reason: String,
    },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// The directory holds no package manifest.
    #[error("Not a valid project directory: {path}")]
    NotAProject { path: PathBuf },

    /// `package.json` is required but absent.
    #[error("package.json not found at {path} - not a valid Node.js project")]
    ManifestNotFound { path: PathBuf },

    /// `package.json` exists but cannot be merged into.
    #[error("Invalid package.json at {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    /// A child process exited unsuccessfully or could not be spawned.
    #[error("External command failed: {command}: {reason}")]
    ExternalCommandFailed { command: String, reason: String },
}

impl ApplicationError {
    /// Build a [`Self::FilesystemError`] from an I/O failure.
    pub fn filesystem(path: impl Into<PathBuf>, err: &io::Error, operation: &str) -> Self {
        Self::FilesystemError {
            path: path.into(),
            kind: err.kind(),
            reason: format!("Failed to {}: {}", operation, err),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateResolution { reason, .. } => vec![
                format!("Resolution failed: {}", reason),
                "Omit --template to use the built-in 'default' template".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to write into it anyway (files are overwritten)".into(),
                "Choose a different project name".into(),
            ],
            Self::NotAProject { .. } | Self::ManifestNotFound { .. } => vec![
                "Make sure you are in a directory with package.json".into(),
                "Or point at one with --path <dir>".into(),
            ],
            Self::ManifestInvalid { .. } => vec![
                "Fix the JSON syntax in package.json".into(),
                "Run 'trowel validate' for a full report".into(),
            ],
            Self::ExternalCommandFailed { command, .. } => vec![
                format!("Ensure '{}' is installed and in your PATH", command),
                "Check the command output above for details".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateResolution { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { kind, .. } if *kind == io::ErrorKind::NotFound => {
                ErrorCategory::NotFound
            }
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } | Self::ManifestInvalid { .. } => {
                ErrorCategory::Validation
            }
            Self::NotAProject { .. } | Self::ManifestNotFound { .. } => ErrorCategory::NotFound,
            Self::ExternalCommandFailed { .. } => ErrorCategory::External,
        }
    }
}
