//! Unified error handling for Trowel Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Trowel Core operations.
///
/// Validation findings are *not* errors; they travel inside a
/// [`ValidationResult`](crate::domain::ValidationResult). This type only
/// carries failures that abort an operation.
#[derive(Debug, Error, Clone)]
pub enum TrowelError {
    /// Errors from the domain layer (usage and rule violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl TrowelError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Trowel".into(),
                "Please report this issue at: https://github.com/cosecruz/trowel/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// `true` when the failure is a filesystem "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::FilesystemError { kind, .. })
                if *kind == std::io::ErrorKind::NotFound
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input: blank names, unknown kinds, existing targets.
    Validation,
    NotFound,
    Configuration,
    /// A child process (installer, version control) failed.
    External,
    Internal,
}

/// Convenient result type alias.
pub type TrowelResult<T> = Result<T, TrowelError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> TrowelResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> TrowelResult<T> {
        self.map_err(|e| TrowelError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
