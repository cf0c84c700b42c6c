// ============================================================================
// domain/error.rs - usage and rule violations
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Usage Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Missing required argument: {argument}")]
    MissingArgument { argument: &'static str },

    #[error("Unknown scaffolding type: {kind}")]
    UnknownScaffoldKind { kind: String },

    // ========================================================================
    // Template Definition Errors
    // ========================================================================
    #[error("Invalid dependency declaration '{declaration}': {reason}")]
    InvalidDependency { declaration: String, reason: String },

    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Duplicate path in output: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Provide a non-empty project name".into(),
                "Example: trowel create my-project".into(),
            ],
            Self::MissingArgument { argument } => vec![
                format!("The '{}' argument is required", argument),
                "Use --help for usage information".into(),
            ],
            Self::UnknownScaffoldKind { kind } => {
                let mut out = vec![
                    format!("'{}' is not a scaffolding type", kind),
                    "Supported types:".into(),
                ];
                out.extend(
                    crate::domain::ScaffoldKind::ALL
                        .iter()
                        .map(|k| format!("  • {}", k)),
                );
                out.push("Example: trowel scaffold service billing".into());
                out
            }
            Self::InvalidDependency { .. } => vec![
                "Dependency declarations must look like name@version".into(),
                "Scoped packages are written as @scope/name@version".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::MissingArgument { .. }
            | Self::UnknownScaffoldKind { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }
}
