//! Application layer for Trowel.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectService, TemplateService, ValidationService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Validation rules are
//! the one exception: each check is a plain function over the filesystem
//! port, kept next to the service that runs them.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    Advisory, CreateOutcome, ProjectService, ScriptChange, TemplateService, UpdatePlan,
    ValidationService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, FileStats, Filesystem, TemplateStore};

pub use error::ApplicationError;
