//! Core domain layer for Trowel.
//!
//! Pure values and rules: findings, template descriptions, scaffold
//! blueprints, naming transforms. Nothing in here performs I/O; the
//! application layer reaches the outside world through ports.
//!
//! - **No I/O**: filesystem and process access live behind `application::ports`
//! - **Immutable values**: findings and templates are never mutated once built
//! - **Deterministic**: the same inputs always produce the same outputs

pub mod entities;
pub mod error;
pub mod findings;
pub mod naming;
pub mod value_objects;

pub use entities::{
    artifacts::{PackageManifest, entry_point, tsconfig},
    output_tree::{FileToWrite, OutputEntry, OutputTree},
    project::{ProjectDescriptor, StructureSnapshot},
    scaffold::ScaffoldRequest,
    template::{
        CreateOptions, DEFAULT_TEMPLATE, GenerationContext, RenderContext, TemplateDescription,
        TemplateFile,
    },
};

pub use error::DomainError;

pub use findings::{
    FindingCode, Severity, ValidationError, ValidationFinding, ValidationResult,
    ValidationWarning,
};

pub use value_objects::{DependencySpec, FileEncoding, FilePattern, ScaffoldKind};
