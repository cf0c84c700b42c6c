//! Trowel Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Trowel
//! TypeScript/Node project tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           trowel-cli (CLI)              │
//! │   create · update · validate · scaffold │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  ProjectService (orchestrator)          │
//! │  TemplateService · ValidationService    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  Filesystem · TemplateStore ·           │
//! │  CommandRunner                          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    trowel-adapters (Infrastructure)     │
//! │  LocalFilesystem, InMemoryStore,        │
//! │  SystemRunner                           │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  findings, templates, scaffold          │
//! │  blueprints, naming                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::{path::Path, sync::Arc};
//! use trowel_core::prelude::*;
//!
//! let service = ProjectService::new(
//!     Arc::new(filesystem), // impl Filesystem
//!     Box::new(store),      // impl TemplateStore
//!     Box::new(runner),     // impl CommandRunner
//! );
//!
//! let outcome = service.create("my-app", &CreateOptions::default())?;
//! let report = service.validate(&outcome.project_path);
//! assert!(report.valid);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Advisory, CreateOutcome, ProjectService, TemplateService, UpdatePlan, ValidationService,
        ports::{CommandRunner, FileStats, Filesystem, TemplateStore},
    };
    pub use crate::domain::{
        CreateOptions, DEFAULT_TEMPLATE, DependencySpec, FilePattern, FindingCode, ScaffoldKind,
        TemplateDescription, TemplateFile, ValidationError, ValidationResult, ValidationWarning,
    };
    pub use crate::error::{TrowelError, TrowelResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
