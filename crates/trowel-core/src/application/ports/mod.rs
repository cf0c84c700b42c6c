//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `trowel-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Template lookup
//!   - `CommandRunner`: Child processes (package installer, version control)
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The CLI calls `ProjectService` directly)

pub mod output;

pub use output::{CommandRunner, FileStats, Filesystem, TemplateStore};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem, MockTemplateStore};
