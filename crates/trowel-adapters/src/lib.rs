//! Infrastructure adapters for Trowel.
//!
//! This crate implements the ports defined in `trowel-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod process;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{RecordingRunner, SystemRunner};
pub use template_store::InMemoryStore;
