//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `trowel-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{FilePattern, TemplateDescription};
use crate::error::TrowelResult;

/// Metadata returned by [`Filesystem::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    pub is_dir: bool,
    pub is_file: bool,
    pub size: u64,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `trowel_adapters::filesystem::LocalFilesystem` (production)
/// - `trowel_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Every fallible operation fails with
/// `ApplicationError::FilesystemError`, carrying the path and the OS reason.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Whether something exists at `path`. Access errors count as "no".
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all missing ancestors.
    ///
    /// Succeeds if the directory already exists; fails if a file is in the way.
    fn ensure_dir(&self, path: &Path) -> TrowelResult<()>;

    /// Write UTF-8 content, creating parent directories and overwriting.
    fn write_file(&self, path: &Path, content: &str) -> TrowelResult<()>;

    /// Read a UTF-8 file. Fails with a `NotFound` kind if absent.
    fn read_file(&self, path: &Path) -> TrowelResult<String>;

    /// Copy bytes from `src` to `dest`, creating parent directories.
    fn copy_file(&self, src: &Path, dest: &Path) -> TrowelResult<()>;

    /// Names of the immediate children of a directory, sorted.
    fn read_dir(&self, path: &Path) -> TrowelResult<Vec<String>>;

    fn stats(&self, path: &Path) -> TrowelResult<FileStats>;

    /// Remove a file, or a directory recursively.
    fn remove(&self, path: &Path) -> TrowelResult<()>;

    /// Depth-first search under `root` for files whose base name matches
    /// `pattern`. Results are sorted by path.
    fn find_files(&self, root: &Path, pattern: &FilePattern) -> TrowelResult<Vec<PathBuf>>;

    /// Set or clear the executable bit.
    fn set_permissions(&self, path: &Path, executable: bool) -> TrowelResult<()>;
}

/// Port for template lookup.
///
/// Implemented by:
/// - `trowel_adapters::template_store::InMemoryStore` (built-in templates)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Template registered under `name`, if any.
    fn find(&self, name: &str) -> TrowelResult<Option<TemplateDescription>>;

    /// Registered template names, sorted.
    fn list(&self) -> TrowelResult<Vec<String>>;
}

/// Port for running external programs.
///
/// Implemented by:
/// - `trowel_adapters::process::SystemRunner` (spawns real processes)
/// - `trowel_adapters::process::RecordingRunner` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `cwd` and wait for it.
    ///
    /// A spawn failure or a non-zero exit is
    /// `ApplicationError::ExternalCommandFailed`.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> TrowelResult<()>;
}
