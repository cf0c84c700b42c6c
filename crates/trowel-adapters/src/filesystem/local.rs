//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use trowel_core::{
    application::{
        ApplicationError,
        ports::{FileStats, Filesystem},
    },
    domain::FilePattern,
    error::{TrowelError, TrowelResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_dir(&self, path: &Path) -> TrowelResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> TrowelResult<()> {
        create_parent(path)?;
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> TrowelResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> TrowelResult<()> {
        create_parent(dest)?;
        std::fs::copy(src, dest)
            .map(|_| ())
            .map_err(|e| map_io_error(src, e, "copy file"))
    }

    fn read_dir(&self, path: &Path) -> TrowelResult<Vec<String>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory"))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn stats(&self, path: &Path) -> TrowelResult<FileStats> {
        let metadata = std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
        Ok(FileStats {
            is_dir: metadata.is_dir(),
            is_file: metadata.is_file(),
            size: metadata.len(),
        })
    }

    fn remove(&self, path: &Path) -> TrowelResult<()> {
        let metadata =
            std::fs::symlink_metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
        if metadata.is_dir() {
            std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
        } else {
            std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
        }
    }

    fn find_files(&self, root: &Path, pattern: &FilePattern) -> TrowelResult<Vec<PathBuf>> {
        let mut found = Vec::new();

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                map_io_error(&path, io::Error::from(e), "walk directory")
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if pattern.matches_name(&name) {
                trace!(path = %entry.path().display(), "Matched file");
                found.push(entry.into_path());
            }
        }

        found.sort();
        Ok(found)
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> TrowelResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata =
                std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
            let mut perms = metadata.permissions();
            let mode = perms.mode();
            perms.set_mode(if executable { mode | 0o111 } else { mode & !0o111 });
            std::fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(windows)]
        {
            // Windows doesn't have an executable bit
            let _ = (path, executable);
        }
        Ok(())
    }
}

fn create_parent(path: &Path) -> TrowelResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| map_io_error(parent, e, "create directory")),
        _ => Ok(()),
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> TrowelError {
    ApplicationError::filesystem(path, &e, operation).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_file_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_file(&dir.path().join("nope.txt"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn ensure_dir_fails_when_a_file_is_in_the_way() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let blocker = dir.path().join("src");
        fs.write_file(&blocker, "").unwrap();

        assert!(fs.ensure_dir(&blocker).is_err());
        assert!(fs.ensure_dir(&dir.path().join("ok/nested")).is_ok());
        assert!(fs.ensure_dir(&dir.path().join("ok/nested")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn set_permissions_toggles_the_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let script = dir.path().join("run.sh");
        fs.write_file(&script, "#!/bin/sh\n").unwrap();

        fs.set_permissions(&script, true).unwrap();
        let mode = std::fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);

        fs.set_permissions(&script, false).unwrap();
        let mode = std::fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0);
    }
}
