//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use trowel_core::{
    application::{
        ApplicationError,
        ports::{FileStats, Filesystem},
    },
    domain::FilePattern,
    error::{TrowelError, TrowelResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can hand one clone to a service
/// and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Insert `path` and every ancestor as directories.
    fn mkdir_all(&mut self, path: &Path) -> TrowelResult<()> {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            if self.is_file(ancestor) {
                return Err(fs_error(ancestor, io::ErrorKind::AlreadyExists, "create directory"));
            }
        }
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                self.directories.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn put_file(&mut self, path: &Path, content: String) -> TrowelResult<()> {
        if self.is_dir(path) {
            return Err(fs_error(path, io::ErrorKind::IsADirectory, "write file"));
        }
        if let Some(parent) = path.parent() {
            self.mkdir_all(parent)?;
        }
        self.files.insert(path.to_path_buf(), content);
        Ok(())
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parents (builder style).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            // seeding only fails on a path conflict; tests see it on read
            let _ = inner.put_file(path.as_ref(), content.into());
        }
        self
    }

    /// Seed a directory and its ancestors (builder style).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let _ = inner.mkdir_all(path.as_ref());
        }
        self
    }

    /// A file's content, if it exists (testing helper).
    pub fn file_content(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: impl AsRef<Path>) -> bool {
        self.inner
            .read()
            .map(|inner| inner.executables.contains(path.as_ref()))
            .unwrap_or(false)
    }

    /// All files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> TrowelResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> TrowelResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.is_file(path) || inner.is_dir(path))
            .unwrap_or(false)
    }

    fn ensure_dir(&self, path: &Path) -> TrowelResult<()> {
        self.write()?.mkdir_all(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> TrowelResult<()> {
        self.write()?.put_file(path, content.to_string())
    }

    fn read_file(&self, path: &Path) -> TrowelResult<String> {
        let inner = self.read()?;
        inner.files.get(path).cloned().ok_or_else(|| {
            let kind = if inner.is_dir(path) {
                io::ErrorKind::IsADirectory
            } else {
                io::ErrorKind::NotFound
            };
            fs_error(path, kind, "read file")
        })
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> TrowelResult<()> {
        let mut inner = self.write()?;
        let content = inner
            .files
            .get(src)
            .cloned()
            .ok_or_else(|| fs_error(src, io::ErrorKind::NotFound, "copy file"))?;
        inner.put_file(dest, content)
    }

    fn read_dir(&self, path: &Path) -> TrowelResult<Vec<String>> {
        let inner = self.read()?;
        if !inner.is_dir(path) {
            let kind = if inner.is_file(path) {
                io::ErrorKind::NotADirectory
            } else {
                io::ErrorKind::NotFound
            };
            return Err(fs_error(path, kind, "read directory"));
        }

        let children = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect::<BTreeSet<_>>();
        Ok(children.into_iter().collect())
    }

    fn stats(&self, path: &Path) -> TrowelResult<FileStats> {
        let inner = self.read()?;
        if let Some(content) = inner.files.get(path) {
            return Ok(FileStats {
                is_dir: false,
                is_file: true,
                size: content.len() as u64,
            });
        }
        if inner.is_dir(path) {
            return Ok(FileStats {
                is_dir: true,
                is_file: false,
                size: 0,
            });
        }
        Err(fs_error(path, io::ErrorKind::NotFound, "get metadata"))
    }

    fn remove(&self, path: &Path) -> TrowelResult<()> {
        let mut inner = self.write()?;
        if inner.files.remove(path).is_some() {
            inner.executables.remove(path);
            return Ok(());
        }
        if !inner.is_dir(path) {
            return Err(fs_error(path, io::ErrorKind::NotFound, "remove"));
        }

        inner.files.retain(|p, _| !p.starts_with(path));
        inner.executables.retain(|p| !p.starts_with(path));
        inner.directories.retain(|p| !p.starts_with(path));
        Ok(())
    }

    fn find_files(&self, root: &Path, pattern: &FilePattern) -> TrowelResult<Vec<PathBuf>> {
        let inner = self.read()?;
        if !inner.is_dir(root) {
            return Err(fs_error(root, io::ErrorKind::NotFound, "walk directory"));
        }

        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .filter(|p| {
                p.file_name()
                    .is_some_and(|n| pattern.matches_name(&n.to_string_lossy()))
            })
            .cloned()
            .collect())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> TrowelResult<()> {
        let mut inner = self.write()?;
        if !inner.is_file(path) {
            return Err(fs_error(path, io::ErrorKind::NotFound, "set permissions"));
        }

        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }
        Ok(())
    }
}

fn fs_error(path: &Path, kind: io::ErrorKind, operation: &str) -> TrowelError {
    ApplicationError::filesystem(path, &io::Error::from(kind), operation).into()
}

fn poisoned() -> TrowelError {
    TrowelError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}
