use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// Directories and files ready to be written under one root.
///
/// This is the output of generation and scaffolding. It contains no logic
/// beyond bookkeeping; the template service materialises it through the
/// filesystem port in insertion order.
#[derive(Debug, Clone)]
pub struct OutputTree {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<OutputEntry>,
}

impl OutputTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: String) {
        self.entries.push(OutputEntry::File(FileToWrite {
            path: path.into(),
            content,
            executable: false,
        }));
    }

    pub fn add_executable(&mut self, path: impl Into<PathBuf>, content: String) {
        self.entries.push(OutputEntry::File(FileToWrite {
            path: path.into(),
            content,
            executable: true,
        }));
    }

    pub fn add_directory(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(OutputEntry::Directory(path.into()));
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: String) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_directory(path);
        self
    }

    /// Reject duplicate or absolute entry paths.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();

            if path.is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: path.display().to_string(),
                });
            }
            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.display().to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            OutputEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().filter_map(|e| match e {
            OutputEntry::Directory(d) => Some(d.as_path()),
            _ => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum OutputEntry {
    File(FileToWrite),
    Directory(PathBuf),
}

impl OutputEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => d,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    /// Relative to the tree root.
    pub path: PathBuf,
    pub content: String,
    pub executable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_counts_entries() {
        let tree = OutputTree::new("/tmp/app")
            .with_directory("src")
            .with_file("src/index.ts", "export {}".into());

        assert_eq!(tree.entry_count(), 2);
        assert_eq!(tree.files().count(), 1);
        assert_eq!(tree.directories().count(), 1);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn duplicates_are_rejected() {
        let tree = OutputTree::new("/tmp/app")
            .with_file("a.ts", String::new())
            .with_file("a.ts", String::new());
        assert!(matches!(
            tree.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn absolute_entries_are_rejected() {
        let tree = OutputTree::new("/tmp/app").with_file("/etc/passwd", String::new());
        assert!(matches!(
            tree.validate(),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }
}
