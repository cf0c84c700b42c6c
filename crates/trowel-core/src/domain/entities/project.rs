use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

/// Identity of a target project: its root plus a structure snapshot that is
/// computed at most once, on first use.
///
/// Built per call and dropped afterwards; nothing is cached across calls.
#[derive(Debug)]
pub struct ProjectDescriptor {
    root: PathBuf,
    snapshot: OnceCell<StructureSnapshot>,
}

impl ProjectDescriptor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            snapshot: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The snapshot, computing it with `analyze` if this is the first access.
    pub fn snapshot_with<F>(&self, analyze: F) -> &StructureSnapshot
    where
        F: FnOnce(&Path) -> StructureSnapshot,
    {
        self.snapshot.get_or_init(|| analyze(&self.root))
    }

    /// The snapshot, if it has been computed.
    pub fn cached_snapshot(&self) -> Option<&StructureSnapshot> {
        self.snapshot.get()
    }

    pub fn into_snapshot(self) -> Option<StructureSnapshot> {
        self.snapshot.into_inner()
    }
}

/// What the root directory of a project contains, one level deep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructureSnapshot {
    pub directories: Vec<String>,
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Value>,
    pub has_typescript: bool,
    pub has_tests: bool,
    pub has_linting: bool,
    pub has_ci: bool,
    pub has_docker: bool,
}

impl StructureSnapshot {
    /// Derive the capability flags from the root listing.
    pub fn from_entries(
        directories: Vec<String>,
        files: Vec<String>,
        manifest: Option<Value>,
    ) -> Self {
        let has_dir = |name: &str| directories.iter().any(|d| d == name);
        let has_file = |name: &str| files.iter().any(|f| f == name);

        let has_typescript = has_file("tsconfig.json");
        let has_tests = has_dir("tests")
            || has_dir("test")
            || files
                .iter()
                .any(|f| f.contains(".test.") || f.contains(".spec."));
        let has_linting = files.iter().any(|f| f.starts_with(".eslintrc"));
        let has_ci = has_dir(".github");
        let has_docker = has_file("Dockerfile") || has_file("docker-compose.yml");

        Self {
            directories,
            files,
            manifest,
            has_typescript,
            has_tests,
            has_linting,
            has_ci,
            has_docker,
        }
    }

    pub fn has_manifest(&self) -> bool {
        self.files.iter().any(|f| f == "package.json")
    }
}
