//! Validation Service - rule-based project validator.
//!
//! Runs the checks in [`checks`](super::checks) in a fixed order and folds
//! their findings into one [`ValidationResult`].

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    application::ports::Filesystem,
    domain::{
        FindingCode, ProjectDescriptor, StructureSnapshot, ValidationFinding, ValidationResult,
    },
};

use super::checks::CHECKS;

const MANIFEST: &str = "package.json";

pub struct ValidationService {
    filesystem: Arc<dyn Filesystem>,
}

impl ValidationService {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// A directory is a project when it holds a `package.json`.
    pub fn is_valid_project(&self, path: &Path) -> bool {
        self.filesystem.exists(&path.join(MANIFEST))
    }

    /// Run every check against `path`.
    ///
    /// Findings keep check order, then the order within each check. If a
    /// check fails outright, a `VALIDATION_ERROR` is appended and the rest
    /// are skipped.
    #[instrument(skip_all, name = "validator", fields(path = %path.display()))]
    pub fn validate_project(&self, path: &Path) -> ValidationResult {
        let fs = self.filesystem.as_ref();
        let mut findings = Vec::new();

        for (name, check) in CHECKS {
            match check(fs, path) {
                Ok(found) => {
                    debug!(check = name, findings = found.len(), "Check completed");
                    findings.extend(found);
                }
                Err(e) => {
                    warn!(check = name, error = %e, "Check aborted validation");
                    findings.push(ValidationFinding::error(
                        FindingCode::ValidationError,
                        format!("Validation failed: {e}"),
                        None,
                    ));
                    break;
                }
            }
        }

        let result = ValidationResult::from_findings(findings);
        debug!(
            valid = result.valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Validation finished"
        );
        result
    }

    /// One-level listing of the project root plus its parsed manifest.
    ///
    /// Listing failures yield an empty snapshot; an unreadable manifest is
    /// left out. Both are logged, neither is fatal.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn analyze_project(&self, path: &Path) -> StructureSnapshot {
        let names = match self.filesystem.read_dir(path) {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "Could not list project root");
                return StructureSnapshot::default();
            }
        };

        let mut directories = Vec::new();
        let mut files = Vec::new();
        for name in names {
            match self.filesystem.stats(&path.join(&name)) {
                Ok(stats) if stats.is_dir => directories.push(name),
                Ok(_) => files.push(name),
                Err(e) => debug!(entry = %name, error = %e, "Skipping unreadable entry"),
            }
        }

        StructureSnapshot::from_entries(directories, files, self.read_manifest(path))
    }

    /// A descriptor for `path` with its snapshot filled in by this service.
    pub fn describe(&self, path: &Path) -> ProjectDescriptor {
        let descriptor = ProjectDescriptor::new(path);
        descriptor.snapshot_with(|root| self.analyze_project(root));
        descriptor
    }

    fn read_manifest(&self, root: &Path) -> Option<Value> {
        let path = root.join(MANIFEST);
        if !self.filesystem.exists(&path) {
            return None;
        }

        let parsed = self
            .filesystem
            .read_file(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()));

        match parsed {
            Ok(value) => Some(value),
            Err(reason) => {
                warn!(%reason, "Ignoring unreadable package.json");
                None
            }
        }
    }
}
