//! Project Service - main application orchestrator.
//!
//! Entry point for the four user-facing operations:
//! 1. `create`: normalise the name, generate files, install, init git
//! 2. `update`: merge the default template into an existing manifest
//! 3. `validate`: run the rule-based validator
//! 4. `scaffold`: add one component, service, module, test or config
//!
//! The CLI calls this service directly; it owns no I/O of its own and goes
//! through the injected ports for everything.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem, TemplateStore},
    },
    domain::{
        CreateOptions, DomainError, GenerationContext, ScaffoldRequest, ValidationResult,
        naming::sanitize_project_name,
    },
    error::TrowelResult,
};

use super::{TemplateService, UpdatePlan, ValidationService};

/// A post-generation step that failed without failing `create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub step: String,
    pub message: String,
    /// Commands the user can run to finish the step by hand.
    pub recovery: Vec<String>,
}

/// Result of a successful `create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutcome {
    pub project_name: String,
    pub original_name: String,
    pub project_path: PathBuf,
    pub files: Vec<PathBuf>,
    pub installed: bool,
    pub git_initialized: bool,
    pub advisories: Vec<Advisory>,
}

impl CreateOutcome {
    /// Whether normalisation changed the requested name.
    pub fn renamed(&self) -> bool {
        self.project_name != self.original_name
    }
}

pub struct ProjectService {
    filesystem: Arc<dyn Filesystem>,
    templates: TemplateService,
    validator: ValidationService,
    runner: Box<dyn CommandRunner>,
}

impl ProjectService {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        store: Box<dyn TemplateStore>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            templates: TemplateService::new(store, Arc::clone(&filesystem)),
            validator: ValidationService::new(Arc::clone(&filesystem)),
            filesystem,
            runner,
        }
    }

    pub fn templates(&self) -> &TemplateService {
        &self.templates
    }

    pub fn validator(&self) -> &ValidationService {
        &self.validator
    }

    /// Create a new project directory named after `name`.
    #[instrument(skip_all, name = "create", fields(name = %name, template = %options.template))]
    pub fn create(&self, name: &str, options: &CreateOptions) -> TrowelResult<CreateOutcome> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidProjectName {
                name: name.to_string(),
                reason: "Project name cannot be empty".into(),
            }
            .into());
        }

        let project_name = sanitize_project_name(name);
        if project_name != name {
            info!(from = name, to = %project_name, "Project name normalised");
        }

        let project_path = options.parent_dir.join(&project_name);
        let existing = self.filesystem.exists(&project_path);
        if existing && !options.force {
            return Err(ApplicationError::ProjectExists { path: project_path }.into());
        }

        let template = self.templates.load_template(&options.template)?;
        let mut ctx = GenerationContext::new(
            project_name.clone(),
            project_path.clone(),
            template,
            options.clone(),
        );
        if existing {
            warn!(path = %project_path.display(), "Overwriting existing directory");
            ctx = ctx.with_snapshot(self.validator.analyze_project(&project_path));
        }

        let files = self.templates.generate_project(&ctx)?;

        let mut advisories = Vec::new();
        let installed = options.install
            && self.run_step(
                "install",
                "npm",
                &["install"],
                &project_path,
                &project_name,
                &mut advisories,
            );
        let git_initialized = options.git
            && self.run_step(
                "git",
                "git",
                &["init"],
                &project_path,
                &project_name,
                &mut advisories,
            );

        info!(files = files.len(), "Project created");
        Ok(CreateOutcome {
            project_name,
            original_name: name.to_string(),
            project_path,
            files,
            installed,
            git_initialized,
            advisories,
        })
    }

    /// Merge the default template into the manifest at `path`.
    #[instrument(skip_all, name = "update", fields(path = %path.display()))]
    pub fn update(&self, path: &Path) -> TrowelResult<UpdatePlan> {
        self.require_project(path)?;
        self.templates.update_project(path)
    }

    /// Same guard as [`update`](Self::update), but nothing is written.
    pub fn plan_update(&self, path: &Path) -> TrowelResult<UpdatePlan> {
        self.require_project(path)?;
        self.templates.plan_update(path)
    }

    #[instrument(skip_all, name = "validate", fields(path = %path.display()))]
    pub fn validate(&self, path: &Path) -> ValidationResult {
        let result = self.validator.validate_project(path);

        for e in &result.errors {
            info!(code = %e.code, file = e.file.as_deref(), "{}", e.message);
        }
        for w in &result.warnings {
            debug!(code = %w.code, file = w.file.as_deref(), fixable = w.fixable, "{}", w.message);
        }

        result
    }

    /// Write one item of `kind` named `name` under `root`.
    ///
    /// Arguments are checked before the filesystem is touched.
    #[instrument(skip_all, name = "scaffold", fields(kind = %kind, name = %name))]
    pub fn scaffold(&self, kind: &str, name: &str, root: &Path) -> TrowelResult<Vec<PathBuf>> {
        let request = ScaffoldRequest::parse(kind, name, Some(root.to_path_buf()))?;
        self.templates.scaffold(&request)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn require_project(&self, path: &Path) -> TrowelResult<()> {
        if self.validator.is_valid_project(path) {
            Ok(())
        } else {
            Err(ApplicationError::NotAProject {
                path: path.to_path_buf(),
            }
            .into())
        }
    }

    /// Run one external step; a failure becomes an advisory.
    fn run_step(
        &self,
        step: &str,
        program: &str,
        args: &[&str],
        cwd: &Path,
        project_name: &str,
        advisories: &mut Vec<Advisory>,
    ) -> bool {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        match self.runner.run(program, &args, cwd) {
            Ok(()) => true,
            Err(e) => {
                warn!(step, error = %e, "External step failed");
                advisories.push(Advisory {
                    step: step.to_string(),
                    message: e.to_string(),
                    recovery: vec![
                        format!("cd {project_name}"),
                        format!("{program} {}", args.join(" ")),
                    ],
                });
                false
            }
        }
    }
}
