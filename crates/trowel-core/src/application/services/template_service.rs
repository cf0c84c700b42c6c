//! Template Service - template lookup, generation and manifest updates.
//!
//! Responsible for:
//! - Resolving a template by name, falling back to the default one
//! - Turning a [`GenerationContext`] into files on disk
//! - Merging template scripts and dev dependencies into an existing manifest
//! - Writing scaffold blueprints
//!
//! Everything is written through the [`Filesystem`] port, in order, with
//! overwrite semantics. Nothing is rolled back on failure.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateStore},
    },
    domain::{
        DEFAULT_TEMPLATE, DependencySpec, FileEncoding, GenerationContext, OutputEntry,
        OutputTree, PackageManifest, ScaffoldRequest, TemplateDescription, entry_point, tsconfig,
    },
    error::{Context, TrowelError, TrowelResult},
};

use super::checks::is_truthy;

const MANIFEST: &str = "package.json";

/// Directories every generated project starts with.
const PROJECT_DIRS: [&str; 5] = ["src", "tests", "docs", "examples", ".github/workflows"];

// ── update plan ──────────────────────────────────────────────────────────────

/// One script the update adds or overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptChange {
    pub name: String,
    /// Value before the update, if the script existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    pub value: String,
}

/// What `update` changes in a project's `package.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlan {
    pub manifest_path: PathBuf,
    pub script_changes: Vec<ScriptChange>,
    pub added_dev_dependencies: Vec<DependencySpec>,
    /// The manifest with the changes applied.
    #[serde(skip)]
    pub manifest: Value,
}

impl UpdatePlan {
    pub fn is_empty(&self) -> bool {
        self.script_changes.is_empty() && self.added_dev_dependencies.is_empty()
    }
}

// ── service ──────────────────────────────────────────────────────────────────

pub struct TemplateService {
    store: Box<dyn TemplateStore>,
    filesystem: Arc<dyn Filesystem>,
}

impl TemplateService {
    pub fn new(store: Box<dyn TemplateStore>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self { store, filesystem }
    }

    /// Look `name` up, falling back to the default template.
    #[instrument(skip(self))]
    pub fn load_template(&self, name: &str) -> TrowelResult<TemplateDescription> {
        if let Some(template) = self.store.find(name)? {
            return Ok(template);
        }

        debug!(requested = name, "Unknown template, using default");
        self.store.find(DEFAULT_TEMPLATE)?.ok_or_else(|| {
            ApplicationError::TemplateResolution {
                name: name.to_string(),
                reason: "no such template and no default template is registered".into(),
            }
            .into()
        })
    }

    /// Write the project described by `ctx` under its root.
    ///
    /// Returns the paths of the files written, in write order.
    #[instrument(
        skip_all,
        name = "generator",
        fields(project = %ctx.project_name, template = %ctx.template.name)
    )]
    pub fn generate_project(&self, ctx: &GenerationContext) -> TrowelResult<Vec<PathBuf>> {
        let manifest = PackageManifest::from_context(ctx)?;
        let render = ctx.render_context();

        let mut tree = OutputTree::new(ctx.root());
        for dir in PROJECT_DIRS {
            tree.add_directory(dir);
        }
        tree.add_file(MANIFEST, to_pretty_json(&manifest)?);
        tree.add_file("tsconfig.json", to_pretty_json(&tsconfig())?);
        tree.add_file("src/index.ts", entry_point(&ctx.project_name));

        for file in &ctx.template.files {
            let content = match file.encoding {
                FileEncoding::Utf8 => render.render(&file.content),
                FileEncoding::Binary => file.content.clone(),
            };
            if file.executable {
                tree.add_executable(&file.path, content);
            } else {
                tree.add_file(&file.path, content);
            }
        }

        let written = self.materialize(&tree)?;
        info!(files = written.len(), "Project files generated");
        Ok(written)
    }

    /// Compute the manifest changes `update_project` would make.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn plan_update(&self, path: &Path) -> TrowelResult<UpdatePlan> {
        let manifest_path = path.join(MANIFEST);
        if !self.filesystem.exists(&manifest_path) {
            return Err(ApplicationError::ManifestNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let invalid = |reason: String| -> TrowelError {
            ApplicationError::ManifestInvalid {
                path: manifest_path.clone(),
                reason,
            }
            .into()
        };

        let text = self.filesystem.read_file(&manifest_path)?;
        let mut manifest: Value =
            serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))?;
        let root = manifest
            .as_object_mut()
            .ok_or_else(|| invalid("top-level value is not an object".into()))?;

        let template = self.load_template(DEFAULT_TEMPLATE)?;
        let script_changes = merge_scripts(root, &template);
        let added_dev_dependencies = merge_dev_dependencies(root, &template)?;

        debug!(
            scripts = script_changes.len(),
            dev_dependencies = added_dev_dependencies.len(),
            "Update planned"
        );

        Ok(UpdatePlan {
            manifest_path,
            script_changes,
            added_dev_dependencies,
            manifest,
        })
    }

    /// Apply the default template's scripts and dev dependencies to the
    /// project's `package.json`. Existing keys keep their position.
    ///
    /// The manifest is always written back pretty-printed, even when the
    /// plan is empty.
    #[instrument(skip_all, name = "updater", fields(path = %path.display()))]
    pub fn update_project(&self, path: &Path) -> TrowelResult<UpdatePlan> {
        let plan = self.plan_update(path)?;

        self.filesystem
            .write_file(&plan.manifest_path, &to_pretty_json(&plan.manifest)?)?;
        if plan.is_empty() {
            debug!("package.json already up to date");
        }
        info!(
            scripts = plan.script_changes.len(),
            dev_dependencies = plan.added_dev_dependencies.len(),
            "package.json updated"
        );
        Ok(plan)
    }

    /// Write the blueprint for `request` under its path (default `.`).
    #[instrument(skip_all, name = "scaffolder", fields(kind = %request.kind, name = %request.name))]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> TrowelResult<Vec<PathBuf>> {
        let root = request.path.as_deref().unwrap_or(Path::new("."));
        let written = self.materialize(&request.blueprint(root))?;
        info!(files = written.len(), "Scaffold written");
        Ok(written)
    }

    /// Create the tree's root, then each entry in order.
    ///
    /// Returns the full paths of the files written.
    pub fn materialize(&self, tree: &OutputTree) -> TrowelResult<Vec<PathBuf>> {
        tree.validate()?;

        let root = tree.root();
        self.filesystem.ensure_dir(root)?;

        let mut written = Vec::new();
        for entry in tree.entries() {
            let path = root.join(entry.path());
            match entry {
                OutputEntry::Directory(_) => self.filesystem.ensure_dir(&path)?,
                OutputEntry::File(file) => {
                    self.filesystem.write_file(&path, &file.content)?;
                    if file.executable {
                        self.filesystem.set_permissions(&path, true)?;
                    }
                    debug!(path = %path.display(), "Wrote file");
                    written.push(path);
                }
            }
        }

        Ok(written)
    }
}

// ── helpers ──────────────────────────────────────────────────────────────────

/// Two-space indented JSON with a trailing newline.
fn to_pretty_json<T: Serialize>(value: &T) -> TrowelResult<String> {
    let mut out = serde_json::to_string_pretty(value).context("Failed to serialise JSON")?;
    out.push('\n');
    Ok(out)
}

/// Copy of the object under `key`; anything else counts as empty.
fn object_at(root: &Map<String, Value>, key: &str) -> Map<String, Value> {
    match root.get(key) {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

/// Template scripts win on collision; unchanged scripts are not reported.
fn merge_scripts(root: &mut Map<String, Value>, template: &TemplateDescription) -> Vec<ScriptChange> {
    let mut scripts = object_at(root, "scripts");
    let mut changes = Vec::new();

    for (name, value) in &template.scripts {
        let current = scripts.get(name);
        if current.and_then(Value::as_str) == Some(value.as_str()) {
            continue;
        }

        changes.push(ScriptChange {
            name: name.clone(),
            previous: current.map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
            value: value.clone(),
        });
        scripts.insert(name.clone(), Value::String(value.clone()));
    }

    // re-inserting an existing key keeps its position
    root.insert("scripts".into(), Value::Object(scripts));
    changes
}

/// Add every declared dev dependency the manifest lacks, at its declared version.
fn merge_dev_dependencies(
    root: &mut Map<String, Value>,
    template: &TemplateDescription,
) -> TrowelResult<Vec<DependencySpec>> {
    let specs = template.dev_dependency_specs()?;
    let mut dev = object_at(root, "devDependencies");
    let mut added = Vec::new();

    for spec in specs {
        if is_truthy(dev.get(&spec.name)) {
            continue;
        }
        dev.insert(spec.name.clone(), Value::String(spec.version.clone()));
        added.push(spec);
    }

    root.insert("devDependencies".into(), Value::Object(dev));
    Ok(added)
}
