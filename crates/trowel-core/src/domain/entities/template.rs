//! Template descriptions and the values bound to them during generation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  TemplateDescription (immutable recipe)                     │
//! │    name, description, declared files, dependency lists,     │
//! │    ordered script map                                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  GenerationContext (one per `create`)                       │
//! │    project name + absolute path + template + options        │
//! │    + structure snapshot of the target                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RenderContext (value object)                               │
//! │    `{{VARIABLE}}` substitution for declared UTF-8 files     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::{
    error::DomainError,
    naming::{to_kebab_case, to_pascal_case},
    value_objects::{DependencySpec, FileEncoding},
};

use super::project::StructureSnapshot;

/// Name of the template used when none is requested or the request is unknown.
pub const DEFAULT_TEMPLATE: &str = "default";

// ============================================================================
// TemplateDescription
// ============================================================================

/// A file a template adds on top of the generated manifest and configs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateFile {
    /// Path relative to the project root.
    pub path: String,
    pub content: String,
    pub encoding: FileEncoding,
    pub executable: bool,
}

impl TemplateFile {
    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            encoding: FileEncoding::Utf8,
            executable: false,
        }
    }

    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }

    pub fn binary(mut self) -> Self {
        self.encoding = FileEncoding::Binary;
        self
    }
}

/// Static recipe for generating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDescription {
    pub name: String,
    pub description: String,
    pub files: Vec<TemplateFile>,
    /// Runtime dependency declarations, `name@version`.
    pub dependencies: Vec<String>,
    /// Development dependency declarations, `name@version`.
    pub dev_dependencies: Vec<String>,
    /// Script name to command line, in declaration order.
    pub scripts: IndexMap<String, String>,
}

impl TemplateDescription {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            files: Vec::new(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            scripts: IndexMap::new(),
        }
    }

    pub fn with_dependency(mut self, declaration: impl Into<String>) -> Self {
        self.dependencies.push(declaration.into());
        self
    }

    pub fn with_dev_dependency(mut self, declaration: impl Into<String>) -> Self {
        self.dev_dependencies.push(declaration.into());
        self
    }

    pub fn with_script(mut self, name: impl Into<String>, command: impl Into<String>) -> Self {
        self.scripts.insert(name.into(), command.into());
        self
    }

    pub fn with_file(mut self, file: TemplateFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn dependency_specs(&self) -> Result<Vec<DependencySpec>, DomainError> {
        self.dependencies
            .iter()
            .map(|d| DependencySpec::parse(d))
            .collect()
    }

    pub fn dev_dependency_specs(&self) -> Result<Vec<DependencySpec>, DomainError> {
        self.dev_dependencies
            .iter()
            .map(|d| DependencySpec::parse(d))
            .collect()
    }
}

// ============================================================================
// Options and contexts
// ============================================================================

/// Options accepted by `create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    pub template: String,
    /// Directory the project directory is created in.
    pub parent_dir: PathBuf,
    pub force: bool,
    pub install: bool,
    pub git: bool,
    pub description: Option<String>,
    pub author: Option<String>,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            parent_dir: PathBuf::from("."),
            force: false,
            install: true,
            git: true,
            description: None,
            author: None,
        }
    }
}

/// Everything the generator needs for one `create` call.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub project_name: String,
    pub project_path: PathBuf,
    pub template: TemplateDescription,
    pub options: CreateOptions,
    pub snapshot: StructureSnapshot,
}

impl GenerationContext {
    pub fn new(
        project_name: impl Into<String>,
        project_path: impl Into<PathBuf>,
        template: TemplateDescription,
        options: CreateOptions,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            project_path: project_path.into(),
            template,
            options,
            snapshot: StructureSnapshot::default(),
        }
    }

    pub fn with_snapshot(mut self, snapshot: StructureSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn root(&self) -> &Path {
        &self.project_path
    }

    pub fn render_context(&self) -> RenderContext {
        let ctx = RenderContext::new(&self.project_name);
        match &self.options.author {
            Some(author) => ctx.with_variable("AUTHOR", author),
            None => ctx,
        }
    }
}

// ============================================================================
// RenderContext
// ============================================================================

/// Variable substitution for declared template files.
///
/// # Built-in variables
///
/// - `NAME`: project name as normalised
/// - `NAME_PASCAL`: PascalCase form (class names)
/// - `NAME_KEBAB`: kebab-case form
#[derive(Debug, Clone)]
pub struct RenderContext {
    project_name: String,
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(project_name: impl Into<String>) -> Self {
        let name = project_name.into();
        let mut vars = HashMap::new();

        vars.insert("NAME".to_string(), name.clone());
        vars.insert("NAME_PASCAL".to_string(), to_pascal_case(&name));
        vars.insert("NAME_KEBAB".to_string(), to_kebab_case(&name));

        Self {
            project_name: name,
            variables: vars,
        }
    }

    /// Add a custom variable, consuming self and returning a new context.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Replace every `{{VARIABLE}}` placeholder with its value.
    ///
    /// Unknown placeholders are left as they are.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_context_standard_variables() {
        let ctx = RenderContext::new("my-app");
        assert_eq!(ctx.get("NAME"), Some("my-app"));
        assert_eq!(ctx.get("NAME_PASCAL"), Some("MyApp"));
        assert_eq!(ctx.get("NAME_KEBAB"), Some("my-app"));
    }

    #[test]
    fn render_context_renders_placeholders() {
        let ctx = RenderContext::new("my-app").with_variable("AUTHOR", "Ada");
        assert_eq!(
            ctx.render("class {{NAME_PASCAL}} by {{AUTHOR}} {{UNKNOWN}}"),
            "class MyApp by Ada {{UNKNOWN}}"
        );
    }

    #[test]
    fn scripts_keep_declaration_order() {
        let t = TemplateDescription::new("t", "d")
            .with_script("dev", "tsx watch")
            .with_script("build", "tsc")
            .with_script("clean", "rimraf dist");
        let keys: Vec<_> = t.scripts.keys().map(String::as_str).collect();
        assert_eq!(keys, ["dev", "build", "clean"]);
    }

    #[test]
    fn dependency_specs_reject_bad_declarations() {
        let t = TemplateDescription::new("t", "d").with_dev_dependency("typescript");
        assert!(t.dev_dependency_specs().is_err());
    }

    #[test]
    fn create_options_default_to_the_default_template() {
        let opts = CreateOptions::default();
        assert_eq!(opts.template, DEFAULT_TEMPLATE);
        assert!(opts.install && opts.git && !opts.force);
    }
}
