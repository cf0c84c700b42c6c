//! Scaffold requests and the per-kind blueprints they expand to.

use std::path::{Path, PathBuf};

use crate::domain::{
    error::DomainError,
    naming::{to_kebab_case, to_pascal_case},
    value_objects::ScaffoldKind,
};

use super::output_tree::OutputTree;

/// A validated request to scaffold one item into a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub kind: ScaffoldKind,
    pub name: String,
    pub path: Option<PathBuf>,
}

impl ScaffoldRequest {
    /// Check presence of both arguments, then parse the kind.
    ///
    /// Nothing touches the filesystem before this succeeds.
    pub fn parse(kind: &str, name: &str, path: Option<PathBuf>) -> Result<Self, DomainError> {
        if kind.trim().is_empty() {
            return Err(DomainError::MissingArgument { argument: "type" });
        }
        if name.trim().is_empty() {
            return Err(DomainError::MissingArgument { argument: "name" });
        }

        Ok(Self {
            kind: kind.parse()?,
            name: name.to_string(),
            path,
        })
    }

    /// Expand into the directory and files to write under `root`.
    pub fn blueprint(&self, root: &Path) -> OutputTree {
        let name = self.name.as_str();
        let pascal = to_pascal_case(name);
        let tree = OutputTree::new(root);

        match self.kind {
            ScaffoldKind::Component => tree.with_directory("src/components").with_file(
                format!("src/components/{pascal}.ts"),
                component_source(name, &pascal),
            ),
            ScaffoldKind::Service => tree.with_directory("src/services").with_file(
                format!("src/services/{pascal}Service.ts"),
                service_source(name, &pascal),
            ),
            ScaffoldKind::Module => {
                let dir = format!("src/modules/{name}");
                tree.with_directory(dir.clone())
                    .with_file(format!("{dir}/index.ts"), module_index_source(name, &pascal))
                    .with_file(format!("{dir}/types.ts"), module_types_source(name, &pascal))
                    .with_file(
                        format!("{dir}/{pascal}.ts"),
                        module_class_source(name, &pascal),
                    )
            }
            ScaffoldKind::Test => tree
                .with_directory("tests")
                .with_file(format!("tests/{name}.test.ts"), test_source(name, &pascal)),
            ScaffoldKind::Config => tree.with_directory("config").with_file(
                format!("config/{name}.config.ts"),
                config_source(name, &pascal),
            ),
        }
    }
}

// ── sources ──────────────────────────────────────────────────────────────────

fn component_source(name: &str, pascal: &str) -> String {
    let kebab = to_kebab_case(name);
    format!(
        r#"/**
 * {name} Component
 * Generated by Trowel
 */

export interface {pascal}Props {{
  // Define component props here
}}

export class {pascal} {{
  private props: {pascal}Props;

  constructor(props: {pascal}Props) {{
    this.props = props;
  }}

  render(): string {{
    return `<div class="{kebab}">{name} Component</div>`;
  }}
}}

export default {pascal};
"#
    )
}

fn service_source(name: &str, pascal: &str) -> String {
    format!(
        r#"/**
 * {name} Service
 * Generated by Trowel
 */

export class {pascal}Service {{
  /**
   * Initialize the service
   */
  async initialize(): Promise<void> {{
    // Initialization logic here
  }}

  /**
   * Service method example
   */
  async process(data: unknown): Promise<unknown> {{
    // Processing logic here
    return data;
  }}

  /**
   * Cleanup resources
   */
  async cleanup(): Promise<void> {{
    // Cleanup logic here
  }}
}}

export default {pascal}Service;
"#
    )
}

fn module_index_source(name: &str, pascal: &str) -> String {
    format!(
        r#"/**
 * {name} Module
 * Generated by Trowel
 */

export * from './types.js';
export * from './{pascal}.js';
"#
    )
}

fn module_types_source(name: &str, pascal: &str) -> String {
    format!(
        r#"/**
 * {name} Module Types
 */

export interface {pascal}Config {{
  // Module configuration
}}

export interface {pascal}Options {{
  // Module options
}}
"#
    )
}

fn module_class_source(name: &str, pascal: &str) -> String {
    format!(
        r#"import type {{ {pascal}Config, {pascal}Options }} from './types.js';

/**
 * {name} Module
 */
export class {pascal} {{
  private config: {pascal}Config;

  constructor(config: {pascal}Config) {{
    this.config = config;
  }}

  /**
   * Execute module functionality
   */
  async execute(options: {pascal}Options): Promise<void> {{
    // Module logic here
  }}
}}

export default {pascal};
"#
    )
}

fn test_source(name: &str, pascal: &str) -> String {
    format!(
        r#"import {{ describe, it, expect, beforeEach, afterEach }} from 'vitest';

// Import the module you want to test
// import {{ {pascal} }} from '../src/{name}.js';

describe('{pascal}', () => {{
  beforeEach(() => {{
    // Setup before each test
  }});

  afterEach(() => {{
    // Cleanup after each test
  }});

  describe('functionality', () => {{
    it('should work correctly', () => {{
      expect(true).toBe(true);
    }});

    it('should handle edge cases', () => {{
      expect(true).toBe(true);
    }});
  }});
}});
"#
    )
}

fn config_source(name: &str, pascal: &str) -> String {
    format!(
        r#"/**
 * {name} Configuration
 * Generated by Trowel
 */

export interface {pascal}Config {{
  enabled: boolean;
  options: Record<string, unknown>;
}}

export const default{pascal}Config: {pascal}Config = {{
  enabled: true,
  options: {{}},
}};

export function load{pascal}Config(): {pascal}Config {{
  // Load configuration from environment, files, etc.
  return default{pascal}Config;
}}

export default load{pascal}Config;
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_paths(tree: &OutputTree) -> Vec<String> {
        tree.files().map(|f| f.path.display().to_string()).collect()
    }

    #[test]
    fn parse_rejects_blank_arguments() {
        assert_eq!(
            ScaffoldRequest::parse("  ", "x", None).unwrap_err(),
            DomainError::MissingArgument { argument: "type" }
        );
        assert_eq!(
            ScaffoldRequest::parse("service", "", None).unwrap_err(),
            DomainError::MissingArgument { argument: "name" }
        );
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        let err = ScaffoldRequest::parse("widget", "Header", None).unwrap_err();
        assert!(err.to_string().contains("widget"));
    }

    #[test]
    fn service_blueprint_names_the_class() {
        let req = ScaffoldRequest::parse("service", "billing", None).unwrap();
        let tree = req.blueprint(Path::new("/p"));
        assert_eq!(file_paths(&tree), ["src/services/BillingService.ts"]);

        let content = &tree.files().next().unwrap().content;
        assert!(content.contains("export class BillingService {"));
        for method in ["initialize()", "process(", "cleanup()"] {
            assert!(content.contains(method), "missing {method}");
        }
    }

    #[test]
    fn module_blueprint_writes_three_files() {
        let req = ScaffoldRequest::parse("module", "auth-flow", None).unwrap();
        let tree = req.blueprint(Path::new("/p"));
        assert_eq!(
            file_paths(&tree),
            [
                "src/modules/auth-flow/index.ts",
                "src/modules/auth-flow/types.ts",
                "src/modules/auth-flow/AuthFlow.ts",
            ]
        );
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn component_uses_kebab_css_class() {
        let req = ScaffoldRequest::parse("component", "UserCard", None).unwrap();
        let tree = req.blueprint(Path::new("/p"));
        let file = tree.files().next().unwrap();
        assert_eq!(file.path, PathBuf::from("src/components/UserCard.ts"));
        assert!(file.content.contains(r#"class="user-card""#));
    }

    #[test]
    fn test_and_config_keep_the_raw_name_in_file_names() {
        let test = ScaffoldRequest::parse("test", "cart", None).unwrap();
        assert_eq!(
            file_paths(&test.blueprint(Path::new("/p"))),
            ["tests/cart.test.ts"]
        );

        let config = ScaffoldRequest::parse("config", "database", None).unwrap();
        let tree = config.blueprint(Path::new("/p"));
        assert_eq!(file_paths(&tree), ["config/database.config.ts"]);
        assert!(tree.files().next().unwrap().content.contains("loadDatabaseConfig"));
    }
}
