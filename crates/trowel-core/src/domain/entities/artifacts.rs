//! Documents written by `create`: `package.json`, `tsconfig.json`, `src/index.ts`.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::{error::DomainError, naming::to_pascal_case, value_objects::DependencySpec};

use super::template::GenerationContext;

const DEFAULT_DESCRIPTION: &str = "Generated by Trowel";

/// The generated `package.json`, serialised with keys in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub main: String,
    pub types: String,
    pub scripts: IndexMap<String, String>,
    pub keywords: Vec<String>,
    pub author: String,
    pub license: String,
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
}

impl PackageManifest {
    pub fn from_context(ctx: &GenerationContext) -> Result<Self, DomainError> {
        let template = &ctx.template;

        Ok(Self {
            name: ctx.project_name.clone(),
            version: "1.0.0".into(),
            description: ctx
                .options
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.into()),
            main: "dist/index.js".into(),
            types: "dist/index.d.ts".into(),
            scripts: template.scripts.clone(),
            keywords: vec!["typescript".into(), "node".into(), "trowel".into()],
            author: ctx.options.author.clone().unwrap_or_default(),
            license: "MIT".into(),
            dependencies: dependency_map(template.dependency_specs()?),
            dev_dependencies: dependency_map(template.dev_dependency_specs()?),
        })
    }
}

fn dependency_map(specs: Vec<DependencySpec>) -> IndexMap<String, String> {
    specs.into_iter().map(|d| (d.name, d.version)).collect()
}

/// The generated `tsconfig.json`.
pub fn tsconfig() -> Value {
    json!({
        "compilerOptions": {
            "target": "ES2022",
            "module": "NodeNext",
            "moduleResolution": "NodeNext",
            "lib": ["ES2022"],
            "outDir": "./dist",
            "rootDir": "./src",
            "strict": true,
            "esModuleInterop": true,
            "skipLibCheck": true,
            "forceConsistentCasingInFileNames": true,
            "declaration": true,
            "declarationMap": true,
            "sourceMap": true,
            "removeComments": false
        },
        "include": ["src/**/*"],
        "exclude": ["node_modules", "dist", "tests"]
    })
}

/// The generated entry point: one class named after the project.
pub fn entry_point(project_name: &str) -> String {
    let class = to_pascal_case(project_name);
    format!(
        r#"/**
 * {project_name}
 * Generated by Trowel
 */

export class {class} {{
  private name: string;

  constructor(name = '{project_name}') {{
    this.name = name;
  }}

  /**
   * Get the application name
   */
  getName(): string {{
    return this.name;
  }}

  /**
   * Say hello
   */
  hello(): string {{
    return `Hello from ${{this.name}}!`;
  }}
}}

export default {class};
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateOptions, TemplateDescription};

    fn context() -> GenerationContext {
        let template = TemplateDescription::new("default", "test")
            .with_dependency("chalk@^5.3.0")
            .with_dev_dependency("@types/node@^20.10.0")
            .with_script("build", "tsc");
        GenerationContext::new("my-app", "/work/my-app", template, CreateOptions::default())
    }

    #[test]
    fn manifest_serialises_in_declared_key_order() {
        let manifest = PackageManifest::from_context(&context()).unwrap();
        let json = serde_json::to_value(&manifest).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            [
                "name",
                "version",
                "description",
                "main",
                "types",
                "scripts",
                "keywords",
                "author",
                "license",
                "dependencies",
                "devDependencies"
            ]
        );
        assert_eq!(json["devDependencies"]["@types/node"], "^20.10.0");
        assert_eq!(json["description"], DEFAULT_DESCRIPTION);
    }

    #[test]
    fn manifest_uses_provided_description_and_author() {
        let mut ctx = context();
        ctx.options.description = Some("Billing API".into());
        ctx.options.author = Some("Ada".into());
        let manifest = PackageManifest::from_context(&ctx).unwrap();
        assert_eq!(manifest.description, "Billing API");
        assert_eq!(manifest.author, "Ada");
    }

    #[test]
    fn tsconfig_enables_recommended_flags() {
        let cfg = tsconfig();
        for flag in ["strict", "skipLibCheck", "forceConsistentCasingInFileNames"] {
            assert_eq!(cfg["compilerOptions"][flag], true, "{flag}");
        }
    }

    #[test]
    fn entry_point_class_is_pascal_case() {
        let src = entry_point("my-project--");
        assert!(src.contains("export class MyProject {"));
        assert!(src.contains("constructor(name = 'my-project--')"));
        assert!(src.contains("`Hello from ${this.name}!`"));
    }
}
