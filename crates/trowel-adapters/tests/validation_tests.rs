//! Validator behaviour over an in-memory project tree.

use std::path::Path;
use std::sync::Arc;

use trowel_adapters::MemoryFilesystem;
use trowel_core::{application::ValidationService, domain::FindingCode};

const ROOT: &str = "/project";

fn long_readme() -> String {
    let mut readme = String::from(
        "# Demo\n\n## Installation\nnpm install\n\n## Usage\nrun it\n\n## API\n...\n\n## Contributing\nPRs welcome\n",
    );
    readme.push_str(&"Lorem ipsum dolor sit amet. ".repeat(20));
    readme
}

/// A project that passes every check.
fn complete_project() -> MemoryFilesystem {
    MemoryFilesystem::new()
        .with_file(
            "/project/package.json",
            r#"{
  "name": "demo", "version": "1.0.0", "description": "Demo",
  "author": "Ada", "license": "MIT", "repository": "github:ada/demo",
  "keywords": ["demo"],
  "scripts": { "build": "tsc", "test": "vitest", "lint": "eslint src" }
}"#,
        )
        .with_file("/project/README.md", long_readme())
        .with_file("/project/LICENSE", "MIT")
        .with_file("/project/CONTRIBUTING.md", "Be nice")
        .with_file("/project/.gitignore", "node_modules/\n*.log\n.env\n")
        .with_file(
            "/project/tsconfig.json",
            r#"{"compilerOptions":{"strict":true,"noImplicitAny":true,
                "skipLibCheck":true,"forceConsistentCasingInFileNames":true}}"#,
        )
        .with_file("/project/.eslintrc.json", "{}")
        .with_file("/project/.prettierrc", "{}")
        .with_file("/project/vitest.config.ts", "export default {}")
        .with_file("/project/src/index.ts", "")
        .with_file("/project/tests/index.test.ts", "")
        .with_file("/project/.github/workflows/ci.yml", "on: push")
}

fn validator(fs: &MemoryFilesystem) -> ValidationService {
    ValidationService::new(Arc::new(fs.clone()))
}

#[test]
fn complete_project_is_clean() {
    let fs = complete_project();
    let result = validator(&fs).validate_project(Path::new(ROOT));

    assert!(result.valid);
    assert!(result.is_clean(), "unexpected findings: {result:?}");
}

#[test]
fn is_valid_project_only_needs_a_manifest() {
    let empty = MemoryFilesystem::new().with_dir(ROOT);
    assert!(!validator(&empty).is_valid_project(Path::new(ROOT)));

    let bare = MemoryFilesystem::new().with_file("/project/package.json", "not json at all");
    assert!(validator(&bare).is_valid_project(Path::new(ROOT)));
}

#[test]
fn empty_manifest_without_readme_reports_errors() {
    let fs = MemoryFilesystem::new().with_file("/project/package.json", "{}");
    let result = validator(&fs).validate_project(Path::new(ROOT));

    assert!(!result.valid);
    assert!(result.errors.len() >= 2);
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.message == "Required file missing: README.md")
    );
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.message == "Required package.json field missing: name")
    );
}

#[test]
fn validation_is_deterministic() {
    let fs = MemoryFilesystem::new()
        .with_file("/project/package.json", r#"{"name":"x"}"#)
        .with_file("/project/README.md", "short");
    let svc = validator(&fs);

    let first = svc.validate_project(Path::new(ROOT));
    let second = svc.validate_project(Path::new(ROOT));
    assert_eq!(first, second);
}

#[test]
fn invalid_manifest_is_a_single_error_finding() {
    let fs = complete_project().with_file("/project/package.json", "{ broken");
    let result = validator(&fs).validate_project(Path::new(ROOT));

    let codes: Vec<_> = result.errors.iter().map(|e| e.code).collect();
    assert_eq!(codes, [FindingCode::InvalidPackageJson]);
    assert!(result.errors[0].message.starts_with("Invalid package.json: "));
    assert_eq!(result.errors[0].file.as_deref(), Some("package.json"));
}

#[test]
fn findings_follow_check_order() {
    let fs = MemoryFilesystem::new()
        .with_file("/project/package.json", r#"{"name":"x","version":"1","description":"d"}"#)
        .with_file("/project/README.md", long_readme());
    let result = validator(&fs).validate_project(Path::new(ROOT));

    assert!(result.valid);
    let codes: Vec<_> = result.warnings.iter().map(|w| w.code).collect();
    let first_of = |code: FindingCode| codes.iter().position(|c| *c == code).unwrap();

    assert!(
        first_of(FindingCode::MissingRecommendedFile)
            < first_of(FindingCode::MissingRecommendedPackageField)
    );
    assert!(
        first_of(FindingCode::MissingTypescriptConfig) < first_of(FindingCode::MissingEslintConfig)
    );
    assert!(first_of(FindingCode::MissingTests) < first_of(FindingCode::MissingCiCd));
    assert!(first_of(FindingCode::MissingCiCd) < first_of(FindingCode::MissingGitignore));
    assert!(result.passes(false));
    assert!(!result.passes(true));
}

#[test]
fn test_directory_without_runner_config_is_flagged() {
    let bare = MemoryFilesystem::new()
        .with_file("/project/package.json", "{}")
        .with_dir("/project/__tests__");
    let warnings = validator(&bare).validate_project(Path::new(ROOT)).warnings;
    assert!(warnings.iter().any(|w| w.code == FindingCode::MissingTestConfig));
    assert!(!warnings.iter().any(|w| w.code == FindingCode::MissingTests));
}

#[test]
fn empty_workflow_directory_and_partial_gitignore() {
    let fs = MemoryFilesystem::new()
        .with_file("/project/package.json", "{}")
        .with_dir("/project/.github/workflows")
        .with_file("/project/.gitignore", "node_modules/\n");
    let warnings = validator(&fs).validate_project(Path::new(ROOT)).warnings;

    assert!(warnings.iter().any(|w| w.code == FindingCode::EmptyCiCd));
    let ignore: Vec<_> = warnings
        .iter()
        .filter(|w| w.code == FindingCode::IncompleteGitignore)
        .map(|w| w.message.as_str())
        .collect();
    assert_eq!(
        ignore,
        ["gitignore should include: *.log", "gitignore should include: .env"]
    );
}
