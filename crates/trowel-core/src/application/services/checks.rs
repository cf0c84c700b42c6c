//! The eight project checks run by [`ValidationService`](super::ValidationService).
//!
//! Each check reads what it needs through the filesystem port and returns
//! its own findings, in the order its required items are declared. Parse
//! and read failures on the documents a check inspects are findings. An
//! `Err` means something unexpected broke (a directory walk, a listing).

use std::path::Path;

use serde_json::Value;

use crate::{
    application::ports::Filesystem,
    domain::{FilePattern, FindingCode, ValidationFinding},
    error::TrowelResult,
};

pub(super) type Findings = TrowelResult<Vec<ValidationFinding>>;

/// Signature shared by every check.
pub(super) type Check = fn(&dyn Filesystem, &Path) -> Findings;

/// All checks, in run order.
pub(super) const CHECKS: &[(&str, Check)] = &[
    ("basic-structure", basic_structure),
    ("package-json", package_json),
    ("typescript", typescript),
    ("linting", linting),
    ("testing", testing),
    ("ci-cd", ci_cd),
    ("security", security),
    ("documentation", documentation),
];

const REQUIRED_FILES: [&str; 2] = ["package.json", "README.md"];
const RECOMMENDED_FILES: [&str; 3] = ["LICENSE", ".gitignore", "CONTRIBUTING.md"];
const RECOMMENDED_DIRS: [&str; 2] = ["src", "tests"];

const REQUIRED_FIELDS: [&str; 3] = ["name", "version", "description"];
const RECOMMENDED_FIELDS: [&str; 4] = ["author", "license", "repository", "keywords"];
const RECOMMENDED_SCRIPTS: [&str; 3] = ["build", "test", "lint"];

const RECOMMENDED_COMPILER_FLAGS: [&str; 4] = [
    "strict",
    "noImplicitAny",
    "skipLibCheck",
    "forceConsistentCasingInFileNames",
];

const ESLINT_FILES: [&str; 4] = [
    ".eslintrc.js",
    ".eslintrc.json",
    ".eslintrc.yml",
    ".eslintrc.yaml",
];
const PRETTIER_FILES: [&str; 4] = [
    ".prettierrc",
    ".prettierrc.js",
    ".prettierrc.json",
    ".prettierrc.yml",
];

const TEST_DIRS: [&str; 3] = ["tests", "test", "__tests__"];
const TEST_CONFIGS: [&str; 3] = ["vitest.config.ts", "jest.config.js", "jest.config.ts"];

const WORKFLOWS_DIR: &str = ".github/workflows";
const GITIGNORE_PATTERNS: [&str; 3] = ["node_modules/", "*.log", ".env"];
const README_SECTIONS: [&str; 4] = ["installation", "usage", "api", "contributing"];
const MIN_README_CHARS: usize = 500;

// ── 1. basic structure ───────────────────────────────────────────────────────

fn basic_structure(fs: &dyn Filesystem, root: &Path) -> Findings {
    let mut out = Vec::new();

    for file in REQUIRED_FILES {
        if !fs.exists(&root.join(file)) {
            out.push(ValidationFinding::error(
                FindingCode::MissingRequiredFile,
                format!("Required file missing: {file}"),
                Some(file),
            ));
        }
    }

    for file in RECOMMENDED_FILES {
        if !fs.exists(&root.join(file)) {
            out.push(ValidationFinding::warning(
                FindingCode::MissingRecommendedFile,
                format!("Recommended file missing: {file}"),
                Some(file),
            ));
        }
    }

    for dir in RECOMMENDED_DIRS {
        if !fs.exists(&root.join(dir)) {
            out.push(ValidationFinding::warning(
                FindingCode::MissingRecommendedDir,
                format!("Recommended directory missing: {dir}"),
                Some(dir),
            ));
        }
    }

    Ok(out)
}

// ── 2. package.json ──────────────────────────────────────────────────────────

fn package_json(fs: &dyn Filesystem, root: &Path) -> Findings {
    const FILE: &str = "package.json";
    let path = root.join(FILE);

    // absence is reported by the structure check
    if !fs.exists(&path) {
        return Ok(Vec::new());
    }

    let manifest = match read_json(fs, &path) {
        Ok(value) => value,
        Err(reason) => {
            return Ok(vec![ValidationFinding::error(
                FindingCode::InvalidPackageJson,
                format!("Invalid package.json: {reason}"),
                Some(FILE),
            )]);
        }
    };

    let mut out = Vec::new();

    for field in REQUIRED_FIELDS {
        if !is_truthy(manifest.get(field)) {
            out.push(ValidationFinding::error(
                FindingCode::MissingPackageField,
                format!("Required package.json field missing: {field}"),
                Some(FILE),
            ));
        }
    }

    for field in RECOMMENDED_FIELDS {
        if !is_truthy(manifest.get(field)) {
            out.push(ValidationFinding::warning(
                FindingCode::MissingRecommendedPackageField,
                format!("Recommended package.json field missing: {field}"),
                Some(FILE),
            ));
        }
    }

    let scripts = manifest.get("scripts");
    for script in RECOMMENDED_SCRIPTS {
        if !is_truthy(scripts.and_then(|s| s.get(script))) {
            out.push(ValidationFinding::warning(
                FindingCode::MissingRecommendedScript,
                format!("Recommended npm script missing: {script}"),
                Some(FILE),
            ));
        }
    }

    Ok(out)
}

// ── 3. tsconfig.json ─────────────────────────────────────────────────────────

fn typescript(fs: &dyn Filesystem, root: &Path) -> Findings {
    const FILE: &str = "tsconfig.json";
    let path = root.join(FILE);

    if !fs.exists(&path) {
        return Ok(vec![ValidationFinding::warning(
            FindingCode::MissingTypescriptConfig,
            "TypeScript configuration missing (tsconfig.json)",
            Some(FILE),
        )]);
    }

    let tsconfig = match read_json(fs, &path) {
        Ok(value) => value,
        Err(reason) => {
            return Ok(vec![ValidationFinding::error(
                FindingCode::InvalidTypescriptConfig,
                format!("Invalid tsconfig.json: {reason}"),
                Some(FILE),
            )]);
        }
    };

    let options = tsconfig.get("compilerOptions");
    Ok(RECOMMENDED_COMPILER_FLAGS
        .iter()
        .filter(|flag| options.and_then(|o| o.get(**flag)) != Some(&Value::Bool(true)))
        .map(|flag| {
            ValidationFinding::warning(
                FindingCode::SuboptimalTypescriptConfig,
                format!("Recommended TypeScript option: {flag} should be true"),
                Some(FILE),
            )
        })
        .collect())
}

// ── 4. lint / format ─────────────────────────────────────────────────────────

fn linting(fs: &dyn Filesystem, root: &Path) -> Findings {
    let mut out = Vec::new();

    if !any_exists(fs, root, &ESLINT_FILES) {
        out.push(ValidationFinding::warning(
            FindingCode::MissingEslintConfig,
            "ESLint configuration missing",
            None,
        ));
    }
    if !any_exists(fs, root, &PRETTIER_FILES) {
        out.push(ValidationFinding::warning(
            FindingCode::MissingPrettierConfig,
            "Prettier configuration missing",
            None,
        ));
    }

    Ok(out)
}

// ── 5. testing ───────────────────────────────────────────────────────────────

fn testing(fs: &dyn Filesystem, root: &Path) -> Findings {
    let pattern = FilePattern::test_files()?;
    let has_tests =
        !fs.find_files(root, &pattern)?.is_empty() || any_exists(fs, root, &TEST_DIRS);

    if !has_tests {
        return Ok(vec![ValidationFinding::warning(
            FindingCode::MissingTests,
            "No test files or test directory found",
            None,
        )]);
    }

    if !any_exists(fs, root, &TEST_CONFIGS) {
        return Ok(vec![ValidationFinding::warning(
            FindingCode::MissingTestConfig,
            "Test configuration missing (consider vitest.config.ts or jest.config.js)",
            None,
        )]);
    }

    Ok(Vec::new())
}

// ── 6. ci ────────────────────────────────────────────────────────────────────

fn ci_cd(fs: &dyn Filesystem, root: &Path) -> Findings {
    let workflows = root.join(WORKFLOWS_DIR);

    if !fs.exists(&workflows) {
        return Ok(vec![ValidationFinding::warning(
            FindingCode::MissingCiCd,
            "CI/CD configuration missing (.github/workflows)",
            None,
        )]);
    }

    if fs.read_dir(&workflows)?.is_empty() {
        return Ok(vec![ValidationFinding::warning(
            FindingCode::EmptyCiCd,
            "CI/CD workflows directory is empty",
            None,
        )]);
    }

    Ok(Vec::new())
}

// ── 7. .gitignore ────────────────────────────────────────────────────────────

fn security(fs: &dyn Filesystem, root: &Path) -> Findings {
    const FILE: &str = ".gitignore";
    let path = root.join(FILE);

    if !fs.exists(&path) {
        return Ok(vec![ValidationFinding::warning(
            FindingCode::MissingGitignore,
            ".gitignore file missing",
            None,
        )]);
    }

    let content = match fs.read_file(&path) {
        Ok(content) => content,
        Err(e) => {
            return Ok(vec![ValidationFinding::error(
                FindingCode::InvalidGitignore,
                format!("Failed to read .gitignore: {e}"),
                Some(FILE),
            )]);
        }
    };

    Ok(GITIGNORE_PATTERNS
        .iter()
        .filter(|pattern| !content.contains(**pattern))
        .map(|pattern| {
            ValidationFinding::warning(
                FindingCode::IncompleteGitignore,
                format!("gitignore should include: {pattern}"),
                Some(FILE),
            )
        })
        .collect())
}

// ── 8. README.md ─────────────────────────────────────────────────────────────

fn documentation(fs: &dyn Filesystem, root: &Path) -> Findings {
    const FILE: &str = "README.md";
    let path = root.join(FILE);

    // absence is reported by the structure check
    if !fs.exists(&path) {
        return Ok(Vec::new());
    }

    let content = match fs.read_file(&path) {
        Ok(content) => content,
        Err(e) => {
            return Ok(vec![ValidationFinding::error(
                FindingCode::InvalidReadme,
                format!("Failed to read README.md: {e}"),
                Some(FILE),
            )]);
        }
    };

    let lowered = content.to_lowercase();
    let mut out: Vec<_> = README_SECTIONS
        .iter()
        .filter(|section| !lowered.contains(**section))
        .map(|section| {
            ValidationFinding::warning(
                FindingCode::IncompleteReadme,
                format!("README.md should include {section} section"),
                Some(FILE),
            )
        })
        .collect();

    if content.chars().count() < MIN_README_CHARS {
        out.push(ValidationFinding::advisory(
            FindingCode::ShortReadme,
            "README.md appears to be too short and may lack important information",
            Some(FILE),
        ));
    }

    Ok(out)
}

// ── helpers ──────────────────────────────────────────────────────────────────

/// Read and parse a JSON document; the error is the human-readable reason.
fn read_json(fs: &dyn Filesystem, path: &Path) -> Result<Value, String> {
    let text = fs.read_file(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

fn any_exists(fs: &dyn Filesystem, root: &Path, names: &[&str]) -> bool {
    names.iter().any(|name| fs.exists(&root.join(name)))
}

/// JavaScript truthiness: absent, `null`, `false`, `0` and `""` are falsy.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use serde_json::json;

    #[test]
    fn truthiness_matches_javascript() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(is_truthy(Some(&json!("x"))));
        assert!(is_truthy(Some(&json!(1))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!({}))));
    }

    #[test]
    fn checks_run_in_declared_order() {
        let names: Vec<_> = CHECKS.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "basic-structure",
                "package-json",
                "typescript",
                "linting",
                "testing",
                "ci-cd",
                "security",
                "documentation"
            ]
        );
    }

    #[test]
    fn manifest_with_falsy_fields_reports_each_one() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_file().returning(|_| {
            Ok(json!({ "name": "", "version": "1.0.0", "description": null, "author": 0,
                       "license": "MIT", "repository": {}, "keywords": [],
                       "scripts": { "build": "tsc", "test": "" } })
            .to_string())
        });

        let findings = package_json(&fs, Path::new("/p")).unwrap();
        let messages: Vec<_> = findings.iter().map(|f| f.message().to_string()).collect();
        assert_eq!(
            messages,
            [
                "Required package.json field missing: name",
                "Required package.json field missing: description",
                "Recommended package.json field missing: author",
                "Recommended npm script missing: test",
                "Recommended npm script missing: lint",
            ]
        );
    }

    #[test]
    fn unparsable_tsconfig_is_an_error_finding() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_file()
            .returning(|_| Ok("{ // comments are not JSON".to_string()));

        let findings = typescript(&fs, Path::new("/p")).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code(), FindingCode::InvalidTypescriptConfig);
        assert!(findings[0].is_error());
    }

    #[test]
    fn compiler_flags_must_be_exactly_true() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_file().returning(|_| {
            Ok(json!({ "compilerOptions": { "strict": true, "noImplicitAny": "true",
                                            "skipLibCheck": 1 } })
            .to_string())
        });

        let findings = typescript(&fs, Path::new("/p")).unwrap();
        let messages: Vec<_> = findings.iter().map(|f| f.message()).collect();
        assert_eq!(
            messages,
            [
                "Recommended TypeScript option: noImplicitAny should be true",
                "Recommended TypeScript option: skipLibCheck should be true",
                "Recommended TypeScript option: forceConsistentCasingInFileNames should be true",
            ]
        );
    }

    #[test]
    fn short_readme_is_not_fixable() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_file()
            .returning(|_| Ok("# App\n\n## Installation\n## Usage\n## API\n## Contributing\n".into()));

        let findings = documentation(&fs, Path::new("/p")).unwrap();
        assert_eq!(findings.len(), 1);
        match &findings[0] {
            ValidationFinding::Warning(w) => {
                assert_eq!(w.code, FindingCode::ShortReadme);
                assert!(!w.fixable);
            }
            other => panic!("unexpected finding: {other:?}"),
        }
    }

    #[test]
    fn gitignore_patterns_are_literal_substrings() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_file()
            .returning(|_| Ok("node_modules\n*.log\n.env.local\n".into()));

        let findings = security(&fs, Path::new("/p")).unwrap();
        let messages: Vec<_> = findings.iter().map(|f| f.message()).collect();
        assert_eq!(messages, ["gitignore should include: node_modules/"]);
    }

    #[test]
    fn empty_workflow_directory_is_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_dir().returning(|_| Ok(Vec::new()));

        let findings = ci_cd(&fs, Path::new("/p")).unwrap();
        assert_eq!(findings[0].code(), FindingCode::EmptyCiCd);
    }

    #[test]
    fn test_config_is_required_once_tests_exist() {
        let mut fs = MockFilesystem::new();
        fs.expect_find_files()
            .returning(|root, _| Ok(vec![root.join("src/app.test.ts")]));
        fs.expect_exists().return_const(false);

        let findings = testing(&fs, Path::new("/p")).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code(), FindingCode::MissingTestConfig);
    }
}
