//! End-to-end flows through `ProjectService` with in-memory adapters.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use trowel_adapters::{InMemoryStore, MemoryFilesystem, RecordingRunner};
use trowel_core::{
    application::{ApplicationError, ProjectService, ports::Filesystem},
    domain::{CreateOptions, DomainError, FindingCode, TemplateDescription, TemplateFile},
    error::TrowelError,
};

struct Harness {
    fs: MemoryFilesystem,
    runner: RecordingRunner,
    service: ProjectService,
}

fn harness_with(fs: MemoryFilesystem, store: InMemoryStore, runner: RecordingRunner) -> Harness {
    let service = ProjectService::new(
        Arc::new(fs.clone()),
        Box::new(store),
        Box::new(runner.clone()),
    );
    Harness { fs, runner, service }
}

fn harness(fs: MemoryFilesystem) -> Harness {
    harness_with(
        fs,
        InMemoryStore::with_builtin().unwrap(),
        RecordingRunner::new(),
    )
}

fn options() -> CreateOptions {
    CreateOptions {
        parent_dir: PathBuf::from("/work"),
        ..CreateOptions::default()
    }
}

fn manifest(fs: &MemoryFilesystem, path: &str) -> Value {
    serde_json::from_str(&fs.file_content(path).unwrap()).unwrap()
}

#[test]
fn create_normalises_the_name_and_generates_the_project() {
    let h = harness(MemoryFilesystem::new());

    let outcome = h.service.create("My Project!!", &options()).unwrap();

    assert_eq!(outcome.project_name, "my-project--");
    assert_eq!(outcome.project_path, PathBuf::from("/work/my-project--"));
    assert!(outcome.renamed());
    assert!(outcome.installed && outcome.git_initialized);

    for dir in ["src", "tests", "docs", "examples", ".github/workflows"] {
        let path = Path::new("/work/my-project--").join(dir);
        assert!(h.fs.stats(&path).unwrap().is_dir, "missing {dir}");
    }

    let pkg = manifest(&h.fs, "/work/my-project--/package.json");
    assert_eq!(pkg["name"], "my-project--");
    assert_eq!(pkg["version"], "1.0.0");
    assert_eq!(pkg["scripts"]["test"], "vitest");
    assert_eq!(pkg["dependencies"]["chalk"], "^5.3.0");
    assert_eq!(pkg["devDependencies"]["typescript"], "^5.3.0");

    let index = h.fs.file_content("/work/my-project--/src/index.ts").unwrap();
    assert!(index.contains("export class MyProject {"));

    let invocations = h.runner.invocations();
    let calls: Vec<_> = invocations
        .iter()
        .map(|i| format!("{} {}", i.program, i.args.join(" ")))
        .collect();
    assert_eq!(calls, ["npm install", "git init"]);
    assert!(
        invocations
            .iter()
            .all(|i| i.cwd == Path::new("/work/my-project--"))
    );
}

#[test]
fn generated_project_is_a_valid_project() {
    let h = harness(MemoryFilesystem::new());
    let outcome = h.service.create("api", &options()).unwrap();

    assert!(h.service.validator().is_valid_project(&outcome.project_path));

    // no README is generated
    let result = h.service.validate(&outcome.project_path);
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.message == "Required file missing: README.md")
    );

    // the generated tsconfig leaves noImplicitAny to `strict`
    let suboptimal: Vec<_> = result
        .warnings
        .iter()
        .filter(|w| w.code == FindingCode::SuboptimalTypescriptConfig)
        .map(|w| w.message.as_str())
        .collect();
    assert_eq!(
        suboptimal,
        ["Recommended TypeScript option: noImplicitAny should be true"]
    );
}

#[test]
fn existing_directory_requires_force() {
    let fs = MemoryFilesystem::new().with_file("/work/api/notes.txt", "keep me");
    let h = harness(fs);

    let err = h.service.create("api", &options()).unwrap_err();
    assert!(matches!(
        err,
        TrowelError::Application(ApplicationError::ProjectExists { .. })
    ));

    let forced = CreateOptions {
        force: true,
        ..options()
    };
    h.service.create("api", &forced).unwrap();
    assert_eq!(
        h.fs.file_content("/work/api/notes.txt").as_deref(),
        Some("keep me")
    );
    assert!(h.fs.file_content("/work/api/package.json").is_some());
}

#[test]
fn failed_install_does_not_fail_create() {
    let h = harness_with(
        MemoryFilesystem::new(),
        InMemoryStore::with_builtin().unwrap(),
        RecordingRunner::new().failing("npm"),
    );

    let outcome = h.service.create("api", &options()).unwrap();

    assert!(!outcome.installed);
    assert!(outcome.git_initialized);
    assert_eq!(outcome.advisories.len(), 1);
    assert_eq!(outcome.advisories[0].step, "install");
    assert_eq!(outcome.advisories[0].recovery, ["cd api", "npm install"]);
}

#[test]
fn unknown_template_falls_back_to_default() {
    let h = harness(MemoryFilesystem::new());
    let opts = CreateOptions {
        template: "react".into(),
        install: false,
        git: false,
        ..options()
    };

    h.service.create("web", &opts).unwrap();

    let pkg = manifest(&h.fs, "/work/web/package.json");
    assert_eq!(pkg["scripts"]["build"], "tsc");
    assert!(h.runner.invocations().is_empty());
}

#[test]
fn declared_template_files_are_rendered_and_marked() {
    let store = InMemoryStore::new();
    store
        .insert(
            TemplateDescription::new("default", "custom")
                .with_dev_dependency("typescript@^5.3.0")
                .with_file(TemplateFile::text("README.md", "# {{NAME_PASCAL}}\n"))
                .with_file(TemplateFile::text("scripts/setup.sh", "#!/bin/sh\n").executable()),
        )
        .unwrap();
    let h = harness_with(MemoryFilesystem::new(), store, RecordingRunner::new());

    h.service.create("shop-front", &options()).unwrap();

    assert_eq!(
        h.fs.file_content("/work/shop-front/README.md").as_deref(),
        Some("# ShopFront\n")
    );
    assert!(h.fs.is_executable("/work/shop-front/scripts/setup.sh"));
    assert!(!h.fs.is_executable("/work/shop-front/README.md"));
}

#[test]
fn unknown_scaffold_kind_writes_nothing() {
    let h = harness(MemoryFilesystem::new().with_dir("/p"));

    let err = h
        .service
        .scaffold("widget", "Header", Path::new("/p"))
        .unwrap_err();

    assert!(matches!(
        err,
        TrowelError::Domain(DomainError::UnknownScaffoldKind { .. })
    ));
    assert!(err.to_string().contains("widget"));
    assert!(h.fs.list_files().is_empty());
}

#[test]
fn scaffold_service_creates_the_class_file() {
    let h = harness(MemoryFilesystem::new().with_dir("/p"));

    let written = h
        .service
        .scaffold("service", "billing", Path::new("/p"))
        .unwrap();

    assert_eq!(
        written,
        [PathBuf::from("/p/src/services/BillingService.ts")]
    );
    let source = h.fs.file_content(&written[0]).unwrap();
    assert!(source.contains("export class BillingService"));
    for method in ["initialize", "process", "cleanup"] {
        assert!(source.contains(method), "missing {method}");
    }
}

#[test]
fn scaffold_module_writes_files_in_order() {
    let h = harness(MemoryFilesystem::new());

    let written = h
        .service
        .scaffold("Module", "payments", Path::new("/p"))
        .unwrap();

    assert_eq!(
        written,
        [
            PathBuf::from("/p/src/modules/payments/index.ts"),
            PathBuf::from("/p/src/modules/payments/types.ts"),
            PathBuf::from("/p/src/modules/payments/Payments.ts"),
        ]
    );
}

#[test]
fn update_lets_template_scripts_win() {
    let fs = MemoryFilesystem::new().with_file(
        "/p/package.json",
        r#"{"name":"legacy","scripts":{"test":"mocha","custom":"echo hi"},"devDependencies":{"typescript":"^4.9.0"}}"#,
    );
    let h = harness(fs);

    let plan = h.service.update(Path::new("/p")).unwrap();

    let pkg = manifest(&h.fs, "/p/package.json");
    assert_eq!(pkg["scripts"]["test"], "vitest");
    assert_eq!(pkg["scripts"]["custom"], "echo hi");
    assert_eq!(pkg["devDependencies"]["typescript"], "^4.9.0");
    assert_eq!(pkg["devDependencies"]["vitest"], "^1.0.0");
    assert!(pkg.get("dependencies").is_none());

    let test_change = plan
        .script_changes
        .iter()
        .find(|c| c.name == "test")
        .unwrap();
    assert_eq!(test_change.previous.as_deref(), Some("mocha"));
    assert_eq!(plan.added_dev_dependencies.len(), 15);
}

#[test]
fn second_update_is_a_no_op() {
    let fs = MemoryFilesystem::new().with_file("/p/package.json", r#"{"name":"x"}"#);
    let h = harness(fs);

    h.service.update(Path::new("/p")).unwrap();
    let first = h.fs.file_content("/p/package.json");
    let plan = h.service.update(Path::new("/p")).unwrap();

    assert!(plan.is_empty());
    assert_eq!(h.fs.file_content("/p/package.json"), first);
}

#[test]
fn plan_update_does_not_write() {
    let original = r#"{"name":"x"}"#;
    let fs = MemoryFilesystem::new().with_file("/p/package.json", original);
    let h = harness(fs);

    let plan = h.service.plan_update(Path::new("/p")).unwrap();

    assert!(!plan.is_empty());
    assert_eq!(
        h.fs.file_content("/p/package.json").as_deref(),
        Some(original)
    );
}

#[test]
fn update_outside_a_project_fails() {
    let h = harness(MemoryFilesystem::new().with_dir("/p"));

    let err = h.service.update(Path::new("/p")).unwrap_err();
    assert!(matches!(
        err,
        TrowelError::Application(ApplicationError::NotAProject { .. })
    ));
}
