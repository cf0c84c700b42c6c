//! Templates that ship with Trowel.
//!
//! There is a single built-in template, `default`: a strict TypeScript
//! Node project with vitest, ESLint, Prettier and husky wired into its
//! npm scripts. Its only declared files are the generated ones, so the
//! file list is empty.

use trowel_core::domain::{DEFAULT_TEMPLATE, TemplateDescription};

const DEPENDENCIES: [&str; 6] = [
    "chalk@^5.3.0",
    "commander@^11.1.0",
    "fs-extra@^11.2.0",
    "inquirer@^9.2.12",
    "ora@^7.0.1",
    "yargs@^17.7.2",
];

const DEV_DEPENDENCIES: [&str; 16] = [
    "@types/node@^20.10.0",
    "@typescript-eslint/eslint-plugin@^6.13.0",
    "@typescript-eslint/parser@^6.13.0",
    "@vitest/coverage-v8@^1.0.0",
    "@vitest/ui@^1.0.0",
    "eslint@^8.54.0",
    "eslint-config-prettier@^9.0.0",
    "eslint-plugin-import@^2.29.0",
    "eslint-plugin-prettier@^5.0.0",
    "husky@^8.0.3",
    "lint-staged@^15.1.0",
    "prettier@^3.1.0",
    "rimraf@^5.0.5",
    "tsx@^4.6.0",
    "typescript@^5.3.0",
    "vitest@^1.0.0",
];

const LINT: &str = "eslint src tests --ext .ts,.tsx,.js,.jsx";
const FORMAT_GLOBS: &str =
    r#""src/**/*.{ts,tsx,js,jsx,json,md}" "tests/**/*.{ts,tsx,js,jsx,json,md}""#;

/// All built-in templates.
pub fn all_templates() -> Vec<TemplateDescription> {
    vec![default_template()]
}

/// The `default` template.
pub fn default_template() -> TemplateDescription {
    let template = TemplateDescription::new(DEFAULT_TEMPLATE, "Default TypeScript project template");

    let template = DEPENDENCIES
        .iter()
        .fold(template, |t, dep| t.with_dependency(*dep));
    let template = DEV_DEPENDENCIES
        .iter()
        .fold(template, |t, dep| t.with_dev_dependency(*dep));

    template
        .with_script("dev", "tsx watch src/index.ts")
        .with_script("build", "tsc")
        .with_script("start", "node dist/index.js")
        .with_script("test", "vitest")
        .with_script("test:watch", "vitest --watch")
        .with_script("test:coverage", "vitest --coverage")
        .with_script("lint", LINT)
        .with_script("lint:fix", format!("{LINT} --fix"))
        .with_script("format", format!("prettier --write {FORMAT_GLOBS}"))
        .with_script("format:check", format!("prettier --check {FORMAT_GLOBS}"))
        .with_script("type-check", "tsc --noEmit")
        .with_script("clean", "rimraf dist coverage")
        .with_script("prepare", "husky install")
}
