//! Implementation of the `trowel validate` command.

use std::path::Path;

use tracing::{info, instrument, warn};

use trowel_core::{application::ProjectService, domain::ValidationResult};

use crate::{
    cli::ValidateArgs,
    commands::{build_service, target_dir},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `trowel validate` command.
///
/// Prints every finding and a PASS/FAIL summary. The command itself only
/// fails in strict mode, with [`CliError::ValidationFailed`] when any error
/// or warning remains. `--fix` runs the update step once and validates again.
#[instrument(skip_all, fields(strict = tracing::field::Empty, fix = args.fix))]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let strict = args.strict || config.validation.strict;
    tracing::Span::current().record("strict", strict);

    let path = target_dir(args.path);
    let service = build_service(&output)?;

    if !output.is_json() {
        output.header("Validating project")?;
        output.info(&format!("Project location: {}", path.display()))?;
    }

    let mut result = service.validate(&path);

    if args.fix && !result.valid {
        if !output.is_json() {
            report(&result, &output)?;
        }
        result = fix(&service, &path, &output)?;
    }

    if output.is_json() {
        output
            .json(&result)
            .with_cli_context(|| "writing validation result")?;
    } else {
        report(&result, &output)?;
        summary(&result, strict, &output)?;
    }

    // findings are a report; only strict mode turns them into a failure
    if !strict || result.passes(true) {
        return Ok(());
    }
    Err(CliError::ValidationFailed {
        errors: result.errors.len(),
        warnings: result.warnings.len(),
    })
}

/// Run the update step, then validate again.
fn fix(service: &ProjectService, path: &Path, output: &OutputManager) -> CliResult<ValidationResult> {
    let out = output.scoped("fix");
    if !output.is_json() {
        out.info("Attempting to fix issues by applying the template update")?;
    }

    match service.update(path) {
        Ok(plan) => {
            info!(
                scripts = plan.script_changes.len(),
                dev_dependencies = plan.added_dev_dependencies.len(),
                "Fix applied"
            );
            if !output.is_json() {
                out.success(&format!(
                    "Updated {} script(s) and {} dev dependenc{}",
                    plan.script_changes.len(),
                    plan.added_dev_dependencies.len(),
                    if plan.added_dev_dependencies.len() == 1 { "y" } else { "ies" }
                ))?;
            }
        }
        Err(e) => {
            warn!(error = %e, "Fix failed");
            if !output.is_json() {
                out.error(&format!("Failed to fix some issues: {e}"))?;
                out.print("Manual fixes may be required; see the findings below.")?;
            }
        }
    }

    Ok(service.validate(path))
}

fn report(result: &ValidationResult, output: &OutputManager) -> CliResult<()> {
    for e in &result.errors {
        output.error(&with_file(&e.message, e.file.as_deref()))?;
    }
    for w in &result.warnings {
        let mut line = with_file(&w.message, w.file.as_deref());
        if w.fixable {
            line.push_str(" (fixable)");
        }
        output.warning(&line)?;
    }
    if result.is_clean() {
        output.success("Project validation passed!")?;
    }
    Ok(())
}

fn summary(result: &ValidationResult, strict: bool, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.header("Validation Summary:")?;
    output.print(&format!("  Errors:      {}", result.errors.len()))?;
    output.print(&format!(
        "  Warnings:    {} ({} fixable)",
        result.warnings.len(),
        result.fixable_count()
    ))?;
    output.print(&format!("  Strict mode: {}", if strict { "ON" } else { "OFF" }))?;
    output.print(&format!(
        "  Status:      {}",
        if result.passes(strict) { "PASS" } else { "FAIL" }
    ))?;
    Ok(())
}

fn with_file(message: &str, file: Option<&str>) -> String {
    match file {
        Some(file) if !message.contains(file) => format!("{message} ({file})"),
        _ => message.to_string(),
    }
}
