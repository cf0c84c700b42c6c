//! Implementation of the `trowel update` command.

use std::path::Path;

use tracing::{info, instrument};

use trowel_core::application::{ProjectService, UpdatePlan};

use crate::{
    cli::UpdateArgs,
    commands::{build_service, target_dir},
    error::CliResult,
    output::OutputManager,
    prompt,
};

const CONFIRM: &str = "This will update your package.json. Continue?";

/// Execute the `trowel update` command.
///
/// The plan is computed first so that `--dry-run` and the confirmation
/// prompt both show exactly what would be written.
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: UpdateArgs, output: OutputManager) -> CliResult<()> {
    let path = target_dir(args.path.clone());
    let service = build_service(&output)?;

    let plan = service.plan_update(&path)?;

    if output.is_json() {
        return json(&args, &plan, &service, &path, &output);
    }

    output.info(&format!("Project location: {}", path.display()))?;

    if plan.is_empty() {
        output.success("Project is already up to date")?;
        return Ok(());
    }

    describe_plan(&plan, &output)?;

    if args.dry_run {
        output.print("")?;
        output.info("Dry run: nothing was written. Run without --dry-run to apply.")?;
        return Ok(());
    }

    if !confirmed(&args, &output)? {
        return Ok(());
    }

    let applied = service.update(&path)?;
    info!(manifest = %applied.manifest_path.display(), "Manifest updated");

    output.success("Project updated successfully!")?;
    output.print("")?;
    output.print("Next steps:")?;
    if !applied.added_dev_dependencies.is_empty() {
        output.print("  npm install     - Install new dependencies")?;
    }
    output.print("  npm run lint    - Check code quality")?;
    output.print("  npm test        - Run tests")?;
    Ok(())
}

/// JSON mode: stdout carries only the plan (dry run, nothing to do) or the
/// applied plan.
fn json(
    args: &UpdateArgs,
    plan: &UpdatePlan,
    service: &ProjectService,
    path: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    if args.dry_run || plan.is_empty() {
        output.json(plan)?;
        return Ok(());
    }

    // a declined prompt reports the unapplied plan; no human text on stdout
    if !args.yes && !prompt::confirm(CONFIRM, true)? {
        info!("Update cancelled");
        output.json(plan)?;
        return Ok(());
    }

    let applied = service.update(path)?;
    info!(manifest = %applied.manifest_path.display(), "Manifest updated");
    output.json(&applied)?;
    Ok(())
}

fn confirmed(args: &UpdateArgs, output: &OutputManager) -> CliResult<bool> {
    if args.yes || prompt::confirm(CONFIRM, true)? {
        return Ok(true);
    }
    output.warning("Update cancelled")?;
    Ok(false)
}

fn describe_plan(plan: &UpdatePlan, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("Changes to {}", plan.manifest_path.display()))?;

    if !plan.script_changes.is_empty() {
        output.print("  scripts:")?;
        for change in &plan.script_changes {
            let line = match &change.previous {
                Some(previous) => {
                    format!("    ~ {}: \"{}\" -> \"{}\"", change.name, previous, change.value)
                }
                None => format!("    + {}: \"{}\"", change.name, change.value),
            };
            output.print(&line)?;
        }
    }

    if !plan.added_dev_dependencies.is_empty() {
        output.print("  devDependencies:")?;
        for dep in &plan.added_dev_dependencies {
            output.print(&format!("    + {}: \"{}\"", dep.name, dep.version))?;
        }
    }

    Ok(())
}
