//! Implementation of the `trowel scaffold` command.

use std::path::Path;

use tracing::instrument;
use trowel_core::{domain::ScaffoldRequest, error::TrowelError};

use crate::{
    cli::ScaffoldArgs,
    commands::{build_service, target_dir},
    error::CliResult,
    output::OutputManager,
    prompt,
};

#[instrument(skip_all, fields(kind = %args.kind, name = %args.name))]
pub fn execute(args: ScaffoldArgs, output: OutputManager) -> CliResult<()> {
    let root = target_dir(args.path);
    let service = build_service(&output)?;

    // reject unknown kinds before asking anything
    let request =
        ScaffoldRequest::parse(&args.kind, &args.name, None).map_err(TrowelError::from)?;

    let question = format!("Create {} \"{}\"?", request.kind, request.name);
    if !args.yes && !prompt::confirm(&question, true)? {
        output.warning("Scaffolding cancelled")?;
        return Ok(());
    }

    let written = service.scaffold(&args.kind, &args.name, &root)?;

    if output.is_json() {
        output.json(&written)?;
        return Ok(());
    }

    output.success(&format!(
        "{} \"{}\" scaffolded successfully!",
        request.kind, request.name
    ))?;
    output.print("Files created:")?;
    for file in &written {
        output.print(&format!("  • {}", relative_to(file, &root)))?;
    }

    output.print("")?;
    output.print("Next steps:")?;
    output.print("  1. Review and customize the generated files")?;
    output.print("  2. npm run lint - Check code quality")?;
    output.print("  3. npm test     - Run tests")?;
    Ok(())
}

fn relative_to(file: &Path, root: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .display()
        .to_string()
}
