//! Implementation of the `trowel create` command.

use tracing::{info, instrument};

use trowel_core::{application::CreateOutcome, domain::CreateOptions};

use crate::{
    cli::CreateArgs,
    commands::{build_service, target_dir},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `trowel create` command.
///
/// 1. Merge flags over configured defaults
/// 2. Generate the project via `ProjectService::create`
/// 3. Report advisories and next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: CreateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let options = build_options(&args, &config);

    if !output.is_json() {
        output.header(&format!("Creating TypeScript project '{}'", args.name))?;
    }

    let service = build_service(&output)?;
    let outcome = service.create(&args.name, &options)?;
    info!(path = %outcome.project_path.display(), "Project created");

    if output.is_json() {
        output.json(&outcome)?;
        return Ok(());
    }

    report(&outcome, &output)
}

/// Flags win over configured defaults.
fn build_options(args: &CreateArgs, config: &AppConfig) -> CreateOptions {
    CreateOptions {
        template: args
            .template
            .clone()
            .unwrap_or_else(|| config.defaults.template.clone()),
        parent_dir: target_dir(args.path.clone()),
        force: args.force,
        install: config.defaults.install && !args.no_install,
        git: config.defaults.git && !args.no_git,
        description: args.description.clone(),
        author: args.author.clone(),
    }
}

fn report(outcome: &CreateOutcome, output: &OutputManager) -> CliResult<()> {
    if outcome.renamed() {
        output.warning(&format!(
            "Project name sanitized: '{}' -> '{}'",
            outcome.original_name, outcome.project_name
        ))?;
    }

    output.success(&format!(
        "Project '{}' created at {}",
        outcome.project_name,
        outcome.project_path.display()
    ))?;
    for file in &outcome.files {
        output.debug(&file.display().to_string())?;
    }

    if outcome.installed {
        output.success("Dependencies installed")?;
    }
    if outcome.git_initialized {
        output.success("Git repository initialized")?;
    }

    for advisory in &outcome.advisories {
        output.warning(&format!("{} step failed: {}", advisory.step, advisory.message))?;
        output.print("  You can finish it manually with:")?;
        for command in &advisory.recovery {
            output.print(&format!("    {command}"))?;
        }
    }

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", outcome.project_name))?;
    if !outcome.installed {
        output.print("  npm install")?;
    }
    output.print("  npm run dev")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(name: &str) -> CreateArgs {
        CreateArgs {
            name: name.into(),
            template: None,
            force: false,
            no_install: false,
            no_git: false,
            path: None,
            description: None,
            author: None,
        }
    }

    #[test]
    fn flags_override_configured_defaults() {
        let mut config = AppConfig::default();
        config.defaults.template = "library".into();

        let options = build_options(
            &CreateArgs {
                no_git: true,
                path: Some(PathBuf::from("/work")),
                ..args("api")
            },
            &config,
        );

        assert_eq!(options.template, "library");
        assert_eq!(options.parent_dir, PathBuf::from("/work"));
        assert!(options.install);
        assert!(!options.git);
    }

    #[test]
    fn config_can_disable_install() {
        let mut config = AppConfig::default();
        config.defaults.install = false;

        let options = build_options(
            &CreateArgs {
                template: Some("default".into()),
                ..args("api")
            },
            &config,
        );
        assert!(!options.install);
        assert_eq!(options.parent_dir, PathBuf::from("."));
    }
}
