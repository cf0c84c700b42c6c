//! Command handlers.
//!
//! Each handler translates parsed arguments into a call on the core
//! `ProjectService` and renders the outcome. No business logic lives here.

pub mod completions;
pub mod create;
pub mod scaffold;
pub mod update;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use trowel_adapters::{InMemoryStore, LocalFilesystem, SystemRunner};
use trowel_core::application::ProjectService;

use crate::{
    cli::OutputFormat,
    error::{CliResult, IntoCli},
    output::OutputManager,
    runner::SpinnerRunner,
};

/// Wire the production adapters into a `ProjectService`.
pub(crate) fn build_service(output: &OutputManager) -> CliResult<ProjectService> {
    let store = InMemoryStore::with_builtin().with_cli_context(|| "loading built-in templates")?;
    let spinner = !output.is_quiet() && output.format() == OutputFormat::Human;

    Ok(ProjectService::new(
        Arc::new(LocalFilesystem::new()),
        Box::new(store),
        Box::new(SpinnerRunner::new(SystemRunner::new(), spinner)),
    ))
}

/// `--path`, or the current directory.
pub(crate) fn target_dir(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_dir_defaults_to_cwd() {
        assert_eq!(target_dir(None), PathBuf::from("."));
        assert_eq!(
            target_dir(Some(PathBuf::from("../api"))),
            PathBuf::from("../api")
        );
    }
}
