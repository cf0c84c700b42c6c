//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "trowel",
    bin_name = "trowel",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold, update and validate TypeScript/Node projects",
    long_about = "Trowel creates TypeScript/Node projects from a built-in template, \
                  keeps an existing package.json in line with that template, checks \
                  a project against a fixed rule set, and adds individual source files.",
    after_help = "EXAMPLES:\n\
        \x20 trowel create my-api\n\
        \x20 trowel update --dry-run\n\
        \x20 trowel validate --strict\n\
        \x20 trowel scaffold service billing\n\
        \x20 trowel completions bash > /usr/share/bash-completion/completions/trowel",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template.
    #[command(
        visible_alias = "new",
        about = "Create a new TypeScript project",
        after_help = "EXAMPLES:\n\
            \x20 trowel create my-project\n\
            \x20 trowel create my-api --path ~/code --no-install\n\
            \x20 trowel create my-lib --description \"Shared utilities\" --author \"Ada\""
    )]
    Create(CreateArgs),

    /// Bring an existing project in line with the template.
    #[command(
        about = "Update an existing project's package.json",
        after_help = "EXAMPLES:\n\
            \x20 trowel update\n\
            \x20 trowel update --dry-run\n\
            \x20 trowel update --path ../api --yes"
    )]
    Update(UpdateArgs),

    /// Check a project against the rule set.
    #[command(
        about = "Validate project structure and configuration",
        after_help = "EXAMPLES:\n\
            \x20 trowel validate\n\
            \x20 trowel validate --strict\n\
            \x20 trowel validate --fix --path ../api\n\
            \x20 trowel validate --output-format json"
    )]
    Validate(ValidateArgs),

    /// Add one source file (or module) to an existing project.
    #[command(
        visible_alias = "g",
        about = "Scaffold a component, service, module, test or config",
        after_help = "EXAMPLES:\n\
            \x20 trowel scaffold component Header\n\
            \x20 trowel scaffold service billing\n\
            \x20 trowel scaffold module payments --path ../api"
    )]
    Scaffold(ScaffoldArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 trowel completions bash > ~/.local/share/bash-completion/completions/trowel\n\
            \x20 trowel completions zsh  > ~/.zfunc/_trowel\n\
            \x20 trowel completions fish > ~/.config/fish/completions/trowel.fish"
    )]
    Completions(CompletionsArgs),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `trowel create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project name.  Normalised to lower-case letters, digits and hyphens.
    #[arg(value_name = "PROJECT_NAME", help = "Name of the project to create")]
    pub name: String,

    /// Template name; unknown names fall back to `default`.
    #[arg(
        short = 't',
        long = "template",
        value_name = "NAME",
        help = "Template to use (default: default)"
    )]
    pub template: Option<String>,

    /// Overwrite an existing directory.
    #[arg(short = 'f', long = "force", help = "Overwrite existing directory")]
    pub force: bool,

    #[arg(long = "no-install", help = "Skip npm install")]
    pub no_install: bool,

    #[arg(long = "no-git", help = "Skip git init")]
    pub no_git: bool,

    /// Directory the project directory is created in.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Parent directory (default: current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'd',
        long = "description",
        value_name = "TEXT",
        help = "Project description for package.json"
    )]
    pub description: Option<String>,

    #[arg(
        short = 'a',
        long = "author",
        value_name = "NAME",
        help = "Author for package.json"
    )]
    pub author: Option<String>,
}

// ── update ────────────────────────────────────────────────────────────────────

/// Arguments for `trowel update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Print the planned changes without writing.
    #[arg(long = "dry-run", help = "Show what would be updated")]
    pub dry_run: bool,

    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Project directory (default: current directory)"
    )]
    pub path: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `trowel validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Run the update step when errors are found.
    #[arg(short = 'f', long = "fix", help = "Attempt to fix issues by running update")]
    pub fix: bool,

    /// Treat warnings as failures.
    #[arg(long = "strict", help = "Fail on warnings too")]
    pub strict: bool,

    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Project directory (default: current directory)"
    )]
    pub path: Option<PathBuf>,
}

// ── scaffold ──────────────────────────────────────────────────────────────────

/// Arguments for `trowel scaffold`.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// What to generate: component, service, module, test or config.
    ///
    /// Kept as a string so that unknown kinds reach the core and get its
    /// error message and suggestions.
    #[arg(value_name = "TYPE", help = "component | service | module | test | config")]
    pub kind: String,

    #[arg(value_name = "NAME", help = "Name of the item to scaffold")]
    pub name: String,

    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Project directory (default: current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `trowel completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
