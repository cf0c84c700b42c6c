//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `TROWEL__<SECTION>__<KEY>`, e.g.
//!    `TROWEL__DEFAULTS__INSTALL=false`
//! 3. Config file: the `--config` path, else the platform config dir
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "TROWEL";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for `create`.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Settings for `validate`.
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub template: String,
    /// Run `npm install` after `create`.
    pub install: bool,
    /// Run `git init` after `create`.
    pub git: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            template: trowel_core::domain::DEFAULT_TEMPLATE.into(),
            install: true,
            git: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Treat warnings as failures even without `--strict`.
    pub strict: bool,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;

        let file = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::ConfigError {
                        message: format!("config file not found: {}", path.display()),
                        source: None,
                    });
                }
                File::from(path.as_path()).required(true)
            }
            None => File::from(Self::config_path().as_path()).required(false),
        };

        let loaded = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error)?;

        let config: Self = loaded.try_deserialize().map_err(config_error)?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.trowel.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "trowel", "trowel")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".trowel.toml"))
    }

    /// Parse a single file without the environment layer (used by tests).
    #[cfg(test)]
    fn from_file(path: &std::path::Path) -> CliResult<Self> {
        Config::builder()
            .add_source(Config::try_from(&Self::default()).map_err(config_error)?)
            .add_source(File::from(path))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_install_and_init_git() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.template, "default");
        assert!(cfg.defaults.install);
        assert!(cfg.defaults.git);
        assert!(!cfg.validation.strict);
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn file_overrides_only_the_keys_it_sets() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trowel.toml");
        fs::write(&path, "[defaults]\ninstall = false\n\n[validation]\nstrict = true\n").unwrap();

        let cfg = AppConfig::from_file(&path).unwrap();
        assert!(!cfg.defaults.install);
        assert!(cfg.defaults.git);
        assert_eq!(cfg.defaults.template, "default");
        assert!(cfg.validation.strict);
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = AppConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[defaults\ninstall = ").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
