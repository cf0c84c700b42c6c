//! Domain value objects: ScaffoldKind, FileEncoding, DependencySpec, FilePattern.
//!
//! These are pure value types with equality-by-value and no identity. Each
//! one owns its string representation and its parser.

use crate::domain::error::DomainError;
use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ScaffoldKind ─────────────────────────────────────────────────────────────

/// The closed set of things `scaffold` can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaffoldKind {
    Component,
    Service,
    Module,
    Test,
    Config,
}

impl ScaffoldKind {
    pub const ALL: [ScaffoldKind; 5] = [
        Self::Component,
        Self::Service,
        Self::Module,
        Self::Test,
        Self::Config,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Service => "service",
            Self::Module => "module",
            Self::Test => "test",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for ScaffoldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaffoldKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "component" => Ok(Self::Component),
            "service" => Ok(Self::Service),
            "module" => Ok(Self::Module),
            "test" => Ok(Self::Test),
            "config" => Ok(Self::Config),
            _ => Err(DomainError::UnknownScaffoldKind { kind: s.to_string() }),
        }
    }
}

// ── FileEncoding ─────────────────────────────────────────────────────────────

/// How a declared template file is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileEncoding {
    /// Text; `{{PLACEHOLDER}}` variables are substituted.
    #[default]
    Utf8,
    /// Written verbatim.
    Binary,
}

// ── DependencySpec ───────────────────────────────────────────────────────────

/// A parsed `name@version` declaration.
///
/// The split happens at the last `@` that is not the leading one, so scoped
/// packages keep their scope: `@types/node@^20.10.0` is `@types/node` at
/// `^20.10.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencySpec {
    pub name: String,
    pub version: String,
}

impl DependencySpec {
    pub fn parse(declaration: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidDependency {
            declaration: declaration.to_string(),
            reason: reason.to_string(),
        };

        let at = declaration
            .rfind('@')
            .filter(|&i| i > 0)
            .ok_or_else(|| invalid("missing '@version'"))?;

        let (name, version) = (&declaration[..at], &declaration[at + 1..]);
        if version.is_empty() {
            return Err(invalid("empty version"));
        }

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
        })
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

impl FromStr for DependencySpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── FilePattern ──────────────────────────────────────────────────────────────

/// Base names that mark a file as a test file.
pub const TEST_FILE_PATTERN: &str = "*.{test,spec}.{js,ts,jsx,tsx}";

/// A compiled glob matched against file *base names* during recursive search.
#[derive(Debug, Clone)]
pub struct FilePattern {
    source: String,
    matcher: GlobMatcher,
}

impl FilePattern {
    pub fn new(pattern: &str) -> Result<Self, DomainError> {
        let glob = Glob::new(pattern).map_err(|e| DomainError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// Pattern for test sources.
    pub fn test_files() -> Result<Self, DomainError> {
        Self::new(TEST_FILE_PATTERN)
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
