//! Validation findings and the aggregated result.
//!
//! Findings are plain values. A check produces a list of them; the validator
//! concatenates the lists in check order and folds them into a
//! [`ValidationResult`]. Nothing here is mutated after construction.

use serde::Serialize;
use std::fmt;

/// Machine-readable finding codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    // basic structure
    MissingRequiredFile,
    MissingRecommendedFile,
    MissingRecommendedDir,
    // manifest
    InvalidPackageJson,
    MissingPackageField,
    MissingRecommendedPackageField,
    MissingRecommendedScript,
    // typescript
    MissingTypescriptConfig,
    InvalidTypescriptConfig,
    SuboptimalTypescriptConfig,
    // lint / format
    MissingEslintConfig,
    MissingPrettierConfig,
    // testing
    MissingTests,
    MissingTestConfig,
    // ci
    MissingCiCd,
    EmptyCiCd,
    // ignore file
    MissingGitignore,
    IncompleteGitignore,
    InvalidGitignore,
    // documentation
    IncompleteReadme,
    ShortReadme,
    InvalidReadme,
    /// A check failed unexpectedly; remaining checks were skipped.
    ValidationError,
}

impl FindingCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredFile => "MISSING_REQUIRED_FILE",
            Self::MissingRecommendedFile => "MISSING_RECOMMENDED_FILE",
            Self::MissingRecommendedDir => "MISSING_RECOMMENDED_DIR",
            Self::InvalidPackageJson => "INVALID_PACKAGE_JSON",
            Self::MissingPackageField => "MISSING_PACKAGE_FIELD",
            Self::MissingRecommendedPackageField => "MISSING_RECOMMENDED_PACKAGE_FIELD",
            Self::MissingRecommendedScript => "MISSING_RECOMMENDED_SCRIPT",
            Self::MissingTypescriptConfig => "MISSING_TYPESCRIPT_CONFIG",
            Self::InvalidTypescriptConfig => "INVALID_TYPESCRIPT_CONFIG",
            Self::SuboptimalTypescriptConfig => "SUBOPTIMAL_TYPESCRIPT_CONFIG",
            Self::MissingEslintConfig => "MISSING_ESLINT_CONFIG",
            Self::MissingPrettierConfig => "MISSING_PRETTIER_CONFIG",
            Self::MissingTests => "MISSING_TESTS",
            Self::MissingTestConfig => "MISSING_TEST_CONFIG",
            Self::MissingCiCd => "MISSING_CI_CD",
            Self::EmptyCiCd => "EMPTY_CI_CD",
            Self::MissingGitignore => "MISSING_GITIGNORE",
            Self::IncompleteGitignore => "INCOMPLETE_GITIGNORE",
            Self::InvalidGitignore => "INVALID_GITIGNORE",
            Self::IncompleteReadme => "INCOMPLETE_README",
            Self::ShortReadme => "SHORT_README",
            Self::InvalidReadme => "INVALID_README",
            Self::ValidationError => "VALIDATION_ERROR",
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub code: FindingCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub code: FindingCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub fixable: bool,
}

/// One problem reported by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFinding {
    Error(ValidationError),
    Warning(ValidationWarning),
}

impl ValidationFinding {
    pub fn error(code: FindingCode, message: impl Into<String>, file: Option<&str>) -> Self {
        Self::Error(ValidationError {
            code,
            message: message.into(),
            file: file.map(str::to_string),
            severity: Severity::Error,
        })
    }

    /// A fixable warning.
    pub fn warning(code: FindingCode, message: impl Into<String>, file: Option<&str>) -> Self {
        Self::Warning(ValidationWarning {
            code,
            message: message.into(),
            file: file.map(str::to_string),
            fixable: true,
        })
    }

    /// A warning the update step cannot address.
    pub fn advisory(code: FindingCode, message: impl Into<String>, file: Option<&str>) -> Self {
        Self::Warning(ValidationWarning {
            code,
            message: message.into(),
            file: file.map(str::to_string),
            fixable: false,
        })
    }

    pub fn code(&self) -> FindingCode {
        match self {
            Self::Error(e) => e.code,
            Self::Warning(w) => w.code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Error(e) => &e.message,
            Self::Warning(w) => &w.message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Outcome of one validation run.
///
/// `valid` is true exactly when `errors` is empty; warnings never affect it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Split findings into errors and warnings, keeping their order.
    pub fn from_findings(findings: impl IntoIterator<Item = ValidationFinding>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for finding in findings {
            match finding {
                ValidationFinding::Error(e) => errors.push(e),
                ValidationFinding::Warning(w) => warnings.push(w),
            }
        }

        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Whether the run passes; in strict mode warnings fail it too.
    pub fn passes(&self, strict: bool) -> bool {
        self.valid && (!strict || self.warnings.is_empty())
    }

    pub fn fixable_count(&self) -> usize {
        self.warnings.iter().filter(|w| w.fixable).count()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}
