//! Domain model validation against framework rules.
//!
//! Checks run non-short-circuiting so one pass reports every problem:
//! required metadata fields, semantic version shape, and major-version
//! compatibility with the hosting framework. The compatibility check only
//! runs when the version shape is well-formed.

use std::sync::OnceLock;

use regex::Regex;

use super::metadata::{
    DomainModel, DomainModelMetadata, Severity, ValidationIssue, ValidationResult,
};
use super::version::major_version;

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("version pattern is valid"))
}

/// Validates parsed domain models.
pub struct ModelValidator {
    framework_version: String,
}

impl ModelValidator {
    pub fn new(framework_version: impl Into<String>) -> Self {
        Self {
            framework_version: framework_version.into(),
        }
    }

    pub fn framework_version(&self) -> &str {
        &self.framework_version
    }

    /// Validate one model, collecting every issue found.
    pub fn validate(&self, model: &DomainModel) -> ValidationResult {
        let metadata = &model.metadata;
        let mut issues = self.check_required_fields(metadata);

        if let Some(issue) = self.check_version_format(&metadata.version) {
            issues.push(issue);
        } else if let Some(issue) = self.check_version_compatibility(&metadata.version) {
            issues.push(issue);
        }

        ValidationResult::from_issues(issues)
    }

    fn check_required_fields(&self, metadata: &DomainModelMetadata) -> Vec<ValidationIssue> {
        let required = [
            ("domain_id", &metadata.domain_id),
            ("domain_name", &metadata.domain_name),
            ("description", &metadata.description),
            ("version", &metadata.version),
        ];

        required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| ValidationIssue {
                field: field.to_string(),
                message: format!("required field '{field}' is missing or empty"),
                severity: Severity::Error,
            })
            .collect()
    }

    fn check_version_format(&self, version: &str) -> Option<ValidationIssue> {
        if version.trim().is_empty() || version_pattern().is_match(version) {
            return None;
        }
        Some(ValidationIssue {
            field: "version".to_string(),
            message: format!("version '{version}' does not match MAJOR.MINOR.PATCH"),
            severity: Severity::Error,
        })
    }

    fn check_version_compatibility(&self, version: &str) -> Option<ValidationIssue> {
        if version.trim().is_empty() {
            return None;
        }
        let model_major = major_version(version);
        let framework_major = major_version(&self.framework_version);

        if model_major > framework_major {
            return Some(ValidationIssue {
                field: "version".to_string(),
                message: format!(
                    "model version {version} requires a newer framework than {}",
                    self.framework_version
                ),
                severity: Severity::Error,
            });
        }
        if model_major < framework_major {
            return Some(ValidationIssue {
                field: "version".to_string(),
                message: format!(
                    "model version {version} targets an older major than framework {}",
                    self.framework_version
                ),
                severity: Severity::Warning,
            });
        }
        None
    }
}
