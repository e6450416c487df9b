//! Domain model data types.
//!
//! A `DomainModel` pairs one metadata record with its normalized content
//! payload and the original raw source text. Models are immutable once
//! built; a reload produces a new instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported domain model source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainModelFormat {
    /// RDF triples serialized as Turtle.
    Turtle,
    /// Structured JSON record.
    Json,
    /// Markdown prose with optional YAML front matter.
    Markdown,
}

impl DomainModelFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Turtle => "turtle",
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }
}

impl std::fmt::Display for DomainModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and descriptive attributes of one model version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainModelMetadata {
    /// Stable logical identifier, shared across versions of the same model.
    pub domain_id: String,
    /// Human-readable name.
    pub domain_name: String,
    /// What the model covers.
    pub description: String,
    /// Semantic version string (MAJOR.MINOR.PATCH).
    pub version: String,
    /// Source format the model was parsed from.
    pub format: DomainModelFormat,
    /// Source location, informational only.
    pub file_path: String,
    /// UTC instant the model was parsed.
    pub loaded_at: DateTime<Utc>,
    /// Sorted, deduplicated. Always present, possibly empty.
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub rule_sets: Vec<String>,
    #[serde(default)]
    pub expertise_keywords: Vec<String>,
}

/// Normalized content payload; shape depends on the source format.
#[derive(Debug, Clone)]
pub enum ModelContent {
    /// Subject/predicate/object triples from a Turtle document.
    Graph(Vec<GraphTriple>),
    /// Decoded `content` subtree of a JSON record.
    Record(Value),
    /// Trimmed body text of a Markdown document.
    Text(String),
}

/// One owned triple from a parsed graph document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphTriple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

/// A parsed, validated domain model.
#[derive(Debug, Clone)]
pub struct DomainModel {
    pub metadata: DomainModelMetadata,
    pub content: ModelContent,
    /// Original file content, untouched.
    pub raw_content: String,
}

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One validation finding against a metadata record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

/// Aggregated outcome of validating one model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Valid iff no error-severity issue was collected.
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let is_valid = !issues.iter().any(|i| i.severity == Severity::Error);
        Self { is_valid, issues }
    }

    /// Issues with error severity only.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }
}
