//! Format-specific domain model parsers.
//!
//! Each parser extracts the same canonical metadata record plus a
//! format-specific content payload. All three funnel through
//! [`build_metadata`], which fills default empty list attributes, sorts and
//! deduplicates them, and stamps the load timestamp.

mod json;
mod markdown;
mod turtle;

use chrono::Utc;
use thiserror::Error;

use crate::models::metadata::{DomainModel, DomainModelFormat, DomainModelMetadata};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed {format} content: {message}")]
    Syntax {
        format: DomainModelFormat,
        message: String,
    },

    #[error("Missing DomainModel subject in {0}")]
    MissingSubject(String),

    #[error("Missing required predicate: {0}")]
    MissingRequiredPredicate(&'static str),
}

/// Metadata fields as extracted by a format parser, before normalization.
#[derive(Debug, Default)]
pub struct RawMetadata {
    pub domain_id: String,
    pub domain_name: String,
    pub description: String,
    pub version: String,
    pub capabilities: Vec<String>,
    pub tools: Vec<String>,
    pub rule_sets: Vec<String>,
    pub expertise_keywords: Vec<String>,
}

/// Normalize extracted fields into a full metadata record.
///
/// List attributes are sorted lexicographically and deduplicated;
/// `loaded_at` is stamped with the current UTC instant.
pub fn build_metadata(
    raw: RawMetadata,
    format: DomainModelFormat,
    file_path: &str,
) -> DomainModelMetadata {
    let normalize = |mut values: Vec<String>| {
        values.sort();
        values.dedup();
        values
    };

    DomainModelMetadata {
        domain_id: raw.domain_id,
        domain_name: raw.domain_name,
        description: raw.description,
        version: raw.version,
        format,
        file_path: file_path.to_string(),
        loaded_at: Utc::now(),
        capabilities: normalize(raw.capabilities),
        tools: normalize(raw.tools),
        rule_sets: normalize(raw.rule_sets),
        expertise_keywords: normalize(raw.expertise_keywords),
    }
}

/// Dispatches raw content to the parser for its detected format.
pub struct ModelParser;

impl ModelParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(
        &self,
        content: &str,
        format: DomainModelFormat,
        file_path: &str,
    ) -> Result<DomainModel, ParseError> {
        match format {
            DomainModelFormat::Turtle => turtle::parse(content, file_path),
            DomainModelFormat::Json => json::parse(content, file_path),
            DomainModelFormat::Markdown => markdown::parse(content, file_path),
        }
    }
}

impl Default for ModelParser {
    fn default() -> Self {
        Self::new()
    }
}
