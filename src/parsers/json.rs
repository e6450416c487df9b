//! Record format parser (JSON).
//!
//! Metadata is read from the top level when the identity keys live there,
//! otherwise from a nested `metadata` sub-record. Missing fields come back
//! empty and are left for the validator to flag.

use serde_json::Value;

use crate::models::metadata::{DomainModel, DomainModelFormat, ModelContent};

use super::{build_metadata, ParseError, RawMetadata};

const IDENTITY_KEYS: &[&str] = &["domain_id", "domain_name", "description", "version"];

pub(super) fn parse(content: &str, file_path: &str) -> Result<DomainModel, ParseError> {
    let root: Value = serde_json::from_str(content).map_err(|e| ParseError::Syntax {
        format: DomainModelFormat::Json,
        message: e.to_string(),
    })?;

    let source = metadata_source(&root);

    let raw = RawMetadata {
        domain_id: string_field(source, "domain_id"),
        domain_name: string_field(source, "domain_name"),
        description: string_field(source, "description"),
        version: string_field(source, "version"),
        capabilities: list_field(source, "capabilities"),
        tools: list_field(source, "tools"),
        rule_sets: list_field(source, "rule_sets"),
        expertise_keywords: list_field(source, "expertise_keywords"),
    };

    let content_value = root
        .get("content")
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));

    Ok(DomainModel {
        metadata: build_metadata(raw, DomainModelFormat::Json, file_path),
        content: ModelContent::Record(content_value),
        raw_content: content.to_string(),
    })
}

/// Top-level record when any identity key is present there, otherwise the
/// nested `metadata` sub-record (fallback shape).
fn metadata_source(root: &Value) -> &Value {
    if IDENTITY_KEYS.iter().any(|k| root.get(k).is_some()) {
        return root;
    }
    root.get("metadata").unwrap_or(&Value::Null)
}

fn string_field(source: &Value, key: &str) -> String {
    source
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

fn list_field(source: &Value, key: &str) -> Vec<String> {
    source
        .get(key)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}
