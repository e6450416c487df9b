//! Prose format parser (Markdown with optional YAML front matter).
//!
//! Front matter is delimited by a line of exactly three dashes, opened on
//! the first line and closed by its second occurrence. Unparseable or
//! absent front matter reads as an empty map; the body is the remaining
//! text, trimmed.

use serde_yaml::{Mapping, Value};

use crate::models::metadata::{DomainModel, DomainModelFormat, ModelContent};

use super::{build_metadata, ParseError, RawMetadata};

const DELIMITER: &str = "---";

pub(super) fn parse(content: &str, file_path: &str) -> Result<DomainModel, ParseError> {
    let (front_matter, body) = split_front_matter(content);

    let map = front_matter
        .and_then(|text| serde_yaml::from_str::<Mapping>(text).ok())
        .unwrap_or_default();

    let raw = RawMetadata {
        domain_id: string_field(&map, "domain_id"),
        domain_name: string_field(&map, "domain_name"),
        description: string_field(&map, "description"),
        version: string_field(&map, "version"),
        capabilities: list_field(&map, "capabilities"),
        tools: list_field(&map, "tools"),
        rule_sets: list_field(&map, "rule_sets"),
        expertise_keywords: list_field(&map, "expertise_keywords"),
    };

    Ok(DomainModel {
        metadata: build_metadata(raw, DomainModelFormat::Markdown, file_path),
        content: ModelContent::Text(body.trim().to_string()),
        raw_content: content.to_string(),
    })
}

/// Split into (front matter, body) when the text opens with a delimiter
/// line; otherwise the whole text is body.
fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let mut lines = content.lines();
    if lines.next().map(str::trim_end) != Some(DELIMITER) {
        return (None, content);
    }

    // Byte offset just past the opening delimiter line.
    let after_open = match content.find('\n') {
        Some(i) => i + 1,
        None => return (None, content),
    };

    let rest = &content[after_open..];
    for (offset, line) in line_offsets(rest) {
        if line.trim_end() == DELIMITER {
            let front = &rest[..offset];
            let body_start = offset + line.len();
            let body = rest[body_start..].strip_prefix('\n').unwrap_or(&rest[body_start..]);
            return (Some(front), body);
        }
    }

    // Unclosed front matter: treat everything as body.
    (None, content)
}

fn line_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |chunk| {
        let start = offset;
        offset += chunk.len();
        (start, chunk.trim_end_matches('\n'))
    })
}

fn string_field(map: &Mapping, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn list_field(map: &Mapping, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        // A single scalar reads as a one-element list.
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}
