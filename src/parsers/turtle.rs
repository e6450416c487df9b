//! Graph format parser (Turtle).
//!
//! Metadata attributes live under a primary namespace with a legacy
//! fallback; each attribute is resolved through an ordered candidate list,
//! first non-empty source wins. The subject is whichever node is typed as a
//! `DomainModel` concept in either namespace.

use rio_api::model::{Literal, Subject, Term};
use rio_api::parser::TriplesParser;
use rio_turtle::{TurtleError, TurtleParser};

use crate::models::metadata::{DomainModel, DomainModelFormat, GraphTriple, ModelContent};

use super::{build_metadata, ParseError, RawMetadata};

const NS_PRIMARY: &str = "https://mcp-framework.dev/schema/domain-model#";
const NS_LEGACY: &str = "https://mcp-framework.dev/schema/core#";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Identifier used when a DomainModel subject has no id predicate and no
/// derivable local name.
const FALLBACK_DOMAIN_ID: &str = "unknown_domain";

pub(super) fn parse(content: &str, file_path: &str) -> Result<DomainModel, ParseError> {
    let graph = parse_triples(content)?;

    let subject = find_model_subject(&graph)
        .ok_or_else(|| ParseError::MissingSubject(file_path.to_string()))?
        .to_string();

    let domain_id = resolve_first(&graph, &subject, "domainId")
        .or_else(|| local_name(&subject))
        .unwrap_or_else(|| FALLBACK_DOMAIN_ID.to_string());

    let raw = RawMetadata {
        domain_id,
        domain_name: require(&graph, &subject, "domainName")?,
        description: require(&graph, &subject, "description")?,
        version: require(&graph, &subject, "version")?,
        capabilities: resolve_collect(&graph, &subject, "capability"),
        tools: resolve_collect(&graph, &subject, "tool"),
        rule_sets: resolve_collect(&graph, &subject, "ruleSet"),
        expertise_keywords: resolve_collect(&graph, &subject, "expertiseKeyword"),
    };

    Ok(DomainModel {
        metadata: build_metadata(raw, DomainModelFormat::Turtle, file_path),
        content: ModelContent::Graph(graph),
        raw_content: content.to_string(),
    })
}

/// Parse Turtle text into owned triples.
fn parse_triples(content: &str) -> Result<Vec<GraphTriple>, ParseError> {
    let mut graph = Vec::new();
    let mut parser = TurtleParser::new(content.as_bytes(), None);
    parser
        .parse_all(&mut |t| -> Result<(), TurtleError> {
            graph.push(GraphTriple {
                subject: subject_to_string(&t.subject),
                predicate: t.predicate.iri.to_string(),
                object: term_to_string(&t.object),
            });
            Ok(())
        })
        .map_err(|e| ParseError::Syntax {
            format: DomainModelFormat::Turtle,
            message: e.to_string(),
        })?;
    Ok(graph)
}

fn subject_to_string(subject: &Subject<'_>) -> String {
    match subject {
        Subject::NamedNode(n) => n.iri.to_string(),
        Subject::BlankNode(b) => format!("_:{}", b.id),
        Subject::Triple(t) => t.to_string(),
    }
}

fn term_to_string(term: &Term<'_>) -> String {
    match term {
        Term::NamedNode(n) => n.iri.to_string(),
        Term::BlankNode(b) => format!("_:{}", b.id),
        Term::Literal(l) => match l {
            Literal::Simple { value } => value.to_string(),
            Literal::LanguageTaggedString { value, .. } => value.to_string(),
            Literal::Typed { value, .. } => value.to_string(),
        },
        Term::Triple(t) => t.to_string(),
    }
}

/// First subject typed as a DomainModel, primary namespace before legacy.
fn find_model_subject(graph: &[GraphTriple]) -> Option<&str> {
    for ns in [NS_PRIMARY, NS_LEGACY] {
        let class = format!("{ns}DomainModel");
        if let Some(t) = graph
            .iter()
            .find(|t| t.predicate == RDF_TYPE && t.object == class)
        {
            return Some(&t.subject);
        }
    }
    None
}

fn objects_of<'a>(
    graph: &'a [GraphTriple],
    subject: &'a str,
    predicate: &'a str,
) -> impl Iterator<Item = &'a str> {
    graph
        .iter()
        .filter(move |t| t.subject == subject && t.predicate == predicate)
        .map(|t| t.object.as_str())
}

/// Prioritized-source resolver: primary then legacy, first hit wins.
fn resolve_first(graph: &[GraphTriple], subject: &str, attribute: &str) -> Option<String> {
    for ns in [NS_PRIMARY, NS_LEGACY] {
        let predicate = format!("{ns}{attribute}");
        if let Some(value) = objects_of(graph, subject, &predicate).next() {
            return Some(value.to_string());
        };
    }
    None
}

/// Multi-valued resolver: all primary-namespace objects, falling back to
/// the legacy namespace only when the primary yielded none.
fn resolve_collect(graph: &[GraphTriple], subject: &str, attribute: &str) -> Vec<String> {
    for ns in [NS_PRIMARY, NS_LEGACY] {
        let predicate = format!("{ns}{attribute}");
        let values: Vec<String> = objects_of(graph, subject, &predicate)
            .map(|v| v.to_string())
            .collect();
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}

fn require(
    graph: &[GraphTriple],
    subject: &str,
    attribute: &'static str,
) -> Result<String, ParseError> {
    resolve_first(graph, subject, attribute)
        .ok_or(ParseError::MissingRequiredPredicate(attribute))
}

/// Trailing IRI segment after `#` or the last `/`, if any.
fn local_name(subject: &str) -> Option<String> {
    if subject.starts_with("_:") {
        return None;
    }
    let segment = subject
        .rsplit_once('#')
        .or_else(|| subject.rsplit_once('/'))
        .map(|(_, tail)| tail)?;
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_TTL: &str = r#"
@prefix dm: <https://mcp-framework.dev/schema/domain-model#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .

<https://models.example/compliance_officer> rdf:type dm:DomainModel ;
    dm:domainId "compliance_officer" ;
    dm:domainName "Compliance Officer" ;
    dm:description "Regulatory compliance reasoning" ;
    dm:version "1.0.0" ;
    dm:capability "risk_ranking" ;
    dm:capability "control_mapping" ;
    dm:tool "policy_repository" .
"#;

    #[test]
    fn test_parse_extracts_metadata() {
        let model = parse(MODEL_TTL, "compliance-officer.ttl").unwrap();
        let m = &model.metadata;
        assert_eq!(m.domain_id, "compliance_officer");
        assert_eq!(m.domain_name, "Compliance Officer");
        assert_eq!(m.version, "1.0.0");
        assert_eq!(m.capabilities, vec!["control_mapping", "risk_ranking"]);
        assert_eq!(m.tools, vec!["policy_repository"]);
        assert!(m.rule_sets.is_empty());
    }

    #[test]
    fn test_legacy_namespace_fallback() {
        let ttl = r#"
@prefix core: <https://mcp-framework.dev/schema/core#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .

<https://models.example/legacy_analyst> rdf:type core:DomainModel ;
    core:domainName "Legacy Analyst" ;
    core:description "Pre-migration model" ;
    core:version "0.9.0" ;
    core:capability "trend_review" .
"#;
        let model = parse(ttl, "legacy.ttl").unwrap();
        // No id predicate in either namespace: derived from the local name.
        assert_eq!(model.metadata.domain_id, "legacy_analyst");
        assert_eq!(model.metadata.domain_name, "Legacy Analyst");
        assert_eq!(model.metadata.capabilities, vec!["trend_review"]);
    }

    #[test]
    fn test_blank_subject_without_id_gets_placeholder() {
        let ttl = r#"
@prefix dm: <https://mcp-framework.dev/schema/domain-model#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .

_:m rdf:type dm:DomainModel ;
    dm:domainName "Anonymous" ;
    dm:description "No subject IRI" ;
    dm:version "1.0.0" .
"#;
        let model = parse(ttl, "anon.ttl").unwrap();
        assert_eq!(model.metadata.domain_id, FALLBACK_DOMAIN_ID);
    }

    #[test]
    fn test_missing_subject_errors() {
        let ttl = r#"
@prefix ex: <http://example.com/> .
ex:thing ex:name "not a domain model" .
"#;
        assert!(matches!(
            parse(ttl, "other.ttl"),
            Err(ParseError::MissingSubject(_))
        ));
    }

    #[test]
    fn test_missing_required_predicate_errors() {
        let ttl = r#"
@prefix dm: <https://mcp-framework.dev/schema/domain-model#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .

<https://models.example/partial> rdf:type dm:DomainModel ;
    dm:domainName "Partial" ;
    dm:version "1.0.0" .
"#;
        match parse(ttl, "partial.ttl") {
            Err(ParseError::MissingRequiredPredicate(p)) => assert_eq!(p, "description"),
            other => panic!("expected missing predicate, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_turtle_is_syntax_error() {
        assert!(matches!(
            parse("@prefix broken", "broken.ttl"),
            Err(ParseError::Syntax { .. })
        ));
    }
}
