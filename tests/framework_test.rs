//! End-to-end tests for DomainModelFramework - the full load, parse,
//! validate, register, cache pipeline behind one facade.

use std::fs;
use std::path::Path;
use std::time::Duration;

use dm_core::{DomainModelFramework, FrameworkConfig, FrameworkError};
use tempfile::TempDir;

const COMPLIANCE_TTL: &str = r#"
@prefix dm: <https://mcp-framework.dev/schema/domain-model#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .

<https://models.example/compliance_officer> rdf:type dm:DomainModel ;
    dm:domainId "compliance_officer" ;
    dm:domainName "Compliance Officer" ;
    dm:description "Regulatory compliance reasoning and control mapping" ;
    dm:version "1.0.0" ;
    dm:capability "risk_ranking" ;
    dm:capability "control_mapping" .
"#;

fn framework_for(dir: &TempDir) -> DomainModelFramework {
    DomainModelFramework::new(FrameworkConfig {
        base_dir: dir.path().to_path_buf(),
        framework_version: "1.0.0".to_string(),
        default_cache_ttl: Duration::from_secs(300),
    })
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[tokio::test]
async fn test_end_to_end_graph_load_and_cache_hit() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "compliance-officer.ttl", COMPLIANCE_TTL);
    let framework = framework_for(&dir);

    let model = framework
        .load_domain_model("compliance-officer.ttl")
        .await
        .unwrap();
    assert_eq!(model.metadata.domain_id, "compliance_officer");

    let metrics = framework.metrics();
    assert_eq!(metrics.load_count, 1);
    assert_eq!(metrics.parse_error_count, 0);
    assert_eq!(metrics.validation_error_count, 0);

    let fetched = framework.get_domain_model("compliance_officer", None).unwrap();
    assert_eq!(
        fetched.metadata.capabilities,
        vec!["control_mapping", "risk_ranking"]
    );
    assert_eq!(framework.cache_statistics().hits, 1);
}

#[tokio::test]
async fn test_validation_failure_lists_every_failing_field() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "invalid-model.json",
        r#"{
            "metadata": {
                "domain_id": "incomplete",
                "domain_name": "",
                "description": "",
                "version": "1"
            },
            "content": {}
        }"#,
    );
    let framework = framework_for(&dir);

    let err = framework
        .load_domain_model("invalid-model.json")
        .await
        .unwrap_err();
    match err {
        FrameworkError::ValidationFailed { details, .. } => {
            assert!(details.contains("domain_name"));
            assert!(details.contains("description"));
            assert!(details.contains("version"));
        }
        other => panic!("expected validation failure, got {other}"),
    }

    assert_eq!(framework.metrics().validation_error_count, 1);
    assert_eq!(framework.metrics().load_count, 0);
    // No partial registration on failure.
    assert!(framework.get_domain_model("incomplete", None).is_none());
}

#[tokio::test]
async fn test_parse_failure_wraps_path_and_counts() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "broken.json", "{not json");
    let framework = framework_for(&dir);

    let err = framework.load_domain_model("broken.json").await.unwrap_err();
    match err {
        FrameworkError::Parse { path, .. } => assert!(path.contains("broken.json")),
        other => panic!("expected parse failure, got {other}"),
    }
    assert_eq!(framework.metrics().parse_error_count, 1);
}

#[tokio::test]
async fn test_incompatible_major_version_rejected() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "future.json",
        r#"{
            "domain_id": "futurist",
            "domain_name": "Futurist",
            "description": "From a newer framework generation",
            "version": "2.0.0"
        }"#,
    );
    let framework = framework_for(&dir);

    let err = framework.load_domain_model("future.json").await.unwrap_err();
    match err {
        FrameworkError::ValidationFailed { details, .. } => {
            assert!(details.contains("2.0.0"));
            assert!(details.contains("1.0.0"));
        }
        other => panic!("expected validation failure, got {other}"),
    }
}

#[tokio::test]
async fn test_version_history_and_pinned_get() {
    let dir = TempDir::new().unwrap();
    for (name, version) in [
        ("model-1.json", "1.0.0"),
        ("model-2.json", "2.1.0"),
        ("model-3.json", "1.9.9"),
    ] {
        write(
            dir.path(),
            name,
            &format!(
                r#"{{
                    "domain_id": "strategist",
                    "domain_name": "Strategist",
                    "description": "versioned model",
                    "version": "{version}"
                }}"#
            ),
        );
    }
    // Framework version 2.x so a 2.1.0 model passes compatibility.
    let framework = DomainModelFramework::new(FrameworkConfig {
        base_dir: dir.path().to_path_buf(),
        framework_version: "2.0.0".to_string(),
        default_cache_ttl: Duration::from_secs(300),
    });

    for name in ["model-1.json", "model-2.json", "model-3.json"] {
        framework.load_domain_model(name).await.unwrap();
    }

    let current = framework.get_domain_model("strategist", None).unwrap();
    assert_eq!(current.metadata.version, "2.1.0");
    assert_eq!(
        framework.model_versions("strategist"),
        vec!["2.1.0", "1.9.9", "1.0.0"]
    );

    let pinned = framework.get_domain_model("strategist", Some("1.0.0")).unwrap();
    assert_eq!(pinned.metadata.version, "1.0.0");
    assert!(framework
        .get_domain_model("strategist", Some("9.9.9"))
        .is_none());
}

// Freshness policy: a versionless get never serves a cached entry the
// registry's current pointer has superseded.
#[tokio::test]
async fn test_versionless_get_tracks_registry_current() {
    let dir = TempDir::new().unwrap();
    let framework = DomainModelFramework::new(FrameworkConfig {
        base_dir: dir.path().to_path_buf(),
        framework_version: "2.0.0".to_string(),
        default_cache_ttl: Duration::from_secs(300),
    });

    write(
        dir.path(),
        "v1.json",
        r#"{"domain_id": "planner", "domain_name": "Planner",
            "description": "first", "version": "1.0.0"}"#,
    );
    framework.load_domain_model("v1.json").await.unwrap();

    // Pin the cache to 1.0.0 via a versioned read, then advance the
    // registry to 2.0.0.
    framework.get_domain_model("planner", Some("1.0.0")).unwrap();
    write(
        dir.path(),
        "v2.json",
        r#"{"domain_id": "planner", "domain_name": "Planner",
            "description": "second", "version": "2.0.0"}"#,
    );
    framework.load_domain_model("v2.json").await.unwrap();
    framework.invalidate_cached("planner");
    framework.get_domain_model("planner", Some("1.0.0")).unwrap();

    // The cache now holds 1.0.0 but current is 2.0.0.
    let current = framework.get_domain_model("planner", None).unwrap();
    assert_eq!(current.metadata.version, "2.0.0");
}

#[tokio::test]
async fn test_load_many_collects_per_file_results() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "good.json",
        r#"{"domain_id": "good", "domain_name": "Good",
            "description": "loads fine", "version": "1.0.0"}"#,
    );
    write(dir.path(), "bad.json", "{broken");
    let framework = framework_for(&dir);

    let results = framework
        .load_many(&[
            "good.json".to_string(),
            "bad.json".to_string(),
            "absent.json".to_string(),
        ])
        .await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(FrameworkError::Parse { .. })));
    assert!(matches!(results[2], Err(FrameworkError::Load(_))));

    let metrics = framework.metrics();
    assert_eq!(metrics.load_count, 1);
    assert_eq!(metrics.parse_error_count, 1);
}

#[tokio::test]
async fn test_cache_expiry_falls_back_to_registry() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "ephemeral.json",
        r#"{"domain_id": "ephemeral", "domain_name": "Ephemeral",
            "description": "short ttl", "version": "1.0.0"}"#,
    );
    let framework = DomainModelFramework::new(FrameworkConfig {
        base_dir: dir.path().to_path_buf(),
        framework_version: "1.0.0".to_string(),
        default_cache_ttl: Duration::ZERO,
    });

    framework.load_domain_model("ephemeral.json").await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    // Entry expired: the lookup misses, then the registry repopulates.
    let model = framework.get_domain_model("ephemeral", None).unwrap();
    assert_eq!(model.metadata.domain_id, "ephemeral");
    assert_eq!(framework.cache_statistics().misses, 1);

    let unknown = framework.get_domain_model("never_loaded", None);
    assert!(unknown.is_none());
}
