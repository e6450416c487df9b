//! Pipeline facade: load, parse, validate, register, cache.
//!
//! `DomainModelFramework` owns one instance of every pipeline stage, so
//! tests can construct independent frameworks without shared state. Reads
//! consult the cache first and fall back to the registry, repopulating the
//! cache on the way out.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::models::cache::{CacheStatistics, ModelCache};
use crate::models::loader::{LoadError, ModelLoader};
use crate::models::metadata::{DomainModel, DomainModelMetadata, Severity};
use crate::models::registry::ModelRegistry;
use crate::models::validator::ModelValidator;
use crate::parsers::{ModelParser, ParseError};

#[derive(Error, Debug)]
pub enum FrameworkError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to parse domain model {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("Domain model validation failed for {path}: {details}")]
    ValidationFailed { path: String, details: String },
}

/// Configuration accepted by the facade at construction.
#[derive(Debug, Clone)]
pub struct FrameworkConfig {
    pub base_dir: PathBuf,
    pub framework_version: String,
    pub default_cache_ttl: Duration,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(".mcp/domain-models"),
            framework_version: "1.0.0".to_string(),
            default_cache_ttl: Duration::from_secs(300),
        }
    }
}

/// Snapshot of pipeline counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameworkMetrics {
    pub load_count: u64,
    pub parse_error_count: u64,
    pub validation_error_count: u64,
}

/// Main interface for domain model management.
pub struct DomainModelFramework {
    loader: ModelLoader,
    parser: ModelParser,
    validator: ModelValidator,
    registry: ModelRegistry,
    cache: ModelCache,
    load_count: AtomicU64,
    parse_error_count: AtomicU64,
    validation_error_count: AtomicU64,
}

impl DomainModelFramework {
    pub fn new(config: FrameworkConfig) -> Self {
        Self {
            loader: ModelLoader::new(config.base_dir),
            parser: ModelParser::new(),
            validator: ModelValidator::new(config.framework_version),
            registry: ModelRegistry::new(),
            cache: ModelCache::new(config.default_cache_ttl),
            load_count: AtomicU64::new(0),
            parse_error_count: AtomicU64::new(0),
            validation_error_count: AtomicU64::new(0),
        }
    }

    /// Run the full pipeline for one file: load, parse, validate, register,
    /// cache. Any failure aborts the pipeline for that file with no partial
    /// registration.
    pub async fn load_domain_model(
        &self,
        file_path: &str,
    ) -> Result<Arc<DomainModel>, FrameworkError> {
        let loaded = self.loader.load_file(file_path).await?;
        let resolved = loaded.resolved_path.display().to_string();

        let model = self
            .parser
            .parse(&loaded.content, loaded.format, &resolved)
            .map_err(|source| {
                self.parse_error_count.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(path = %resolved, error = %source, "domain model parse failed");
                FrameworkError::Parse {
                    path: resolved.clone(),
                    source,
                }
            })?;

        let result = self.validator.validate(&model);
        for warning in result
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
        {
            tracing::warn!(
                path = %resolved,
                field = %warning.field,
                "validation warning: {}",
                warning.message
            );
        }
        if !result.is_valid {
            self.validation_error_count.fetch_add(1, Ordering::Relaxed);
            let details = result
                .errors()
                .map(|i| format!("{}: {}", i.field, i.message))
                .collect::<Vec<_>>()
                .join("; ");
            tracing::warn!(path = %resolved, "domain model validation failed: {details}");
            return Err(FrameworkError::ValidationFailed {
                path: resolved,
                details,
            });
        }

        let model = Arc::new(model);
        self.registry.register(model.clone());
        self.cache
            .put(&model.metadata.domain_id, model.clone(), None);
        self.load_count.fetch_add(1, Ordering::Relaxed);

        tracing::info!(
            domain_id = %model.metadata.domain_id,
            version = %model.metadata.version,
            path = %model.metadata.file_path,
            "loaded domain model"
        );
        Ok(model)
    }

    /// Load several model files concurrently.
    ///
    /// Per-file results in input order; one failing file never aborts the
    /// rest of the batch.
    pub async fn load_many(
        &self,
        file_paths: &[String],
    ) -> Vec<Result<Arc<DomainModel>, FrameworkError>> {
        let loads = file_paths.iter().map(|p| self.load_domain_model(p));
        futures::future::join_all(loads).await
    }

    /// Resolve a model by id, cache first, registry as fallback.
    ///
    /// Versionless lookups verify the cached entry against the registry's
    /// current pointer; a cached version the registry has since superseded
    /// is dropped and re-fetched so callers never see a stale current.
    pub fn get_domain_model(
        &self,
        domain_id: &str,
        version: Option<&str>,
    ) -> Option<Arc<DomainModel>> {
        if let Some(cached) = self.cache.get(domain_id) {
            match version {
                Some(v) if cached.metadata.version == v => return Some(cached),
                Some(_) => {}
                None => match self.registry.get(domain_id, None) {
                    Some(current) if current.metadata.version == cached.metadata.version => {
                        return Some(cached);
                    }
                    Some(current) => {
                        self.cache.put(domain_id, current.clone(), None);
                        return Some(current);
                    }
                    None => return Some(cached),
                },
            }
        }

        let model = self.registry.get(domain_id, version)?;
        self.cache.put(domain_id, model.clone(), None);
        Some(model)
    }

    /// Metadata of every registered id's current model.
    pub fn list_models(&self) -> Vec<DomainModelMetadata> {
        self.registry.list_all()
    }

    /// Known versions for an id, newest first.
    pub fn model_versions(&self, domain_id: &str) -> Vec<String> {
        self.registry.get_versions(domain_id)
    }

    /// Drop one cached entry; registry history is untouched.
    pub fn invalidate_cached(&self, domain_id: &str) {
        self.cache.invalidate(domain_id);
    }

    /// Drop every cached entry; registry history is untouched.
    pub fn invalidate_all_cached(&self) {
        self.cache.invalidate_all();
    }

    pub fn cache_statistics(&self) -> CacheStatistics {
        self.cache.statistics()
    }

    pub fn metrics(&self) -> FrameworkMetrics {
        FrameworkMetrics {
            load_count: self.load_count.load(Ordering::Relaxed),
            parse_error_count: self.parse_error_count.load(Ordering::Relaxed),
            validation_error_count: self.validation_error_count.load(Ordering::Relaxed),
        }
    }
}
