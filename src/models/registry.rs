//! Registry of loaded domain models with per-id version history.
//!
//! Every id keeps its full version history; a single current pointer per id
//! is updated on registration using the numeric version comparator, with
//! ties going to the most recent registration. History entries are never
//! overwritten by the current-pointer logic and never removed.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::metadata::{DomainModel, DomainModelMetadata};
use super::version::compare_versions;

#[derive(Default)]
struct RegistryInner {
    current: HashMap<String, Arc<DomainModel>>,
    history: HashMap<String, HashMap<String, Arc<DomainModel>>>,
}

/// Thread-safe registry of domain models.
pub struct ModelRegistry {
    inner: RwLock<RegistryInner>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner::default()),
        }
    }

    /// Register a model under its `domain_id` and version.
    ///
    /// The current pointer moves to the incoming model when there is no
    /// current model for the id, or when the incoming version compares
    /// greater than or equal to the current one.
    pub fn register(&self, model: Arc<DomainModel>) {
        let domain_id = model.metadata.domain_id.clone();
        let version = model.metadata.version.clone();

        let mut inner = self.inner.write();
        inner
            .history
            .entry(domain_id.clone())
            .or_default()
            .insert(version.clone(), model.clone());

        let take_current = match inner.current.get(&domain_id) {
            None => true,
            Some(current) => compare_versions(&version, &current.metadata.version).is_ge(),
        };
        if take_current {
            inner.current.insert(domain_id.clone(), model);
        }

        tracing::info!(
            domain_id = %domain_id,
            version = %version,
            current = take_current,
            "registered domain model"
        );
    }

    /// Fetch a model by id, optionally pinned to an exact version.
    pub fn get(&self, domain_id: &str, version: Option<&str>) -> Option<Arc<DomainModel>> {
        let inner = self.inner.read();
        match version {
            Some(v) => inner.history.get(domain_id)?.get(v).cloned(),
            None => inner.current.get(domain_id).cloned(),
        }
    }

    /// Metadata of every id's current model.
    pub fn list_all(&self) -> Vec<DomainModelMetadata> {
        self.inner
            .read()
            .current
            .values()
            .map(|m| m.metadata.clone())
            .collect()
    }

    /// All known versions for an id, newest first.
    pub fn get_versions(&self, domain_id: &str) -> Vec<String> {
        let inner = self.inner.read();
        let mut versions: Vec<String> = inner
            .history
            .get(domain_id)
            .map(|h| h.keys().cloned().collect())
            .unwrap_or_default();
        versions.sort_by(|a, b| compare_versions(b, a));
        versions
    }

    /// Number of distinct registered ids.
    pub fn count(&self) -> usize {
        self.inner.read().current.len()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
