//! Domain model management for DM-CORE.
//!
//! Holds the model data types plus the loading, versioning, validation,
//! registry, and caching stages of the ingestion pipeline.

pub mod cache;
pub mod loader;
pub mod metadata;
pub mod registry;
pub mod validator;
pub mod version;

pub use cache::{CacheStatistics, ModelCache};
pub use loader::{detect_format, LoadError, LoadedFile, ModelLoader};
pub use metadata::{
    DomainModel, DomainModelFormat, DomainModelMetadata, GraphTriple, ModelContent, Severity,
    ValidationIssue, ValidationResult,
};
pub use registry::ModelRegistry;
pub use validator::ModelValidator;
pub use version::{compare_versions, major_version, parse_version};
