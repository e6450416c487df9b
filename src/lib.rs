//! DM-CORE domain model pipeline
//!
//! An in-memory ingestion, validation, and caching pipeline for versioned
//! "domain model" documents describing reasoning personas. Three wire
//! formats (Turtle graphs, JSON records, Markdown prose with front matter)
//! normalize into one metadata contract.
//!
//! # Pipeline
//!
//! - **Load**: resolve against a base directory, detect format by
//!   extension, read UTF-8 content
//! - **Parse**: per-format extraction into one canonical metadata record
//!   plus a content payload
//! - **Validate**: required fields, semantic version shape, major-version
//!   compatibility with the framework
//! - **Register**: per-id version history with a current pointer
//! - **Cache**: TTL-bounded, hit/miss accounted, one lock per instance
//!
//! Durability is process-lifetime only: no persistence, no distributed
//! coordination, no schema migration.

pub mod config;
pub mod framework;
pub mod logging;
pub mod models;
pub mod parsers;

pub use framework::{DomainModelFramework, FrameworkConfig, FrameworkError, FrameworkMetrics};
pub use models::{
    CacheStatistics, DomainModel, DomainModelFormat, DomainModelMetadata, LoadError, ModelCache,
    ModelContent, ModelLoader, ModelRegistry, ModelValidator, Severity, ValidationIssue,
    ValidationResult,
};
pub use parsers::{ModelParser, ParseError};
