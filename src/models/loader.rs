//! Domain model file loading and format detection.
//!
//! Format detection is pure and keys off the final extension only,
//! case-insensitively, failing closed on anything unrecognized. Path
//! resolution joins relative paths against the configured base directory;
//! containment of user-submitted paths inside an allowed root is the
//! calling surface's responsibility, not this loader's.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::metadata::DomainModelFormat;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unsupported domain model format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Domain model file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One successfully loaded source file.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub content: String,
    pub format: DomainModelFormat,
    pub resolved_path: PathBuf,
}

/// Detect the source format from a file name's extension.
pub fn detect_format(file_name: &str) -> Result<DomainModelFormat, LoadError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("ttl") | Some("turtle") => Ok(DomainModelFormat::Turtle),
        Some("json") => Ok(DomainModelFormat::Json),
        Some("md") | Some("markdown") | Some("mkd") => Ok(DomainModelFormat::Markdown),
        _ => Err(LoadError::UnsupportedFormat(PathBuf::from(file_name))),
    }
}

/// Loads domain model files from the filesystem.
pub struct ModelLoader {
    base_dir: PathBuf,
}

impl ModelLoader {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a caller-supplied path to an existing regular file.
    ///
    /// Absolute paths are used as-is; relative paths are joined with the
    /// base directory and canonicalized.
    pub fn resolve_path(&self, file_path: &str) -> Result<PathBuf, LoadError> {
        let candidate = Path::new(file_path);
        let joined = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.base_dir.join(candidate)
        };

        let resolved = joined
            .canonicalize()
            .map_err(|_| LoadError::NotFound(joined.clone()))?;

        if !resolved.is_file() {
            return Err(LoadError::NotFound(resolved));
        }
        Ok(resolved)
    }

    /// Resolve, detect format, and read full UTF-8 content.
    pub async fn load_file(&self, file_path: &str) -> Result<LoadedFile, LoadError> {
        let resolved = self.resolve_path(file_path)?;
        let file_name = resolved
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file_path);
        let format = detect_format(file_name)?;

        let content = tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|source| LoadError::Io {
                path: resolved.clone(),
                source,
            })?;

        tracing::debug!(path = %resolved.display(), format = %format, "loaded model file");

        Ok(LoadedFile {
            content,
            format,
            resolved_path: resolved,
        })
    }

    /// Load several files concurrently.
    ///
    /// Results come back in input order, one per path; a failing path
    /// yields its own error without blocking the rest of the batch.
    pub async fn load_multiple(
        &self,
        file_paths: &[String],
    ) -> Vec<Result<LoadedFile, LoadError>> {
        let loads = file_paths.iter().map(|p| self.load_file(p));
        futures::future::join_all(loads).await
    }
}
