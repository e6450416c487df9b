//! Framework configuration loading from environment variables.
//!
//! All configuration values are loaded from `DM_CORE_*` environment
//! variables with sensible defaults. Invalid values fall back to defaults
//! without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `DM_CORE_BASE_DIR` | `.mcp/domain-models` | Base directory for model files |
//! | `DM_CORE_FRAMEWORK_VERSION` | `1.0.0` | Framework semantic version |
//! | `DM_CORE_CACHE_TTL` | 300 | Default cache TTL (secs) |
//! | `DM_CORE_LOG_FORMAT` | `json` | Log format (`json` or `pretty`) |
//! | `DM_CORE_LOG_LEVEL` | `info` | Log level filter |
//! | `DM_CORE_LOG_PATH` | (stderr) | Optional log file path |

use std::path::PathBuf;
use std::time::Duration;

use crate::framework::FrameworkConfig;
use crate::logging::{LogConfig, LogFormat};

/// All framework configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub framework: FrameworkConfig,
    pub log: LogConfig,
}

/// Parse a `u64` env var, returning `default` on missing or invalid.
fn parse_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(val) => val.parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load framework configuration from environment.
fn load_framework_config() -> FrameworkConfig {
    let defaults = FrameworkConfig::default();

    let base_dir = std::env::var("DM_CORE_BASE_DIR")
        .map(PathBuf::from)
        .unwrap_or(defaults.base_dir);

    let framework_version = parse_string("DM_CORE_FRAMEWORK_VERSION", &defaults.framework_version);
    let framework_version = if framework_version.trim().is_empty() {
        defaults.framework_version
    } else {
        framework_version
    };

    let ttl_secs = parse_u64("DM_CORE_CACHE_TTL", defaults.default_cache_ttl.as_secs());
    let ttl_secs = ttl_secs.max(1);

    FrameworkConfig {
        base_dir,
        framework_version,
        default_cache_ttl: Duration::from_secs(ttl_secs),
    }
}

/// Load logging configuration from environment.
fn load_log_config() -> LogConfig {
    let format = match parse_string("DM_CORE_LOG_FORMAT", "json").as_str() {
        "pretty" => LogFormat::Pretty,
        _ => LogFormat::Json,
    };
    let level = parse_string("DM_CORE_LOG_LEVEL", "info");
    let output_path = std::env::var("DM_CORE_LOG_PATH").ok().map(PathBuf::from);

    LogConfig {
        format,
        level,
        output_path,
    }
}

/// Load all configuration from environment variables.
///
/// Missing or invalid values fall back to safe defaults without panicking.
pub fn load() -> EnvConfig {
    EnvConfig {
        framework: load_framework_config(),
        log: load_log_config(),
    }
}
