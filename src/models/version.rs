//! Semantic version parsing and ordering.
//!
//! Version strings are reduced to a `(major, minor, patch)` tuple. Missing
//! parts are zero-padded on the right, parts beyond the third are ignored,
//! and non-numeric parts read as zero. This comparator drives the registry's
//! current-pointer updates, `get_versions` ordering, and the validator's
//! major-version compatibility check.

use std::cmp::Ordering;

/// Parse a version string into a comparable 3-tuple.
pub fn parse_version(version: &str) -> (u64, u64, u64) {
    let mut parts = version
        .split('.')
        .map(|p| p.trim().parse::<u64>().unwrap_or(0));
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}

/// Tuple ordering over parsed versions.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    parse_version(a).cmp(&parse_version(b))
}

/// Major component only, for compatibility checks.
pub fn major_version(version: &str) -> u64 {
    parse_version(version).0
}
