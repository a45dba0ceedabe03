//! HTTP cache control module
//!
//! Provides `ETag` generation and conditional request handling. Structure
//! files change rarely, so conditional GET saves the viewer a refetch of
//! multi-megabyte models.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from file content using fast hashing
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if the client's `If-None-Match` header matches the server's `ETag`
///
/// Handles a single `ETag`, a comma-separated list, and the `*` wildcard.
/// Returns true if matched (respond 304).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}
