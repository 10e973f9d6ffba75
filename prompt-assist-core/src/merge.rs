//! Reconciliation of remote and local favorites.
//!
//! The result is the remote entries that local does not already have, in
//! remote order, followed by every local entry in local order. Local always
//! keeps its positions. Deletions do not propagate: an entry removed locally
//! but still present remotely comes back on the next pull.

use std::collections::HashSet;

/// Merges a remote favorites list into a local one.
pub fn merge(remote: &[String], local: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = local.iter().map(String::as_str).collect();
    let mut merged = Vec::with_capacity(remote.len() + local.len());

    for entry in remote {
        if seen.insert(entry.as_str()) {
            merged.push(entry.clone());
        }
    }
    merged.extend(local.iter().cloned());
    merged
}
