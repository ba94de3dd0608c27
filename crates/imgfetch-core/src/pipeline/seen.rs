//! Content hashes already saved during one run.

use std::collections::HashSet;

/// SHA-256 hex digests of every unique image saved so far in a run.
///
/// Owned by the caller and passed into the pipeline; grows monotonically and
/// is never persisted.
#[derive(Debug, Clone, Default)]
pub struct SeenHashes {
    hashes: HashSet<String>,
}

impl SeenHashes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `hash`. Returns false if it was already present.
    pub fn insert(&mut self, hash: String) -> bool {
        self.hashes.insert(hash)
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
