//! Helper method registry
//!
//! The machinery that builds surrogates adds methods of its own (override
//! setters, ledger accessors). Those are implementation artifacts, not
//! contract members, so every comparison excludes them. The registry is
//! passed to the comparer explicitly; there is no process-wide state.

use crate::types::MethodKind;
use rustc_hash::{FxHashMap, FxHashSet};

/// Set of (kind, name) pairs that are never part of a surrogate's contract
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelperRegistry {
    helpers: FxHashMap<MethodKind, FxHashSet<String>>,
}

impl HelperRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as a helper in the `kind` namespace
    pub fn register(&mut self, kind: MethodKind, name: impl Into<String>) {
        self.helpers.entry(kind).or_default().insert(name.into());
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, kind: MethodKind, name: impl Into<String>) -> Self {
        self.register(kind, name);
        self
    }

    /// True when `name` is a helper in the `kind` namespace
    pub fn is_helper(&self, kind: MethodKind, name: &str) -> bool {
        self.helpers
            .get(&kind)
            .map_or(false, |names| names.contains(name))
    }

    /// Add every helper from `other`
    pub fn merge(&mut self, other: &HelperRegistry) {
        for (kind, names) in &other.helpers {
            self.helpers
                .entry(*kind)
                .or_default()
                .extend(names.iter().cloned());
        }
    }

    /// Helper names of `kind`, sorted
    pub fn names(&self, kind: MethodKind) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .helpers
            .get(&kind)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Number of registered helpers
    pub fn len(&self) -> usize {
        self.helpers.values().map(|names| names.len()).sum()
    }

    /// True when no helpers are registered
    pub fn is_empty(&self) -> bool {
        self.helpers.values().all(|names| names.is_empty())
    }
}
