//! Per-run duplicate-set cache.
//!
//! Bulk validation checks one candidate per array element, and every check
//! searches the same paths over the same document. The expanded value set is
//! built once per distinct [`SearchPaths`] and reused for the rest of the run.
//!
//! The cache borrows the document (`'doc`), so it cannot outlive it or be
//! reused against a different one.

use core::fmt::{self, Display};

use ahash::AHashMap;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::expand::expand_all;
use crate::path::{SearchPath, SearchPaths};
use crate::value::ScalarKey;

// =============================================================================
// CacheKey
// =============================================================================

/// Identity of an ordered set of search paths.
///
/// Hashes and compares like `[SearchPath]`, so lookups borrow the caller's
/// paths instead of cloning them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(Vec<SearchPath>);

impl CacheKey {
    pub fn new(paths: &SearchPaths) -> Self {
        CacheKey(paths.as_slice().to_vec())
    }
}

impl core::borrow::Borrow<[SearchPath]> for CacheKey {
    fn borrow(&self) -> &[SearchPath] {
        &self.0
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{path}")?;
        }
        Ok(())
    }
}

// =============================================================================
// DuplicateSet
// =============================================================================

/// Values reached by one set of search paths, in expansion order.
#[derive(Debug, Clone, Default)]
pub struct DuplicateSet<'doc> {
    values: Vec<&'doc Value>,
    /// Occurrences per scalar
    counts: AHashMap<ScalarKey<'doc>, usize>,
}

impl<'doc> DuplicateSet<'doc> {
    pub fn build(paths: &SearchPaths, document: &'doc Value) -> Self {
        let values = expand_all(paths, document);
        let mut counts = AHashMap::with_capacity(values.len());
        for key in values.iter().copied().filter_map(ScalarKey::of) {
            *counts.entry(key).or_insert(0) += 1;
        }
        Self { values, counts }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Strictly-equal occurrences of `value`, capped at `limit`.
    ///
    /// Arrays and objects never occur.
    pub fn occurrences(&self, value: &Value, limit: usize) -> usize {
        ScalarKey::of(value)
            .and_then(|key| self.counts.get(&key))
            .map_or(0, |&count| count.min(limit))
    }

    /// A value is duplicated when it occurs more than once.
    ///
    /// A single occurrence is never a duplicate, even when that occurrence is
    /// the candidate's own location.
    pub fn is_duplicate(&self, value: &Value) -> bool {
        self.occurrences(value, 2) > 1
    }

    /// Whether `value` occurs at all.
    pub fn contains(&self, value: &Value) -> bool {
        self.occurrences(value, 1) > 0
    }
}

// =============================================================================
// DuplicateCache
// =============================================================================

/// Memoized duplicate sets for one validation run.
#[derive(Debug, Default)]
pub struct DuplicateCache<'doc> {
    sets: IndexMap<CacheKey, DuplicateSet<'doc>>,
    builds: usize,
}

impl<'doc> DuplicateCache<'doc> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the set for `paths`, expanding `document` on first use.
    pub fn get_or_build(
        &mut self,
        paths: &SearchPaths,
        document: &'doc Value,
    ) -> &DuplicateSet<'doc> {
        if let Some(index) = self.sets.get_index_of(paths.as_slice()) {
            trace!(paths = %paths, "duplicate set cache hit");
            return &self.sets[index];
        }

        let key = CacheKey::new(paths);
        let set = DuplicateSet::build(paths, document);
        debug!(key = %key, values = set.len(), "built duplicate set");
        self.builds += 1;
        let (index, _) = self.sets.insert_full(key, set);
        &self.sets[index]
    }

    /// Number of expansions performed so far.
    pub fn builds(&self) -> usize {
        self.builds
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
