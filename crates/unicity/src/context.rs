//! Validation context and output types
//!
//! `ValidationContext` is created once per validation run and holds:
//! - The reference document searched for duplicates (may be absent)
//! - The duplicate-set cache for this run
//! - Accumulated errors and warnings
//!
//! A new run means a new context, and with it an empty cache.

use std::cell::RefCell;

use serde_json::Value;

use crate::cache::DuplicateCache;
use crate::error::{ValidationError, ValidationWarning};
use crate::path::SearchPaths;

// =============================================================================
// ValidationOutput (final result for public API)
// =============================================================================

/// Final validation output returned to callers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationOutput {
    /// No errors were recorded
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

// =============================================================================
// ValidationState (internal mutable state)
// =============================================================================

#[derive(Debug, Default)]
struct ValidationState {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationState {
    fn record_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    fn record_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    fn finish(self) -> ValidationOutput {
        ValidationOutput {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

// =============================================================================
// ValidationContext
// =============================================================================

/// Per-run context shared by reference with every check.
///
/// Uses interior mutability (RefCell) so checks can fill the cache and
/// record errors through `&self`.
pub struct ValidationContext<'doc> {
    document: Option<&'doc Value>,
    cache: RefCell<DuplicateCache<'doc>>,
    state: RefCell<ValidationState>,
}

impl<'doc> ValidationContext<'doc> {
    pub fn new(document: &'doc Value) -> Self {
        Self::from_option(Some(document))
    }

    /// A context without a reference document. Every check fails with
    /// [`UniqueViolation::MissingContext`](crate::UniqueViolation::MissingContext).
    pub fn detached() -> Self {
        Self::from_option(None)
    }

    pub fn from_option(document: Option<&'doc Value>) -> Self {
        Self {
            document,
            cache: RefCell::new(DuplicateCache::new()),
            state: RefCell::new(ValidationState::default()),
        }
    }

    pub fn document(&self) -> Option<&'doc Value> {
        self.document
    }

    /// Whether the reference document is `data` itself, so candidates taken
    /// from `data` have a position inside it.
    pub fn searches(&self, data: &Value) -> bool {
        self.document.is_some_and(|document| std::ptr::eq(document, data))
    }

    /// Count-based duplicate check against the cached set for `paths`.
    ///
    /// Returns `None` when the context has no document.
    pub fn is_duplicate(&self, value: &Value, paths: &SearchPaths) -> Option<bool> {
        let document = self.document?;
        let mut cache = self.cache.borrow_mut();
        Some(crate::resolve::is_duplicate(
            value, paths, document, &mut cache,
        ))
    }

    /// Whether `value` occurs at all along `paths`, for candidates that do
    /// not come from the reference document.
    ///
    /// Returns `None` when the context has no document.
    pub fn is_present(&self, value: &Value, paths: &SearchPaths) -> Option<bool> {
        let document = self.document?;
        let mut cache = self.cache.borrow_mut();
        Some(crate::resolve::is_present(
            value, paths, document, &mut cache,
        ))
    }

    /// Number of duplicate sets expanded during this run.
    pub fn cache_builds(&self) -> usize {
        self.cache.borrow().builds()
    }

    pub fn record_error(&self, error: ValidationError) {
        self.state.borrow_mut().record_error(error);
    }

    pub fn record_warning(&self, warning: ValidationWarning) {
        self.state.borrow_mut().record_warning(warning);
    }

    /// Consume context and produce final output.
    pub fn finish(self) -> ValidationOutput {
        self.state.into_inner().finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_detached_context_has_no_answer() {
        let ctx = ValidationContext::detached();
        assert!(ctx.document().is_none());
        assert_eq!(ctx.is_duplicate(&json!(1), &SearchPaths::single("ids.[]")), None);
    }

    #[test]
    fn test_context_reuses_cache() {
        let doc = json!({"ids": [1, 2, 2]});
        let ctx = ValidationContext::new(&doc);
        let paths = SearchPaths::single("ids.[]");

        assert_eq!(ctx.is_duplicate(&json!(1), &paths), Some(false));
        assert_eq!(ctx.is_duplicate(&json!(2), &paths), Some(true));
        assert_eq!(ctx.cache_builds(), 1);
    }

    #[test]
    fn test_new_context_starts_with_empty_cache() {
        let doc = json!({"ids": [1]});
        let paths = SearchPaths::single("ids.[]");

        let first = ValidationContext::new(&doc);
        first.is_duplicate(&json!(1), &paths);
        assert_eq!(first.cache_builds(), 1);

        let second = ValidationContext::new(&doc);
        assert_eq!(second.cache_builds(), 0);
    }

    #[test]
    fn test_searches_only_the_same_document() {
        let stored = json!({"ids": [1]});
        let submitted = json!({"ids": [1]});
        let ctx = ValidationContext::new(&stored);

        assert!(ctx.searches(&stored));
        assert!(!ctx.searches(&submitted));
        assert!(!ValidationContext::detached().searches(&stored));

        let paths = SearchPaths::single("ids.[]");
        assert_eq!(ctx.is_duplicate(&json!(1), &paths), Some(false));
        assert_eq!(ctx.is_present(&json!(1), &paths), Some(true));
        assert_eq!(ctx.cache_builds(), 1);
    }

    #[test]
    fn test_finish_without_errors_is_valid() {
        let ctx = ValidationContext::detached();
        let output = ctx.finish();
        assert!(output.is_valid);
        assert!(output.errors.is_empty());
    }
}
