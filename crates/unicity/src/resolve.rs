//! Duplicate resolution
//!
//! Two policies decide whether a candidate value is duplicated:
//!
//! - Position-aware ([`find_duplicate`]): walks the document tracking the
//!   position of every match, and reports the first strictly-equal value
//!   whose position differs from the candidate's own. No caching; O(D) per
//!   lookup.
//! - Count-based ([`is_duplicate`]): expands all search paths once per run
//!   into a cached set and reports a duplicate when the value occurs more
//!   than once. A search path that includes the candidate's own field
//!   contributes exactly one occurrence by construction, so a lone
//!   occurrence is never flagged.
//!
//! The policies can disagree when the candidate's own position is not
//! reachable by any search path: a single equal value elsewhere is a
//! duplicate to the position-aware policy and unique to the count-based one.
//!
//! A candidate taken from a different document than the one searched has no
//! position there. Position-aware search then excludes nothing, and the
//! count-based check asks [`is_present`] instead of [`is_duplicate`].

use serde_json::Value;
use tracing::debug;

use crate::cache::DuplicateCache;
use crate::expand::matches;
use crate::path::{Position, SearchPath, SearchPaths};
use crate::value::strict_eq;

/// First position along `path` holding a value equal to `value`, other than
/// `own_position`.
///
/// `own_position` is `None` when the candidate does not live in `document`.
pub fn find_duplicate(
    value: &Value,
    path: &SearchPath,
    document: &Value,
    own_position: Option<&Position>,
) -> Option<Position> {
    let found = matches(path, document)
        .find(|(position, candidate)| {
            own_position != Some(position) && strict_eq(candidate, value)
        })
        .map(|(position, _)| position);
    if let Some(position) = &found {
        debug!(path = %path, at = %position, "duplicate found");
    }
    found
}

/// [`find_duplicate`] over alternates, in declaration order.
pub fn find_duplicate_in(
    value: &Value,
    paths: &SearchPaths,
    document: &Value,
    own_position: Option<&Position>,
) -> Option<Position> {
    paths
        .iter()
        .find_map(|path| find_duplicate(value, path, document, own_position))
}

/// Whether `value` occurs more than once across all `paths`.
pub fn is_duplicate<'doc>(
    value: &Value,
    paths: &SearchPaths,
    document: &'doc Value,
    cache: &mut DuplicateCache<'doc>,
) -> bool {
    cache.get_or_build(paths, document).is_duplicate(value)
}

/// Whether `value` occurs anywhere across `paths`.
pub fn is_present<'doc>(
    value: &Value,
    paths: &SearchPaths,
    document: &'doc Value,
    cache: &mut DuplicateCache<'doc>,
) -> bool {
    cache.get_or_build(paths, document).contains(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn makes() -> Value {
        json!({
            "makes": [
                {"id": "nissan", "alternateIds": ["datsun"]},
                {"id": "toyota"},
            ]
        })
    }

    fn id_at(index: usize) -> Position {
        Position::root().key("makes").index(index).key("id")
    }

    #[test]
    fn test_value_does_not_match_itself() {
        let doc = makes();
        let path = SearchPath::parse("makes.[].id");
        assert_eq!(find_duplicate(&json!("toyota"), &path, &doc, Some(&id_at(1))), None);
    }

    #[test]
    fn test_equal_value_elsewhere_is_duplicate() {
        let mut doc = makes();
        doc["makes"]
            .as_array_mut()
            .unwrap()
            .push(json!({"id": "toyota"}));
        let path = SearchPath::parse("makes.[].id");

        assert_eq!(
            find_duplicate(&json!("toyota"), &path, &doc, Some(&id_at(2))),
            Some(id_at(1))
        );
        assert_eq!(
            find_duplicate(&json!("toyota"), &path, &doc, Some(&id_at(1))),
            Some(id_at(2))
        );
    }

    #[test]
    fn test_alternate_paths_searched_in_order() {
        let doc = makes();
        let paths: SearchPaths = ["makes.[].id", "makes.[].alternateIds.[]"]
            .into_iter()
            .collect();

        let found = find_duplicate_in(&json!("datsun"), &paths, &doc, Some(&id_at(2)));
        assert_eq!(
            found,
            Some(Position::root().key("makes").index(0).key("alternateIds").index(0))
        );
        assert_eq!(find_duplicate_in(&json!("honda"), &paths, &doc, Some(&id_at(2))), None);
    }

    #[test]
    fn test_count_policy_ignores_single_occurrence() {
        let doc = makes();
        let mut cache = DuplicateCache::new();
        let paths = SearchPaths::single("makes.[].id");

        assert!(!is_duplicate(&json!("toyota"), &paths, &doc, &mut cache));
        assert!(!is_duplicate(&json!("nissan"), &paths, &doc, &mut cache));
    }

    #[test]
    fn test_foreign_candidate_matches_any_position() {
        let doc = makes();
        let path = SearchPath::parse("makes.[].id");
        let mut cache = DuplicateCache::new();
        let paths = SearchPaths::single("makes.[].id");

        assert_eq!(find_duplicate(&json!("toyota"), &path, &doc, None), Some(id_at(1)));
        assert!(is_present(&json!("toyota"), &paths, &doc, &mut cache));
        assert!(!is_present(&json!("honda"), &paths, &doc, &mut cache));
        assert_eq!(cache.builds(), 1);
    }

    #[test]
    fn test_policies_disagree_when_own_position_is_unreachable() {
        let doc = makes();
        let paths = SearchPaths::single("makes.[].alternateIds.[]");
        let mut cache = DuplicateCache::new();

        assert!(find_duplicate_in(&json!("datsun"), &paths, &doc, Some(&id_at(2))).is_some());
        assert!(!is_duplicate(&json!("datsun"), &paths, &doc, &mut cache));
    }
}
