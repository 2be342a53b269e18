//! Uniqueness constraints for values in nested JSON documents.
//!
//! Given a value found somewhere in a document, decide whether an equal value
//! occurs elsewhere along one or more search paths such as
//! `records.[].id` (where `[]` fans out over every array element).
//!
//! ```
//! use serde_json::json;
//! use unicity::{SearchPaths, UniqueConstraint, UniqueRule, validate};
//!
//! let doc = json!({"records": [{"id": 1}, {"id": 2}, {"id": 2}]});
//! let rule = UniqueRule::new(
//!     "records.[].id",
//!     UniqueConstraint::new("record-ids", SearchPaths::single("records.[].id")).unwrap(),
//! );
//!
//! let output = validate(&doc, Some(&doc), &[rule]);
//! assert!(!output.is_valid);
//! assert_eq!(output.errors.len(), 2);
//! ```

pub mod cache;
pub mod constraint;
pub mod context;
pub mod error;
pub mod expand;
pub mod path;
pub mod resolve;
pub mod validate;
pub mod value;

pub use cache::{CacheKey, DuplicateCache, DuplicateSet};
pub use constraint::{UniqueConstraint, UniquePolicy};
pub use context::{ValidationContext, ValidationOutput};
pub use error::{ConstraintError, UniqueViolation, ValidationError, ValidationWarning};
pub use expand::{expand, expand_all, matches};
pub use path::{Position, PositionSegment, SearchPath, SearchPaths, Segment};
pub use resolve::{find_duplicate, find_duplicate_in, is_duplicate, is_present};
pub use validate::{UniqueRule, validate, validate_rule};
