//! Error types
//!
//! - `UniqueViolation`: the two outcomes a constraint check can fail with
//! - `ConstraintError`: invalid constraint construction
//! - `ValidationError` / `ValidationWarning`: accumulated by the host driver

use serde_json::Value;
use thiserror::Error;

use crate::path::Position;
use crate::value::render_value;

// =============================================================================
// UniqueViolation (result of a single check)
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UniqueViolation {
    /// No reference document was supplied for the run.
    ///
    /// Never treated as "unique": the caller has misconfigured the run.
    #[error(
        "The data to look for duplicate values in must be passed in the context (rule '{rule}')"
    )]
    MissingContext { rule: String },

    /// An equal value exists elsewhere along the rule's search paths.
    #[error(
        "\"{}\" was required to be unique, but duplicate found{}",
        render_value(.value),
        render_conflict(.position)
    )]
    DuplicateFound {
        rule: String,
        value: Value,
        /// Conflicting location, known only to position-aware checks
        position: Option<Position>,
    },
}

impl UniqueViolation {
    pub fn rule(&self) -> &str {
        match self {
            UniqueViolation::MissingContext { rule } => rule,
            UniqueViolation::DuplicateFound { rule, .. } => rule,
        }
    }

    pub fn is_missing_context(&self) -> bool {
        matches!(self, UniqueViolation::MissingContext { .. })
    }
}

fn render_conflict(position: &Option<Position>) -> String {
    position
        .as_ref()
        .map(|position| format!(" at \"{position}\""))
        .unwrap_or_default()
}

// =============================================================================
// ConstraintError
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("rule '{name}' declares no search paths")]
    NoSearchPaths { name: String },

    #[error("rule name must not be empty")]
    EmptyName,
}

// =============================================================================
// ValidationError / ValidationWarning (host driver output)
// =============================================================================

/// A violation found while validating one candidate.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{path}: {violation}")]
pub struct ValidationError {
    /// Location of the candidate that failed
    pub path: Position,
    pub violation: UniqueViolation,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationWarning {
    #[error("{path}: rule '{rule}' skipped a non-scalar value")]
    NonScalarCandidate { rule: String, path: Position },

    #[error("rule '{rule}' matched no values for target '{target}'")]
    NoCandidates { rule: String, target: String },
}
