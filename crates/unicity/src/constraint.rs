//! The uniqueness rule as seen by a host validator.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::context::ValidationContext;
use crate::error::{ConstraintError, UniqueViolation};
use crate::path::{Position, SearchPaths};
use crate::resolve::find_duplicate_in;

/// How a candidate's own occurrence is kept from matching itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UniquePolicy {
    /// Cached, count-based: duplicate when the value occurs more than once.
    #[default]
    Counted,
    /// Uncached: duplicate when an equal value sits at any other position.
    /// Reports the conflicting position.
    PositionAware,
}

/// A named uniqueness constraint over one or more search paths.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueConstraint {
    name: String,
    search: SearchPaths,
    policy: UniquePolicy,
}

impl UniqueConstraint {
    pub fn new(name: impl Into<String>, search: SearchPaths) -> Result<Self, ConstraintError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstraintError::EmptyName);
        }
        if search.is_empty() {
            return Err(ConstraintError::NoSearchPaths { name });
        }
        Ok(Self {
            name,
            search,
            policy: UniquePolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: UniquePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn search(&self) -> &SearchPaths {
        &self.search
    }

    pub fn policy(&self) -> UniquePolicy {
        self.policy
    }

    /// Check one candidate.
    ///
    /// `own_position` is where `value` sits in the context document, or
    /// `None` when the candidate comes from another document. In that case
    /// any equal value in the context document is a duplicate. A missing
    /// context document fails regardless of the document's content.
    pub fn check(
        &self,
        value: &Value,
        own_position: Option<&Position>,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), UniqueViolation> {
        let Some(document) = ctx.document() else {
            return Err(UniqueViolation::MissingContext {
                rule: self.name.clone(),
            });
        };

        let position = match self.policy {
            UniquePolicy::Counted => {
                let found = match own_position {
                    Some(_) => ctx.is_duplicate(value, &self.search),
                    None => ctx.is_present(value, &self.search),
                };
                if !found.unwrap_or(false) {
                    return Ok(());
                }
                None
            }
            UniquePolicy::PositionAware => {
                match find_duplicate_in(value, &self.search, document, own_position) {
                    Some(position) => Some(position),
                    None => return Ok(()),
                }
            }
        };

        debug!(rule = %self.name, conflict = ?position, "uniqueness violated");
        Err(UniqueViolation::DuplicateFound {
            rule: self.name.clone(),
            value: value.clone(),
            position,
        })
    }
}
