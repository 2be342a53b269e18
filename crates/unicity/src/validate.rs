//! Bulk validation
//!
//! Stands in for the host validator: every value matched by a rule's
//! `target` path is one candidate, checked against the rule's constraint.
//! All rules of one call share a single [`ValidationContext`], so each
//! distinct set of search paths is expanded once for the whole run.
//!
//! `data` is the document whose values are checked; `context` is the
//! reference document searched for duplicates. Usually they are the same
//! document, and a candidate's own position is excluded from the search.
//! When they differ, no position is excluded and a single equal stored value
//! is a duplicate.

use serde_json::Value;
use tracing::debug_span;

use crate::constraint::UniqueConstraint;
use crate::context::{ValidationContext, ValidationOutput};
use crate::error::{UniqueViolation, ValidationError, ValidationWarning};
use crate::expand::matches;
use crate::path::SearchPath;
use crate::value::is_scalar;

/// A constraint bound to the values it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueRule {
    /// Path selecting the candidate values
    pub target: SearchPath,
    pub constraint: UniqueConstraint,
}

impl UniqueRule {
    pub fn new(target: impl Into<SearchPath>, constraint: UniqueConstraint) -> Self {
        Self {
            target: target.into(),
            constraint,
        }
    }

    pub fn name(&self) -> &str {
        self.constraint.name()
    }
}

/// Validate `data` against `rules`, searching `context` for duplicates.
pub fn validate(data: &Value, context: Option<&Value>, rules: &[UniqueRule]) -> ValidationOutput {
    let ctx = ValidationContext::from_option(context);
    for rule in rules {
        validate_rule(&ctx, data, rule);
    }
    ctx.finish()
}

/// Validate one rule within an existing run.
pub fn validate_rule(ctx: &ValidationContext<'_>, data: &Value, rule: &UniqueRule) {
    let _span = debug_span!("unique_rule", rule = %rule.name(), path = %rule.target).entered();

    if ctx.document().is_none() {
        let path = matches(&rule.target, data)
            .next()
            .map(|(path, _)| path)
            .unwrap_or_default();
        ctx.record_error(ValidationError {
            path,
            violation: UniqueViolation::MissingContext {
                rule: rule.name().to_string(),
            },
        });
        return;
    }
    let in_reference = ctx.searches(data);

    let mut candidates = 0usize;
    for (path, value) in matches(&rule.target, data) {
        candidates += 1;
        if !is_scalar(value) {
            ctx.record_warning(ValidationWarning::NonScalarCandidate {
                rule: rule.name().to_string(),
                path,
            });
            continue;
        }

        let own_position = in_reference.then_some(&path);
        if let Err(violation) = rule.constraint.check(value, own_position, ctx) {
            ctx.record_error(ValidationError { path, violation });
        }
    }

    if candidates == 0 {
        ctx.record_warning(ValidationWarning::NoCandidates {
            rule: rule.name().to_string(),
            target: rule.target.to_string(),
        });
    }
}
