//! # Requirement Applicability
//!
//! Decides which requirements apply to the entity being evaluated.
//!
//! - No conditions: always applies.
//! - Conditions: all must hold.
//! - No provider context: a conditional requirement does not apply
//!   (fail-closed), regardless of which conditions it carries.
//! - Unrecognized condition key: governed by [`UnknownConditionPolicy`],
//!   which defaults to treating the condition as holding (fail-open).
//!
//! The two defaults point in opposite directions. Both are kept as they
//! are; the unknown-key side is configurable, the missing-context side is
//! not.

use crate::condition::Condition;
use crate::config::UnknownConditionPolicy;
use crate::context::ComplianceContext;
use crate::requirement::RequirementDefinition;

/// Evaluate one condition against a present context.
pub fn condition_holds(
    condition: &Condition,
    context: &ComplianceContext,
    policy: UnknownConditionPolicy,
) -> bool {
    match condition {
        Condition::CrossBorderShipping(expectation) => {
            expectation.holds_for(context.ships_cross_border())
        }
        Condition::SupportsInteroperability(expectation) => {
            expectation.holds_for(context.supports_interoperability())
        }
        Condition::Unrecognized { key, .. } => {
            let holds = policy == UnknownConditionPolicy::Applies;
            tracing::debug!(key = %key, holds, "unrecognized condition key");
            holds
        }
    }
}

/// Whether `requirement` applies under `context`.
pub fn applies(
    requirement: &RequirementDefinition,
    context: Option<&ComplianceContext>,
    policy: UnknownConditionPolicy,
) -> bool {
    if !requirement.is_conditional() {
        return true;
    }
    let Some(context) = context else {
        tracing::debug!(
            code = %requirement.code,
            "conditional requirement skipped: no provider context"
        );
        return false;
    };
    requirement
        .conditions
        .iter()
        .all(|c| condition_holds(c, context, policy))
}

/// The applicable subset of `requirements`, in input order.
pub fn applicable<'a>(
    requirements: &'a [RequirementDefinition],
    context: Option<&ComplianceContext>,
    policy: UnknownConditionPolicy,
) -> Vec<&'a RequirementDefinition> {
    requirements
        .iter()
        .filter(|r| applies(r, context, policy))
        .collect()
}
