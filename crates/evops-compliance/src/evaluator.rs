//! # Compliance Evaluator
//!
//! Pure function of (requirements, documents, context, now, config) to
//! [`ComplianceStatus`]. Each call recomputes everything from scratch;
//! there is no incremental state and nothing is persisted.
//!
//! ## Overall State
//!
//! ```text
//! missing critical OR expired critical        → BLOCKED
//! missing recommended OR expiring soon        → WARN
//! otherwise                                   → READY
//! ```
//!
//! Blocker codes list `MISSING_<code>` for every missing critical
//! requirement (evaluation order) followed by
//! `DOC_EXPIRED_CRITICAL:<documentId>` for every expired critical
//! document (input order).

use evops_core::{Gate, ProviderId, Timestamp};

use crate::applicability::applicable;
use crate::config::EvaluatorConfig;
use crate::context::ComplianceContext;
use crate::document::Document;
use crate::expiry::scan_expiry;
use crate::matching::assign_documents;
use crate::requirement::{sort_for_evaluation, RequirementDefinition};
use crate::status::{ComplianceStatus, GateStatus, OverallState, RequirementOutcome};

/// Evaluates compliance under a fixed configuration.
///
/// Stateless apart from its configuration; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEvaluator {
    config: EvaluatorConfig,
}

impl ComplianceEvaluator {
    /// Create an evaluator with the given configuration.
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate as of the current time.
    pub fn evaluate(
        &self,
        provider_id: &ProviderId,
        context: Option<&ComplianceContext>,
        documents: &[Document],
        requirements: &[RequirementDefinition],
    ) -> ComplianceStatus {
        self.evaluate_at(provider_id, context, documents, requirements, Timestamp::now())
    }

    /// Evaluate as of a frozen `now`.
    pub fn evaluate_at(
        &self,
        provider_id: &ProviderId,
        context: Option<&ComplianceContext>,
        documents: &[Document],
        requirements: &[RequirementDefinition],
        now: Timestamp,
    ) -> ComplianceStatus {
        let mut ordered = applicable(requirements, context, self.config.unknown_condition_policy);
        sort_for_evaluation(&mut ordered);

        let assignments = assign_documents(&ordered, documents);

        let mut per_gate: Vec<Vec<RequirementOutcome>> = vec![Vec::new(); Gate::all().len()];
        for (requirement, satisfied_by) in ordered.iter().zip(assignments) {
            per_gate[requirement.gate.rank()].push(RequirementOutcome {
                code: requirement.code.clone(),
                title: requirement.title.clone(),
                critical: requirement.critical,
                satisfied_by: satisfied_by.map(|d| d.id.clone()),
            });
        }

        let gates: Vec<GateStatus> = Gate::all()
            .iter()
            .zip(per_gate)
            .map(|(gate, outcomes)| GateStatus::from_outcomes(*gate, outcomes))
            .collect();

        let missing_critical: Vec<_> = gates
            .iter()
            .flat_map(|g| g.missing_critical.iter().cloned())
            .collect();
        let missing_recommended: Vec<_> = gates
            .iter()
            .flat_map(|g| g.missing_recommended.iter().cloned())
            .collect();

        let expiry = scan_expiry(documents, &ordered, now, self.config.expiring_window_days);

        let overall = if !missing_critical.is_empty() || !expiry.expired_critical.is_empty() {
            OverallState::Blocked
        } else if !missing_recommended.is_empty() || !expiry.expiring_soon.is_empty() {
            OverallState::Warn
        } else {
            OverallState::Ready
        };

        let blockers: Vec<String> = missing_critical
            .iter()
            .map(|code| format!("MISSING_{code}"))
            .chain(
                expiry
                    .expired_critical
                    .iter()
                    .map(|e| format!("DOC_EXPIRED_CRITICAL:{}", e.document_id)),
            )
            .collect();

        tracing::info!(
            provider = %provider_id,
            %overall,
            applicable = ordered.len(),
            missing_critical = missing_critical.len(),
            missing_recommended = missing_recommended.len(),
            expiring_soon = expiry.expiring_soon.len(),
            expired_critical = expiry.expired_critical.len(),
            "compliance evaluated"
        );

        ComplianceStatus {
            provider_id: provider_id.clone(),
            evaluated_at: now,
            gates,
            missing_critical,
            missing_recommended,
            expiring_soon: expiry.expiring_soon,
            expired_critical: expiry.expired_critical,
            overall,
            blockers,
        }
    }
}

/// Evaluate with the default configuration as of the current time.
pub fn evaluate_compliance(
    provider_id: &ProviderId,
    context: Option<&ComplianceContext>,
    documents: &[Document],
    requirements: &[RequirementDefinition],
) -> ComplianceStatus {
    ComplianceEvaluator::default().evaluate(provider_id, context, documents, requirements)
}
