//! # Compliance Status
//!
//! The evaluation result. Everything a reviewer needs to act on is data
//! here: missing requirements, expiring and expired documents, and
//! machine-readable blocker codes.

use serde::{Deserialize, Serialize};

use evops_core::{
    sha256_digest, CanonicalBytes, ContentDigest, DocumentId, EvopsError, Gate, ProviderId,
    RequirementCode, Timestamp,
};

use crate::document::DocumentType;

/// Per-gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateState {
    /// Every applicable requirement is met.
    Pass,
    /// Only recommended requirements are unmet.
    Warn,
    /// At least one critical requirement is unmet.
    Blocked,
}

/// Overall readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallState {
    /// Nothing missing, nothing expiring.
    Ready,
    /// Recommended requirements missing or documents expiring soon.
    Warn,
    /// Critical requirements missing or critical documents expired.
    Blocked,
}

impl OverallState {
    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Warn => "WARN",
            Self::Blocked => "BLOCKED",
        }
    }
}

impl std::fmt::Display for OverallState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one applicable requirement fared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementOutcome {
    /// Requirement code.
    pub code: RequirementCode,
    /// Display title.
    pub title: String,
    /// Critical flag.
    pub critical: bool,
    /// The document that satisfied it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfied_by: Option<DocumentId>,
}

impl RequirementOutcome {
    /// Whether a document satisfied the requirement.
    pub fn is_met(&self) -> bool {
        self.satisfied_by.is_some()
    }
}

/// Aggregate for one gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStatus {
    /// The gate.
    pub gate: Gate,
    /// PASS / WARN / BLOCKED.
    pub status: GateState,
    /// Applicable requirements in this gate.
    pub required: usize,
    /// Of those, how many are met.
    pub met: usize,
    /// Applicable critical requirements.
    pub critical_required: usize,
    /// Of those, how many are met.
    pub critical_met: usize,
    /// Unmet critical requirement codes, in evaluation order.
    pub missing_critical: Vec<RequirementCode>,
    /// Unmet recommended requirement codes, in evaluation order.
    pub missing_recommended: Vec<RequirementCode>,
    /// Every applicable requirement of this gate, in evaluation order.
    pub requirements: Vec<RequirementOutcome>,
}

impl GateStatus {
    /// Aggregate outcomes (already in evaluation order) for `gate`.
    pub fn from_outcomes(gate: Gate, requirements: Vec<RequirementOutcome>) -> Self {
        let required = requirements.len();
        let met = requirements.iter().filter(|r| r.is_met()).count();
        let critical_required = requirements.iter().filter(|r| r.critical).count();
        let critical_met = requirements.iter().filter(|r| r.critical && r.is_met()).count();

        let (missing_critical, missing_recommended): (Vec<_>, Vec<_>) = requirements
            .iter()
            .filter(|r| !r.is_met())
            .partition(|r| r.critical);
        let missing_critical: Vec<RequirementCode> =
            missing_critical.into_iter().map(|r| r.code.clone()).collect();
        let missing_recommended: Vec<RequirementCode> =
            missing_recommended.into_iter().map(|r| r.code.clone()).collect();

        let status = if !missing_critical.is_empty() {
            GateState::Blocked
        } else if !missing_recommended.is_empty() {
            GateState::Warn
        } else {
            GateState::Pass
        };

        Self {
            gate,
            status,
            required,
            met,
            critical_required,
            critical_met,
            missing_critical,
            missing_recommended,
            requirements,
        }
    }
}

/// A verified document with an expiry worth reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentExpiry {
    /// Document identifier.
    pub document_id: DocumentId,
    /// Document category.
    pub document_type: DocumentType,
    /// Expiry instant.
    pub expires_at: Timestamp,
    /// Whole days until expiry, rounded down; negative once expired.
    pub days_remaining: i64,
}

/// Full evaluation result for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceStatus {
    /// The evaluated provider.
    pub provider_id: ProviderId,
    /// The "now" the evaluation used.
    pub evaluated_at: Timestamp,
    /// One entry per gate, in canonical gate order.
    pub gates: Vec<GateStatus>,
    /// Unmet critical requirements across gates.
    pub missing_critical: Vec<RequirementCode>,
    /// Unmet recommended requirements across gates.
    pub missing_recommended: Vec<RequirementCode>,
    /// Verified documents expiring within the window.
    pub expiring_soon: Vec<DocumentExpiry>,
    /// Verified documents for critical requirements that have expired.
    pub expired_critical: Vec<DocumentExpiry>,
    /// READY / WARN / BLOCKED.
    pub overall: OverallState,
    /// `MISSING_<code>` and `DOC_EXPIRED_CRITICAL:<id>` codes.
    pub blockers: Vec<String>,
}

impl ComplianceStatus {
    /// Status for one gate.
    pub fn gate(&self, gate: Gate) -> Option<&GateStatus> {
        self.gates.iter().find(|g| g.gate == gate)
    }

    /// Whether the provider may go live.
    pub fn is_ready(&self) -> bool {
        self.overall == OverallState::Ready
    }

    /// SHA-256 over the canonical status with `evaluated_at` removed.
    ///
    /// Two evaluations of the same inputs at the same frozen "now" have
    /// equal fingerprints, as do evaluations at different times whose
    /// results differ only in the timestamp.
    pub fn fingerprint(&self) -> Result<ContentDigest, EvopsError> {
        let mut value = serde_json::to_value(self)
            .map_err(evops_core::error::CanonicalizationError::from)?;
        if let Some(map) = value.as_object_mut() {
            map.remove("evaluated_at");
        }
        let canonical = CanonicalBytes::new(&value)?;
        Ok(sha256_digest(&canonical))
    }
}
