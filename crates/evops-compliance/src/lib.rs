//! # evops-compliance: Compliance Evaluator
//!
//! Evaluates a checklist of gate-classified requirements against a
//! provider's verified documents and produces a readiness snapshot.
//!
//! ## Pipeline
//!
//! ```text
//! requirements ──▶ applicability ──▶ sort ──▶ matching ──▶ gate aggregation ─┐
//!        context ─┘                     documents ─┘                          ├─▶ ComplianceStatus
//!                                       documents ──▶ expiry scan ───────────┘
//! ```
//!
//! - [`applicability`]: which requirements apply given the provider context.
//! - [`matching`]: greedy one-to-one assignment of verified documents.
//! - [`expiry`]: expiring-soon and expired-critical documents.
//! - [`evaluator`]: gate aggregation, overall state, and blocker codes.
//!
//! The evaluator is a pure function of its inputs and a frozen "now". It
//! performs no I/O and raises no errors; everything a human must act on is
//! encoded in the returned [`ComplianceStatus`].
//!
//! ## Catalogs
//!
//! [`catalog`] holds the built-in requirement tables for the PROVIDER and
//! STATION_OWNER scopes, used when a caller supplies no requirements.

pub mod applicability;
pub mod catalog;
pub mod condition;
pub mod config;
pub mod context;
pub mod document;
pub mod evaluator;
pub mod expiry;
pub mod matching;
pub mod requirement;
pub mod status;

pub use catalog::{
    catalog, document_type_index, duplicate_requirement_codes, requirements_or_fallback,
};
pub use condition::{Condition, Expectation};
pub use config::{EvaluatorConfig, UnknownConditionPolicy};
pub use context::ComplianceContext;
pub use document::{Document, DocumentType, VerificationState};
pub use evaluator::{evaluate_compliance, ComplianceEvaluator};
pub use requirement::{RequirementDefinition, RequirementScope};
pub use status::{
    ComplianceStatus, DocumentExpiry, GateState, GateStatus, OverallState, RequirementOutcome,
};
