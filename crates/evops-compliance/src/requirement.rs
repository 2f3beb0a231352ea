//! # Requirement Definitions
//!
//! A requirement is a named compliance obligation under one [`Gate`],
//! satisfied by one verified document of an accepted type. Definitions are
//! immutable once built; the built-in catalogs live in [`crate::catalog`].

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use evops_core::{EvopsError, Gate, RequirementCode};

use crate::condition::Condition;
use crate::document::DocumentType;

/// Which kind of entity a requirement applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequirementScope {
    /// Charge-point operators and swap-station networks.
    #[default]
    Provider,
    /// Owners of individual station sites.
    StationOwner,
}

impl RequirementScope {
    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provider => "PROVIDER",
            Self::StationOwner => "STATION_OWNER",
        }
    }
}

impl std::fmt::Display for RequirementScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequirementScope {
    type Err = EvopsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PROVIDER" => Ok(Self::Provider),
            "STATION_OWNER" => Ok(Self::StationOwner),
            _ => Err(EvopsError::UnknownScope(s.to_string())),
        }
    }
}

/// A compliance requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementDefinition {
    /// Unique requirement code.
    pub code: RequirementCode,
    /// Display title. Also the secondary sort key within a gate.
    pub title: String,
    /// Gate this requirement belongs to.
    pub gate: Gate,
    /// Free-form grouping for display (e.g. "corporate", "electrical").
    #[serde(default)]
    pub category: String,
    /// Critical requirements block the gate when unmet; others only warn.
    #[serde(default)]
    pub critical: bool,
    /// Document types that can satisfy this requirement.
    #[serde(default)]
    pub accepted_document_types: BTreeSet<DocumentType>,
    /// Entity kind this requirement is defined for.
    #[serde(default)]
    pub scope: RequirementScope,
    /// All must hold for the requirement to apply. Empty means always.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl RequirementDefinition {
    /// Whether a document of this type can satisfy the requirement.
    pub fn accepts(&self, document_type: DocumentType) -> bool {
        self.accepted_document_types.contains(&document_type)
    }

    /// Whether applicability depends on provider context.
    pub fn is_conditional(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Deterministic evaluation order: gate, critical first, title, code.
    pub fn evaluation_order(&self, other: &Self) -> Ordering {
        self.gate
            .rank()
            .cmp(&other.gate.rank())
            .then_with(|| other.critical.cmp(&self.critical))
            .then_with(|| self.title.cmp(&other.title))
            .then_with(|| self.code.cmp(&other.code))
    }
}

/// Sort requirement references into evaluation order.
pub fn sort_for_evaluation(requirements: &mut [&RequirementDefinition]) {
    requirements.sort_by(|a, b| a.evaluation_order(b));
}
