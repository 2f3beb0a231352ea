//! # Compliance Gate: Single Source of Truth
//!
//! Defines the `Gate` enum with the four onboarding gates. Every `match` on
//! `Gate` must be exhaustive: adding a gate forces every consumer (catalogs,
//! aggregation, display) to handle it at compile time.
//!
//! Gates are always reported in the canonical order returned by
//! [`Gate::all()`], regardless of how requirements are ordered on input.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EvopsError;

/// The compliance gates a provider or station owner must clear.
///
/// | # | Gate | Covers |
/// |---|------|--------|
/// | 1 | KYB | Corporate identity, tax, ownership, banking |
/// | 2 | SAFETY | Electrical, fire, battery handling, hazmat |
/// | 3 | OPERATIONS | Site rights, permits, maintenance, SLAs |
/// | 4 | INTEGRATION | Protocol conformance, interoperability, data |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gate {
    /// Know Your Business: corporate and legal verification.
    Kyb,
    /// Physical and electrical safety of charging and swap equipment.
    Safety,
    /// Site operations: leases, permits, maintenance, service levels.
    Operations,
    /// Technical integration with the platform and roaming partners.
    Integration,
}

/// Total number of gates.
pub const GATE_COUNT: usize = 4;

impl Gate {
    /// Returns all gates in canonical evaluation order.
    pub fn all() -> &'static [Gate] {
        &[Self::Kyb, Self::Safety, Self::Operations, Self::Integration]
    }

    /// Position of this gate in the canonical order (0-based).
    pub fn rank(&self) -> usize {
        match self {
            Self::Kyb => 0,
            Self::Safety => 1,
            Self::Operations => 2,
            Self::Integration => 3,
        }
    }

    /// Returns the serialized identifier for this gate.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kyb => "KYB",
            Self::Safety => "SAFETY",
            Self::Operations => "OPERATIONS",
            Self::Integration => "INTEGRATION",
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gate {
    type Err = EvopsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KYB" => Ok(Self::Kyb),
            "SAFETY" => Ok(Self::Safety),
            "OPERATIONS" => Ok(Self::Operations),
            "INTEGRATION" => Ok(Self::Integration),
            _ => Err(EvopsError::UnknownGate(s.to_string())),
        }
    }
}
