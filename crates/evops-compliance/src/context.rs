//! # Provider Context
//!
//! Snapshot of the provider attributes that conditional requirements look
//! at. Nothing else in evaluation reads it.

use serde::{Deserialize, Serialize};

/// `standard` value that implies interoperability.
pub const UNIVERSAL_STANDARD: &str = "UNIVERSAL";

/// Protocol capability marker that implies interoperability.
pub const INTEROPERABILITY_CAPABILITY: &str = "INTEROPERABILITY";

/// Provider attributes used to decide conditional applicability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceContext {
    /// Countries the provider operates in.
    #[serde(default)]
    pub countries: Vec<String>,
    /// Regions the provider operates in.
    #[serde(default)]
    pub regions: Vec<String>,
    /// Declared connector/battery standard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    /// Supported protocol capabilities.
    #[serde(default)]
    pub protocol_capabilities: Vec<String>,
}

impl ComplianceContext {
    /// More than one country or more than one region.
    pub fn ships_cross_border(&self) -> bool {
        self.countries.len() > 1 || self.regions.len() > 1
    }

    /// Universal standard, or an explicit interoperability capability.
    pub fn supports_interoperability(&self) -> bool {
        let universal = self
            .standard
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(UNIVERSAL_STANDARD));
        universal
            || self
                .protocol_capabilities
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(INTEROPERABILITY_CAPABILITY))
    }
}
