//! # Built-in Requirement Catalogs
//!
//! Immutable requirement tables for the two scopes. They are `static` data:
//! built at compile time, shared by every caller, never mutated. The
//! evaluator falls back to them when a caller supplies no requirements.
//!
//! [`document_type_index()`] derives, for each document type, which
//! requirement codes accept it. The dashboard uses it to suggest which
//! requirement an upload should be linked to.

use std::collections::{BTreeMap, BTreeSet};

use evops_core::{Gate, RequirementCode};

use crate::condition::{Condition, Expectation};
use crate::document::DocumentType;
use crate::requirement::{RequirementDefinition, RequirementScope};

/// A catalog row. All fields are `'static` so tables can be `static`.
#[derive(Debug)]
pub struct CatalogEntry {
    /// Requirement code.
    pub code: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Gate.
    pub gate: Gate,
    /// Display category.
    pub category: &'static str,
    /// Critical flag.
    pub critical: bool,
    /// Accepted document types.
    pub accepted: &'static [DocumentType],
    /// Applicability conditions.
    pub conditions: &'static [Condition],
}

use DocumentType as D;

/// Requirements for charge-point operators and swap-station networks.
pub static PROVIDER_REQUIREMENTS: &[CatalogEntry] = &[
    CatalogEntry {
        code: "PRV_CORP_INCORP",
        title: "Certificate of incorporation",
        gate: Gate::Kyb,
        category: "corporate",
        critical: true,
        accepted: &[D::Incorporation],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_CORP_TAX",
        title: "Tax registration",
        gate: Gate::Kyb,
        category: "corporate",
        critical: true,
        accepted: &[D::TaxRegistration],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_CORP_UBO",
        title: "Beneficial ownership declaration",
        gate: Gate::Kyb,
        category: "ownership",
        critical: true,
        accepted: &[D::BeneficialOwnership],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_CORP_BANK",
        title: "Settlement bank account",
        gate: Gate::Kyb,
        category: "finance",
        critical: true,
        accepted: &[D::BankAccount],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_CORP_DIRECTOR_ID",
        title: "Director identification",
        gate: Gate::Kyb,
        category: "ownership",
        critical: false,
        accepted: &[D::DirectorId],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_SAFETY_INSURANCE",
        title: "Public liability insurance",
        gate: Gate::Safety,
        category: "insurance",
        critical: true,
        accepted: &[D::LiabilityInsurance],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_SAFETY_ELECTRICAL",
        title: "Electrical safety certificate",
        gate: Gate::Safety,
        category: "electrical",
        critical: true,
        accepted: &[D::ElectricalSafetyCertificate],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_SAFETY_BATTERY",
        title: "Battery handling certification",
        gate: Gate::Safety,
        category: "battery",
        critical: true,
        accepted: &[D::BatteryHandlingCertificate],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_SAFETY_HAZMAT_SHIPPING",
        title: "Dangerous goods shipping permit",
        gate: Gate::Safety,
        category: "battery",
        critical: true,
        accepted: &[D::HazmatShippingPermit],
        conditions: &[Condition::CrossBorderShipping(Expectation::Equals(true))],
    },
    CatalogEntry {
        code: "PRV_SAFETY_FIRE",
        title: "Fire safety plan",
        gate: Gate::Safety,
        category: "fire",
        critical: false,
        accepted: &[D::FireSafetyPlan],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_OPS_PERMIT",
        title: "Operating permit",
        gate: Gate::Operations,
        category: "permits",
        critical: true,
        accepted: &[D::OperatingPermit],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_OPS_MAINTENANCE",
        title: "Preventive maintenance plan",
        gate: Gate::Operations,
        category: "maintenance",
        critical: false,
        accepted: &[D::MaintenancePlan],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_OPS_SLA",
        title: "Service level agreement",
        gate: Gate::Operations,
        category: "contracts",
        critical: false,
        accepted: &[D::ServiceLevelAgreement],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_INT_PROTOCOL",
        title: "Charging protocol conformance",
        gate: Gate::Integration,
        category: "protocol",
        critical: true,
        accepted: &[D::ProtocolConformanceCertificate],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_INT_DATA",
        title: "Data protection agreement",
        gate: Gate::Integration,
        category: "data",
        critical: true,
        accepted: &[D::DataProtectionAgreement],
        conditions: &[],
    },
    CatalogEntry {
        code: "PRV_INT_ROAMING",
        title: "Roaming interoperability agreement",
        gate: Gate::Integration,
        category: "protocol",
        critical: false,
        accepted: &[D::InteroperabilityAgreement],
        conditions: &[Condition::SupportsInteroperability(Expectation::Equals(true))],
    },
];

/// Requirements for owners of individual station sites.
pub static STATION_OWNER_REQUIREMENTS: &[CatalogEntry] = &[
    CatalogEntry {
        code: "STO_CORP_INCORP",
        title: "Business registration",
        gate: Gate::Kyb,
        category: "corporate",
        critical: true,
        accepted: &[D::Incorporation],
        conditions: &[],
    },
    CatalogEntry {
        code: "STO_CORP_TAX",
        title: "Tax registration",
        gate: Gate::Kyb,
        category: "corporate",
        critical: true,
        accepted: &[D::TaxRegistration],
        conditions: &[],
    },
    CatalogEntry {
        code: "STO_CORP_BANK",
        title: "Payout bank account",
        gate: Gate::Kyb,
        category: "finance",
        critical: true,
        accepted: &[D::BankAccount],
        conditions: &[],
    },
    CatalogEntry {
        code: "STO_OWNER_ID",
        title: "Owner identification",
        gate: Gate::Kyb,
        category: "ownership",
        critical: false,
        accepted: &[D::DirectorId],
        conditions: &[],
    },
    CatalogEntry {
        code: "STO_SAFETY_ELECTRICAL",
        title: "Electrical installation certificate",
        gate: Gate::Safety,
        category: "electrical",
        critical: true,
        accepted: &[D::ElectricalSafetyCertificate],
        conditions: &[],
    },
    CatalogEntry {
        code: "STO_SAFETY_FIRE",
        title: "Site fire safety plan",
        gate: Gate::Safety,
        category: "fire",
        critical: true,
        accepted: &[D::FireSafetyPlan],
        conditions: &[],
    },
    CatalogEntry {
        code: "STO_SAFETY_INSURANCE",
        title: "Site liability insurance",
        gate: Gate::Safety,
        category: "insurance",
        critical: false,
        accepted: &[D::LiabilityInsurance],
        conditions: &[],
    },
    CatalogEntry {
        code: "STO_SITE_LEASE",
        title: "Site lease or title",
        gate: Gate::Operations,
        category: "site",
        critical: true,
        accepted: &[D::SiteLease],
        conditions: &[],
    },
    CatalogEntry {
        code: "STO_GRID_CONNECTION",
        title: "Grid connection agreement",
        gate: Gate::Operations,
        category: "site",
        critical: true,
        accepted: &[D::GridConnectionAgreement],
        conditions: &[],
    },
    CatalogEntry {
        code: "STO_OPS_PERMIT",
        title: "Local operating permit",
        gate: Gate::Operations,
        category: "permits",
        critical: false,
        accepted: &[D::OperatingPermit],
        conditions: &[],
    },
    CatalogEntry {
        code: "STO_INT_DATA",
        title: "Data protection agreement",
        gate: Gate::Integration,
        category: "data",
        critical: false,
        accepted: &[D::DataProtectionAgreement],
        conditions: &[],
    },
];

/// The static table for a scope.
pub fn entries(scope: RequirementScope) -> &'static [CatalogEntry] {
    match scope {
        RequirementScope::Provider => PROVIDER_REQUIREMENTS,
        RequirementScope::StationOwner => STATION_OWNER_REQUIREMENTS,
    }
}

impl CatalogEntry {
    /// Build an owned definition for this row.
    ///
    /// Catalog codes are non-empty literals, so code construction cannot
    /// fail; `None` is returned defensively rather than panicking.
    pub fn to_definition(&self, scope: RequirementScope) -> Option<RequirementDefinition> {
        let code = RequirementCode::new(self.code).ok()?;
        Some(RequirementDefinition {
            code,
            title: self.title.to_string(),
            gate: self.gate,
            category: self.category.to_string(),
            critical: self.critical,
            accepted_document_types: self.accepted.iter().copied().collect(),
            scope,
            conditions: self.conditions.to_vec(),
        })
    }
}

/// Owned requirement definitions for a scope, in table order.
pub fn catalog(scope: RequirementScope) -> Vec<RequirementDefinition> {
    entries(scope)
        .iter()
        .filter_map(|entry| entry.to_definition(scope))
        .collect()
}

/// The supplied requirements, or the scope's catalog when none are supplied.
pub fn requirements_or_fallback(
    scope: RequirementScope,
    supplied: Vec<RequirementDefinition>,
) -> Vec<RequirementDefinition> {
    if supplied.is_empty() {
        tracing::debug!(%scope, "no requirements supplied, using built-in catalog");
        catalog(scope)
    } else {
        supplied
    }
}

/// For each document type, the codes of requirements in `scope` that accept it.
///
/// Types accepted by no requirement are omitted.
pub fn document_type_index(scope: RequirementScope) -> BTreeMap<DocumentType, Vec<&'static str>> {
    let mut index: BTreeMap<DocumentType, Vec<&'static str>> = BTreeMap::new();
    for entry in entries(scope) {
        for doc_type in entry.accepted {
            index.entry(*doc_type).or_default().push(entry.code);
        }
    }
    index
}

/// Codes that appear more than once in a table. Empty for valid tables.
pub fn duplicate_codes(scope: RequirementScope) -> Vec<&'static str> {
    let mut seen = BTreeSet::new();
    entries(scope)
        .iter()
        .filter(|e| !seen.insert(e.code))
        .map(|e| e.code)
        .collect()
}

/// Codes that appear more than once in caller-supplied `requirements`,
/// each reported once, in first-repeat order. Codes are unique keys, so a
/// non-empty result means the list must be rejected.
pub fn duplicate_requirement_codes(requirements: &[RequirementDefinition]) -> Vec<RequirementCode> {
    let mut seen: BTreeSet<&RequirementCode> = BTreeSet::new();
    let mut duplicates: Vec<RequirementCode> = Vec::new();
    for requirement in requirements {
        if !seen.insert(&requirement.code) && !duplicates.contains(&requirement.code) {
            duplicates.push(requirement.code.clone());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplied_duplicates_reported_once() {
        let mut requirements = catalog(RequirementScope::Provider);
        assert!(duplicate_requirement_codes(&requirements).is_empty());

        let first = requirements[0].clone();
        requirements.push(first.clone());
        requirements.push(first.clone());
        assert_eq!(duplicate_requirement_codes(&requirements), vec![first.code]);
    }

    const SCOPES: [RequirementScope; 2] = [RequirementScope::Provider, RequirementScope::StationOwner];

    #[test]
    fn codes_are_unique_per_scope() {
        for scope in SCOPES {
            assert!(duplicate_codes(scope).is_empty(), "duplicates in {scope}");
        }
    }

    #[test]
    fn every_entry_converts() {
        for scope in SCOPES {
            assert_eq!(catalog(scope).len(), entries(scope).len());
        }
    }

    #[test]
    fn every_gate_has_requirements_in_both_scopes() {
        for scope in SCOPES {
            for gate in Gate::all() {
                assert!(
                    entries(scope).iter().any(|e| e.gate == *gate),
                    "{scope} has no {gate} requirement"
                );
            }
        }
    }

    #[test]
    fn every_entry_accepts_at_least_one_type() {
        for scope in SCOPES {
            for entry in entries(scope) {
                assert!(!entry.accepted.is_empty(), "{} accepts nothing", entry.code);
                assert!(!entry.accepted.contains(&DocumentType::Other));
            }
        }
    }

    #[test]
    fn catalog_definitions_carry_scope() {
        assert!(catalog(RequirementScope::StationOwner)
            .iter()
            .all(|r| r.scope == RequirementScope::StationOwner));
    }

    #[test]
    fn fallback_only_when_empty() {
        let fallback = requirements_or_fallback(RequirementScope::Provider, vec![]);
        assert_eq!(fallback.len(), PROVIDER_REQUIREMENTS.len());

        let one = catalog(RequirementScope::Provider).into_iter().take(1).collect::<Vec<_>>();
        let kept = requirements_or_fallback(RequirementScope::Provider, one.clone());
        assert_eq!(kept, one);
    }

    #[test]
    fn index_maps_types_to_codes() {
        let index = document_type_index(RequirementScope::Provider);
        assert_eq!(index[&DocumentType::Incorporation], vec!["PRV_CORP_INCORP"]);
        assert_eq!(index[&DocumentType::HazmatShippingPermit], vec!["PRV_SAFETY_HAZMAT_SHIPPING"]);
        assert!(!index.contains_key(&DocumentType::Other));
        assert!(!index.contains_key(&DocumentType::SiteLease));

        let owner = document_type_index(RequirementScope::StationOwner);
        assert_eq!(owner[&DocumentType::SiteLease], vec!["STO_SITE_LEASE"]);
    }

    #[test]
    fn conditional_entries_are_present() {
        let hazmat = catalog(RequirementScope::Provider)
            .into_iter()
            .find(|r| r.code.as_str() == "PRV_SAFETY_HAZMAT_SHIPPING")
            .unwrap();
        assert_eq!(
            hazmat.conditions,
            vec![Condition::CrossBorderShipping(Expectation::Equals(true))]
        );
    }
}
