//! # Documents
//!
//! Documents are produced by the upload and review workflow and consumed
//! read-only here. Only [`VerificationState::Verified`] documents can
//! satisfy a requirement or appear in expiry reports.
//!
//! Older review records carry a free-text `status` instead of a
//! `verification_state`; [`Document::effective_verification()`] derives
//! the state from it when the explicit field is absent.

use serde::{Deserialize, Deserializer, Serialize};

use evops_core::{DocumentId, RequirementCode, Timestamp};

/// Category of an uploaded document.
///
/// Unrecognized categories deserialize to [`DocumentType::Other`] so that
/// a new upload category never breaks evaluation; `Other` is accepted by
/// no catalog requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    /// Certificate of incorporation or business registration.
    Incorporation,
    /// Tax authority registration.
    TaxRegistration,
    /// Ultimate beneficial ownership declaration.
    BeneficialOwnership,
    /// Identity document of a director or owner.
    DirectorId,
    /// Bank account confirmation for settlements and payouts.
    BankAccount,
    /// Public liability insurance certificate.
    LiabilityInsurance,
    /// Electrical installation safety certificate.
    ElectricalSafetyCertificate,
    /// Site fire safety plan.
    FireSafetyPlan,
    /// Battery handling and storage certification.
    BatteryHandlingCertificate,
    /// Dangerous goods permit for shipping battery packs.
    HazmatShippingPermit,
    /// Lease or title for the station site.
    SiteLease,
    /// Grid connection agreement with the distribution operator.
    GridConnectionAgreement,
    /// Municipal or regional operating permit.
    OperatingPermit,
    /// Preventive maintenance plan.
    MaintenancePlan,
    /// Service level agreement.
    ServiceLevelAgreement,
    /// Charging protocol conformance certificate.
    ProtocolConformanceCertificate,
    /// Roaming or interoperability agreement.
    InteroperabilityAgreement,
    /// Data processing and protection agreement.
    DataProtectionAgreement,
    /// Anything else.
    Other,
}

impl DocumentType {
    /// Every document type, in declaration order.
    pub fn all() -> &'static [DocumentType] {
        &[
            Self::Incorporation,
            Self::TaxRegistration,
            Self::BeneficialOwnership,
            Self::DirectorId,
            Self::BankAccount,
            Self::LiabilityInsurance,
            Self::ElectricalSafetyCertificate,
            Self::FireSafetyPlan,
            Self::BatteryHandlingCertificate,
            Self::HazmatShippingPermit,
            Self::SiteLease,
            Self::GridConnectionAgreement,
            Self::OperatingPermit,
            Self::MaintenancePlan,
            Self::ServiceLevelAgreement,
            Self::ProtocolConformanceCertificate,
            Self::InteroperabilityAgreement,
            Self::DataProtectionAgreement,
            Self::Other,
        ]
    }

    /// Wire name of this document type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incorporation => "INCORPORATION",
            Self::TaxRegistration => "TAX_REGISTRATION",
            Self::BeneficialOwnership => "BENEFICIAL_OWNERSHIP",
            Self::DirectorId => "DIRECTOR_ID",
            Self::BankAccount => "BANK_ACCOUNT",
            Self::LiabilityInsurance => "LIABILITY_INSURANCE",
            Self::ElectricalSafetyCertificate => "ELECTRICAL_SAFETY_CERTIFICATE",
            Self::FireSafetyPlan => "FIRE_SAFETY_PLAN",
            Self::BatteryHandlingCertificate => "BATTERY_HANDLING_CERTIFICATE",
            Self::HazmatShippingPermit => "HAZMAT_SHIPPING_PERMIT",
            Self::SiteLease => "SITE_LEASE",
            Self::GridConnectionAgreement => "GRID_CONNECTION_AGREEMENT",
            Self::OperatingPermit => "OPERATING_PERMIT",
            Self::MaintenancePlan => "MAINTENANCE_PLAN",
            Self::ServiceLevelAgreement => "SERVICE_LEVEL_AGREEMENT",
            Self::ProtocolConformanceCertificate => "PROTOCOL_CONFORMANCE_CERTIFICATE",
            Self::InteroperabilityAgreement => "INTEROPERABILITY_AGREEMENT",
            Self::DataProtectionAgreement => "DATA_PROTECTION_AGREEMENT",
            Self::Other => "OTHER",
        }
    }
}

impl From<String> for DocumentType {
    fn from(value: String) -> Self {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        match DocumentType::all()
            .iter()
            .find(|t| t.as_str() == normalized)
        {
            Some(t) => *t,
            None => {
                tracing::warn!(document_type = %value, "unrecognized document type, treating as OTHER");
                DocumentType::Other
            }
        }
    }
}

impl From<DocumentType> for String {
    fn from(value: DocumentType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the external document review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationState {
    /// Not yet reviewed, or review in progress.
    Unverified,
    /// Accepted by a reviewer.
    Verified,
    /// Rejected by a reviewer.
    Rejected,
}

impl VerificationState {
    /// Derive a state from a legacy review status string.
    ///
    /// `VERIFIED` and `APPROVED` map to verified, `REJECTED` and `DECLINED`
    /// to rejected. Anything else, including an absent status, is
    /// unverified.
    pub fn from_legacy_status(status: Option<&str>) -> Self {
        match status.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
            Some("VERIFIED") | Some("APPROVED") => Self::Verified,
            Some("REJECTED") | Some("DECLINED") => Self::Rejected,
            _ => Self::Unverified,
        }
    }
}

/// An uploaded document as seen by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier.
    pub id: DocumentId,
    /// Category of the document.
    pub document_type: DocumentType,
    /// Explicit link to the requirement this document was uploaded for.
    ///
    /// A linked document only ever satisfies that requirement; type-based
    /// matching applies to unlinked documents.
    ///
    /// A blank or invalid link deserializes as `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_requirement_code"
    )]
    pub requirement_code: Option<RequirementCode>,
    /// Review outcome. Takes precedence over `status` when present.
    /// Unknown states deserialize as `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_verification_state"
    )]
    pub verification_state: Option<VerificationState>,
    /// Legacy free-text review status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Expiry instant. Malformed values deserialize as `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_expiry"
    )]
    pub expires_at: Option<Timestamp>,
}

impl Document {
    /// Create an unlinked, unverified document with no expiry.
    pub fn new(id: DocumentId, document_type: DocumentType) -> Self {
        Self {
            id,
            document_type,
            requirement_code: None,
            verification_state: None,
            status: None,
            expires_at: None,
        }
    }

    /// Builder: mark the document verified.
    pub fn verified(mut self) -> Self {
        self.verification_state = Some(VerificationState::Verified);
        self
    }

    /// Builder: link the document to a requirement.
    pub fn linked_to(mut self, code: RequirementCode) -> Self {
        self.requirement_code = Some(code);
        self
    }

    /// Builder: set the expiry instant.
    pub fn expiring_at(mut self, at: Timestamp) -> Self {
        self.expires_at = Some(at);
        self
    }

    /// The verification state, falling back to the legacy status.
    pub fn effective_verification(&self) -> VerificationState {
        self.verification_state
            .unwrap_or_else(|| VerificationState::from_legacy_status(self.status.as_deref()))
    }

    /// Whether the document passed review.
    pub fn is_verified(&self) -> bool {
        self.effective_verification() == VerificationState::Verified
    }
}

fn lenient_requirement_code<'de, D>(deserializer: D) -> Result<Option<RequirementCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => match RequirementCode::new(&s) {
            Ok(code) => Some(code),
            Err(e) => {
                tracing::warn!(requirement_code = %s, error = %e, "ignoring invalid document link");
                None
            }
        },
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            tracing::warn!(requirement_code = %other, "ignoring non-string document link");
            None
        }
    })
}

fn lenient_verification_state<'de, D>(
    deserializer: D,
) -> Result<Option<VerificationState>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => match s.trim().to_ascii_uppercase().as_str() {
            "UNVERIFIED" => Some(VerificationState::Unverified),
            "VERIFIED" => Some(VerificationState::Verified),
            "REJECTED" => Some(VerificationState::Rejected),
            _ => {
                tracing::warn!(verification_state = %s, "unknown verification state, using legacy status");
                None
            }
        },
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            tracing::warn!(verification_state = %other, "non-string verification state, using legacy status");
            None
        }
    })
}

fn lenient_expiry<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
            match Timestamp::parse_date_or_datetime(&s) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    tracing::warn!(expires_at = %s, error = %e, "ignoring malformed document expiry");
                    None
                }
            }
        }
        Some(serde_json::Value::Null) | None => None,
        Some(serde_json::Value::String(_)) => None,
        Some(other) => {
            tracing::warn!(expires_at = %other, "ignoring non-string document expiry");
            None
        }
    })
}
