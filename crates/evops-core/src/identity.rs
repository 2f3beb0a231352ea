//! # Identifier Newtypes
//!
//! Newtype wrappers for the identifiers the evaluator handles. You cannot
//! pass a `DocumentId` where a `ProviderId` is expected, and none of them
//! can be empty. Deserialization goes through the same validated
//! constructors via `try_from`.

use serde::{Deserialize, Serialize};

use crate::error::EvopsError;

fn validated(kind: &'static str, raw: &str) -> Result<String, EvopsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EvopsError::InvalidIdentifier {
            kind,
            reason: "must not be empty".into(),
        });
    }
    if trimmed.len() > 255 {
        return Err(EvopsError::InvalidIdentifier {
            kind,
            reason: format!("must not exceed 255 characters, got {}", trimmed.len()),
        });
    }
    Ok(trimmed.to_string())
}

/// Identifier of a provider or station owner being evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

/// Identifier of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

/// Unique code of a requirement, e.g. `PRV_CORP_INCORP`.
///
/// Codes are normalized to upper case so that document links written by
/// different clients compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequirementCode(String);

impl ProviderId {
    /// Create a provider identifier, rejecting empty input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, EvopsError> {
        validated("provider id", id.as_ref()).map(Self)
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DocumentId {
    /// Create a document identifier, rejecting empty input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, EvopsError> {
        validated("document id", id.as_ref()).map(Self)
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RequirementCode {
    /// Create a requirement code, rejecting empty input and upper-casing it.
    pub fn new(code: impl AsRef<str>) -> Result<Self, EvopsError> {
        validated("requirement code", code.as_ref()).map(|c| Self(c.to_ascii_uppercase()))
    }

    /// Access the code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_conversions {
    ($($ty:ident),+) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = EvopsError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )+
    };
}

string_conversions!(ProviderId, DocumentId, RequirementCode);
