//! # Canonical Serialization
//!
//! `CanonicalBytes` is the only input accepted by [`sha256_digest()`]. It is
//! produced by RFC 8785 (JSON Canonicalization Scheme) serialization via
//! `serde_jcs`: sorted object keys, compact separators, one byte sequence
//! per logical value. Two compliance statuses that are equal as data
//! therefore always hash to the same fingerprint.
//!
//! [`sha256_digest()`]: crate::digest::sha256_digest

use serde::Serialize;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// The inner buffer is private; [`CanonicalBytes::new()`] is the sole
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value
    /// cannot be represented as JSON.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let bytes = serde_jcs::to_vec(&value)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
