//! # Error Types
//!
//! Structured error hierarchy for construction and I/O boundaries. The
//! evaluator itself never fails; it encodes problems as data in the
//! compliance status. Errors here come from parsing identifiers, timestamps,
//! gate and scope names, and configuration files.

use thiserror::Error;

/// Top-level error type for EVOps compliance.
#[derive(Error, Debug)]
pub enum EvopsError {
    /// An identifier was empty or otherwise malformed.
    #[error("invalid {kind}: {reason}")]
    InvalidIdentifier {
        /// Which identifier type was being constructed.
        kind: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A gate name did not match any known gate.
    #[error("unknown compliance gate: {0:?}")]
    UnknownGate(String),

    /// A requirement scope name did not match any known scope.
    #[error("unknown requirement scope: {0:?}")]
    UnknownScope(String),

    /// A timestamp string could not be parsed or was out of range.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Canonical serialization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Configuration was unreadable or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The value could not be converted to JSON or serialized canonically.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
