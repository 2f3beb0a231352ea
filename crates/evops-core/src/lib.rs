//! # evops-core: Foundational Types for EVOps Compliance
//!
//! Defines the type-system primitives shared by the compliance evaluator,
//! the HTTP service, and the CLI. Every other crate in the workspace depends
//! on `evops-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Single `Gate` enum.** KYB, SAFETY, OPERATIONS, INTEGRATION: one
//!    definition with a fixed canonical order, exhaustive `match` everywhere.
//!
//! 2. **Newtype identifiers.** `ProviderId`, `DocumentId`, `RequirementCode`
//!    are validated at construction. No bare strings cross crate boundaries.
//!
//! 3. **UTC-only timestamps.** `Timestamp` is UTC with seconds precision so
//!    that expiry arithmetic and serialized output are deterministic.
//!
//! 4. **`CanonicalBytes` for digests.** Status fingerprints are computed over
//!    RFC 8785 canonical JSON, never over ad-hoc `serde_json::to_vec()` output.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `evops-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod gate;
pub mod identity;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::EvopsError;
pub use gate::{Gate, GATE_COUNT};
pub use identity::{DocumentId, ProviderId, RequirementCode};
pub use temporal::Timestamp;
