//! # Expiry Scan
//!
//! Independent of matching, every verified document with an expiry is
//! checked against "now":
//!
//! - **expiring soon**: `now < expires_at <= now + window`
//! - **expired critical**: `expires_at < now` and the document corresponds
//!   to a critical applicable requirement
//!
//! A document corresponds to a requirement if it links to it explicitly,
//! or, when unlinked, if its type is accepted by it. An expiry exactly at
//! "now" is neither expiring nor expired.

use chrono::Duration;

use evops_core::Timestamp;

use crate::document::Document;
use crate::matching::document_matches;
use crate::requirement::RequirementDefinition;
use crate::status::DocumentExpiry;

const SECONDS_PER_DAY: i64 = 86_400;

/// Result of scanning documents for expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpiryScan {
    /// Documents expiring within the window, in input order.
    pub expiring_soon: Vec<DocumentExpiry>,
    /// Expired documents backing critical requirements, in input order.
    pub expired_critical: Vec<DocumentExpiry>,
}

fn describe(document: &Document, expires_at: Timestamp, now: Timestamp) -> DocumentExpiry {
    let seconds = expires_at.signed_duration_since(&now).num_seconds();
    DocumentExpiry {
        document_id: document.id.clone(),
        document_type: document.document_type,
        expires_at,
        days_remaining: seconds.div_euclid(SECONDS_PER_DAY),
    }
}

/// Scan `documents` for expiry relative to `now`.
///
/// `applicable` is the set of applicable requirements; only its critical
/// members make an expired document a blocker.
pub fn scan_expiry(
    documents: &[Document],
    applicable: &[&RequirementDefinition],
    now: Timestamp,
    window_days: u32,
) -> ExpiryScan {
    let window = Duration::seconds(i64::from(window_days) * SECONDS_PER_DAY);
    let mut scan = ExpiryScan::default();

    for document in documents.iter().filter(|d| d.is_verified()) {
        let Some(expires_at) = document.expires_at else {
            continue;
        };
        let remaining = expires_at.signed_duration_since(&now);

        if remaining > Duration::zero() && remaining <= window {
            scan.expiring_soon.push(describe(document, expires_at, now));
        } else if remaining < Duration::zero() {
            let critical = applicable
                .iter()
                .any(|r| r.critical && document_matches(document, r));
            if critical {
                tracing::debug!(document = %document.id, %expires_at, "critical document expired");
                scan.expired_critical.push(describe(document, expires_at, now));
            }
        }
    }

    scan
}
