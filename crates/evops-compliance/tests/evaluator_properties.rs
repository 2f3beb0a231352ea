//! # Evaluator Properties
//!
//! End-to-end behavior of the compliance evaluator over generated
//! requirement and document sets, plus the fixed fixtures the dashboard
//! relies on.

use std::collections::{BTreeSet, HashSet};

use chrono::Duration;
use proptest::prelude::*;

use evops_compliance::{
    catalog, ComplianceContext, ComplianceEvaluator, Condition, Document, DocumentType,
    Expectation, GateState, OverallState, RequirementDefinition, RequirementScope,
    VerificationState,
};
use evops_core::{DocumentId, Gate, ProviderId, RequirementCode, Timestamp};

fn frozen_now() -> Timestamp {
    Timestamp::parse("2026-10-19T08:00:00Z").unwrap()
}

fn provider() -> ProviderId {
    ProviderId::new("provider-under-test").unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[test]
fn incorporation_document_satisfies_prv_corp_incorp() {
    let requirement = RequirementDefinition {
        code: RequirementCode::new("PRV_CORP_INCORP").unwrap(),
        title: "Certificate of incorporation".into(),
        gate: Gate::Kyb,
        category: "corporate".into(),
        critical: true,
        accepted_document_types: [DocumentType::Incorporation].into_iter().collect(),
        scope: RequirementScope::Provider,
        conditions: vec![],
    };
    let document = Document::new(DocumentId::new("doc-incorp").unwrap(), DocumentType::Incorporation)
        .verified();

    let status = ComplianceEvaluator::default().evaluate_at(
        &provider(),
        None,
        &[document],
        &[requirement],
        frozen_now(),
    );

    let kyb = status.gate(Gate::Kyb).unwrap();
    assert_eq!(kyb.status, GateState::Pass);
    assert_eq!(kyb.critical_met, 1);
    assert_eq!(
        kyb.requirements[0].satisfied_by.as_ref().map(|d| d.as_str()),
        Some("doc-incorp")
    );
    // Nothing else is required, so the result depends on this one alone.
    assert_eq!(status.overall, OverallState::Ready);
}

#[test]
fn cross_border_requirement_skipped_for_one_country_and_region() {
    let requirements = catalog(RequirementScope::Provider);
    let domestic = ComplianceContext {
        countries: vec!["KE".into()],
        regions: vec!["Nairobi".into()],
        ..Default::default()
    };
    let status = ComplianceEvaluator::default().evaluate_at(
        &provider(),
        Some(&domestic),
        &[],
        &requirements,
        frozen_now(),
    );
    let safety = status.gate(Gate::Safety).unwrap();
    assert!(safety
        .requirements
        .iter()
        .all(|r| r.code.as_str() != "PRV_SAFETY_HAZMAT_SHIPPING"));
}

#[test]
fn expiry_boundary_thirty_days() {
    let now = frozen_now();
    let make = |id: &str, delta: Duration| {
        Document::new(DocumentId::new(id).unwrap(), DocumentType::LiabilityInsurance)
            .verified()
            .expiring_at(now.checked_add(delta).unwrap())
    };
    let documents = vec![
        make("outside", Duration::days(30) + Duration::seconds(1)),
        make("inside", Duration::days(29)),
    ];
    let status = ComplianceEvaluator::default().evaluate_at(&provider(), None, &documents, &[], now);
    let ids: Vec<&str> = status
        .expiring_soon
        .iter()
        .map(|e| e.document_id.as_str())
        .collect();
    assert_eq!(ids, vec!["inside"]);
    assert_eq!(status.overall, OverallState::Warn);
}

#[test]
fn full_provider_catalog_all_documents_present_is_ready() {
    let requirements = catalog(RequirementScope::Provider);
    let context = ComplianceContext {
        countries: vec!["KE".into(), "UG".into()],
        standard: Some("UNIVERSAL".into()),
        ..Default::default()
    };
    let documents: Vec<Document> = requirements
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let t = *r.accepted_document_types.iter().next().unwrap();
            Document::new(DocumentId::new(format!("doc-{i}")).unwrap(), t).verified()
        })
        .collect();

    let status = ComplianceEvaluator::default().evaluate_at(
        &provider(),
        Some(&context),
        &documents,
        &requirements,
        frozen_now(),
    );
    assert_eq!(status.overall, OverallState::Ready, "{:?}", status.blockers);
    let total: usize = status.gates.iter().map(|g| g.required).sum();
    assert_eq!(total, requirements.len());
}

#[test]
fn legacy_approved_status_counts_as_verified() {
    let requirements = vec![RequirementDefinition {
        code: RequirementCode::new("STO_SITE_LEASE").unwrap(),
        title: "Site lease".into(),
        gate: Gate::Operations,
        category: String::new(),
        critical: true,
        accepted_document_types: [DocumentType::SiteLease].into_iter().collect(),
        scope: RequirementScope::StationOwner,
        conditions: vec![],
    }];
    let mut legacy = Document::new(DocumentId::new("lease").unwrap(), DocumentType::SiteLease);
    legacy.status = Some("APPROVED".into());
    let status = ComplianceEvaluator::default().evaluate_at(
        &provider(),
        None,
        &[legacy],
        &requirements,
        frozen_now(),
    );
    assert_eq!(status.overall, OverallState::Ready);
}

#[test]
fn status_json_shape() {
    let status = ComplianceEvaluator::default().evaluate_at(
        &provider(),
        None,
        &[],
        &catalog(RequirementScope::StationOwner),
        frozen_now(),
    );
    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["provider_id"], "provider-under-test");
    assert_eq!(json["evaluated_at"], "2026-10-19T08:00:00Z");
    assert_eq!(json["overall"], "BLOCKED");
    let gates: Vec<&str> = json["gates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["gate"].as_str().unwrap())
        .collect();
    assert_eq!(gates, vec!["KYB", "SAFETY", "OPERATIONS", "INTEGRATION"]);
    assert!(json["blockers"]
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b == "MISSING_STO_CORP_INCORP"));
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn gate_strategy() -> impl Strategy<Value = Gate> {
    prop_oneof![
        Just(Gate::Kyb),
        Just(Gate::Safety),
        Just(Gate::Operations),
        Just(Gate::Integration),
    ]
}

/// A small pool of types so that collisions between requirements are common.
fn doc_type_strategy() -> impl Strategy<Value = DocumentType> {
    prop_oneof![
        Just(DocumentType::Incorporation),
        Just(DocumentType::TaxRegistration),
        Just(DocumentType::LiabilityInsurance),
        Just(DocumentType::SiteLease),
    ]
}

fn condition_strategy() -> impl Strategy<Value = Vec<Condition>> {
    prop::collection::vec(
        prop_oneof![
            any::<bool>().prop_map(|b| Condition::CrossBorderShipping(Expectation::Equals(b))),
            any::<bool>().prop_map(|b| Condition::SupportsInteroperability(Expectation::Equals(b))),
        ],
        0..2,
    )
}

fn requirements_strategy() -> impl Strategy<Value = Vec<RequirementDefinition>> {
    prop::collection::vec(
        (
            gate_strategy(),
            any::<bool>(),
            prop::collection::btree_set(doc_type_strategy(), 1..3),
            "[a-z]{1,6}",
            condition_strategy(),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (gate, critical, accepted, title, conditions))| RequirementDefinition {
                code: RequirementCode::new(format!("REQ_{i}")).unwrap(),
                title,
                gate,
                category: String::new(),
                critical,
                accepted_document_types: accepted,
                scope: RequirementScope::Provider,
                conditions,
            })
            .collect()
    })
}

fn verification_strategy() -> impl Strategy<Value = VerificationState> {
    prop_oneof![
        3 => Just(VerificationState::Verified),
        1 => Just(VerificationState::Unverified),
        1 => Just(VerificationState::Rejected),
    ]
}

fn documents_strategy() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec(
        (
            doc_type_strategy(),
            verification_strategy(),
            prop::option::of(0usize..12),
            prop::option::of(-90i64..90),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (t, state, link, expiry_days))| {
                let mut doc = Document::new(DocumentId::new(format!("doc-{i}")).unwrap(), t);
                doc.verification_state = Some(state);
                doc.requirement_code =
                    link.map(|n| RequirementCode::new(format!("REQ_{n}")).unwrap());
                doc.expires_at = expiry_days.and_then(|d| frozen_now().checked_add_days(d));
                doc
            })
            .collect()
    })
}

fn context_strategy() -> impl Strategy<Value = Option<ComplianceContext>> {
    prop::option::of(
        (1usize..3, 1usize..3, any::<bool>()).prop_map(|(countries, regions, universal)| {
            ComplianceContext {
                countries: (0..countries).map(|i| format!("C{i}")).collect(),
                regions: (0..regions).map(|i| format!("R{i}")).collect(),
                standard: universal.then(|| "UNIVERSAL".to_string()),
                protocol_capabilities: vec![],
            }
        }),
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn each_document_satisfies_at_most_one_requirement(
        requirements in requirements_strategy(),
        documents in documents_strategy(),
        context in context_strategy(),
    ) {
        let status = ComplianceEvaluator::default().evaluate_at(
            &provider(), context.as_ref(), &documents, &requirements, frozen_now(),
        );
        let mut seen = HashSet::new();
        for gate in &status.gates {
            for outcome in &gate.requirements {
                if let Some(doc) = &outcome.satisfied_by {
                    prop_assert!(seen.insert(doc.clone()), "{} used twice", doc);
                    let source = documents.iter().find(|d| &d.id == doc).unwrap();
                    prop_assert!(source.is_verified());
                }
            }
        }
    }

    #[test]
    fn gates_always_in_canonical_order(
        requirements in requirements_strategy(),
        documents in documents_strategy(),
    ) {
        let status = ComplianceEvaluator::default().evaluate_at(
            &provider(), None, &documents, &requirements, frozen_now(),
        );
        let gates: Vec<Gate> = status.gates.iter().map(|g| g.gate).collect();
        prop_assert_eq!(gates, Gate::all().to_vec());
    }

    #[test]
    fn unmet_critical_blocks_gate_and_overall(
        requirements in requirements_strategy(),
        documents in documents_strategy(),
        context in context_strategy(),
    ) {
        let status = ComplianceEvaluator::default().evaluate_at(
            &provider(), context.as_ref(), &documents, &requirements, frozen_now(),
        );
        for gate in &status.gates {
            let unmet_critical = gate.requirements.iter().any(|r| r.critical && !r.is_met());
            prop_assert_eq!(unmet_critical, gate.status == GateState::Blocked);
            if unmet_critical {
                prop_assert_eq!(status.overall, OverallState::Blocked);
            }
        }
    }

    #[test]
    fn only_recommended_missing_is_warn(
        requirements in requirements_strategy(),
        documents in documents_strategy(),
    ) {
        let status = ComplianceEvaluator::default().evaluate_at(
            &provider(), None, &documents, &requirements, frozen_now(),
        );
        if status.missing_critical.is_empty()
            && status.expired_critical.is_empty()
            && !status.missing_recommended.is_empty()
        {
            prop_assert_eq!(status.overall, OverallState::Warn);
        }
    }

    #[test]
    fn within_gate_critical_precedes_recommended_then_title(
        requirements in requirements_strategy(),
    ) {
        let status = ComplianceEvaluator::default().evaluate_at(
            &provider(), None, &[], &requirements, frozen_now(),
        );
        for gate in &status.gates {
            let keys: Vec<(bool, String)> = gate
                .requirements
                .iter()
                .map(|r| (!r.critical, r.title.clone()))
                .collect();
            let mut sorted = keys.clone();
            sorted.sort();
            prop_assert_eq!(keys, sorted);
        }
    }

    #[test]
    fn blockers_match_missing_and_expired(
        requirements in requirements_strategy(),
        documents in documents_strategy(),
        context in context_strategy(),
    ) {
        let status = ComplianceEvaluator::default().evaluate_at(
            &provider(), context.as_ref(), &documents, &requirements, frozen_now(),
        );
        let expected: Vec<String> = status
            .missing_critical
            .iter()
            .map(|c| format!("MISSING_{c}"))
            .chain(status.expired_critical.iter().map(|e| format!("DOC_EXPIRED_CRITICAL:{}", e.document_id)))
            .collect();
        prop_assert_eq!(&status.blockers, &expected);
        prop_assert_eq!(status.overall == OverallState::Blocked, !status.blockers.is_empty());
    }

    #[test]
    fn evaluation_is_idempotent(
        requirements in requirements_strategy(),
        documents in documents_strategy(),
        context in context_strategy(),
    ) {
        let evaluator = ComplianceEvaluator::default();
        let a = evaluator.evaluate_at(&provider(), context.as_ref(), &documents, &requirements, frozen_now());
        let b = evaluator.evaluate_at(&provider(), context.as_ref(), &documents, &requirements, frozen_now());
        prop_assert_eq!(serde_json::to_vec(&a).unwrap(), serde_json::to_vec(&b).unwrap());
        prop_assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn requirement_input_order_does_not_change_outcome_sets(
        requirements in requirements_strategy(),
        documents in documents_strategy(),
    ) {
        let mut reversed = requirements.clone();
        reversed.reverse();
        let evaluator = ComplianceEvaluator::default();
        let a = evaluator.evaluate_at(&provider(), None, &documents, &requirements, frozen_now());
        let b = evaluator.evaluate_at(&provider(), None, &documents, &reversed, frozen_now());
        // Evaluation order is a total order on requirements, so input order is irrelevant.
        let missing = |s: &evops_compliance::ComplianceStatus| {
            s.missing_critical.iter().chain(&s.missing_recommended).cloned().collect::<BTreeSet<_>>()
        };
        prop_assert_eq!(missing(&a), missing(&b));
        prop_assert_eq!(a.overall, b.overall);
    }
}
