//! # Integration Tests for evops-api
//!
//! Drives the assembled router: health probes, the metrics endpoint, and
//! end-to-end compliance evaluation with context and expiry.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use tower::ServiceExt;

use evops_api::routes::compliance::EvaluateResponse;
use evops_api::AppState;
use evops_compliance::{ComplianceEvaluator, EvaluatorConfig, GateState, OverallState};
use evops_core::Gate;

fn test_app() -> axum::Router {
    evops_api::app(AppState::new())
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(app: axum::Router, uri: &str) -> axum::http::Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn evaluate(app: axum::Router, body: serde_json::Value) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/compliance/evaluate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_string(response).await)
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn liveness_probe() {
    let response = get(test_app(), "/health/liveness").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn readiness_probe() {
    let response = get(test_app(), "/health/readiness").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn readiness_fails_on_invalid_evaluator_config() {
    let config = EvaluatorConfig {
        expiring_window_days: 0,
        ..Default::default()
    };
    let app = evops_api::app(AppState::with_evaluator(ComplianceEvaluator::new(config)));
    let response = get(app, "/health/readiness").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// -- Metrics ------------------------------------------------------------------

#[tokio::test]
async fn metrics_not_mounted_without_recorder() {
    let response = get(test_app(), "/metrics").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_mounted_with_recorder() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let app = evops_api::app(AppState::new().with_metrics(recorder.handle()));
    let response = get(app, "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
}

// -- Evaluation ---------------------------------------------------------------

#[tokio::test]
async fn cross_border_provider_needs_hazmat_permit() {
    let body = serde_json::json!({
        "provider_id": "swapnet-ke",
        "now": "2026-10-19T00:00:00Z",
        "context": { "countries": ["KE", "UG"], "regions": ["Nairobi"] },
        "documents": [
            { "id": "d1", "document_type": "INCORPORATION", "verification_state": "VERIFIED" }
        ]
    });
    let (status, text) = evaluate(test_app(), body).await;
    assert_eq!(status, StatusCode::OK, "{text}");
    let parsed: EvaluateResponse = serde_json::from_str(&text).unwrap();

    let safety = parsed.status.gate(Gate::Safety).unwrap();
    assert_eq!(safety.status, GateState::Blocked);
    assert!(safety
        .missing_critical
        .iter()
        .any(|c| c.as_str() == "PRV_SAFETY_HAZMAT_SHIPPING"));
    assert_eq!(parsed.status.overall, OverallState::Blocked);
    assert_eq!(parsed.status.gate(Gate::Kyb).unwrap().critical_met, 1);
}

#[tokio::test]
async fn expired_critical_document_blocks() {
    let body = serde_json::json!({
        "provider_id": "p",
        "now": "2026-10-19T00:00:00Z",
        "requirements": [{
            "code": "PRV_SAFETY_INSURANCE",
            "title": "Public liability insurance",
            "gate": "SAFETY",
            "critical": true,
            "accepted_document_types": ["LIABILITY_INSURANCE"]
        }],
        "documents": [{
            "id": "ins-2025",
            "document_type": "LIABILITY_INSURANCE",
            "status": "APPROVED",
            "expires_at": "2026-10-01"
        }]
    });
    let (status, text) = evaluate(test_app(), body).await;
    assert_eq!(status, StatusCode::OK, "{text}");
    let parsed: EvaluateResponse = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.status.overall, OverallState::Blocked);
    assert_eq!(
        parsed.status.blockers,
        vec!["DOC_EXPIRED_CRITICAL:ins-2025".to_string()]
    );
    assert_eq!(parsed.status.expired_critical[0].days_remaining, -18);
}

#[tokio::test]
async fn same_request_same_fingerprint() {
    let body = serde_json::json!({
        "provider_id": "p",
        "now": "2026-10-19T00:00:00Z",
        "documents": [
            { "id": "a", "document_type": "TAX_REGISTRATION", "verification_state": "VERIFIED" },
            { "id": "b", "document_type": "SITE_LEASE", "verification_state": "VERIFIED",
              "expires_at": "2026-11-01T00:00:00Z" }
        ]
    });
    let (_, first) = evaluate(test_app(), body.clone()).await;
    let (_, second) = evaluate(test_app(), body).await;
    let first: EvaluateResponse = serde_json::from_str(&first).unwrap();
    let second: EvaluateResponse = serde_json::from_str(&second).unwrap();
    assert_eq!(first.fingerprint, second.fingerprint);
}

#[tokio::test]
async fn unknown_document_type_is_accepted_as_other() {
    let body = serde_json::json!({
        "provider_id": "p",
        "documents": [
            { "id": "x", "document_type": "DRONE_LICENSE", "verification_state": "VERIFIED" }
        ]
    });
    let (status, _) = evaluate(test_app(), body).await;
    assert_eq!(status, StatusCode::OK);
}
