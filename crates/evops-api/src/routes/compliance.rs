//! # Compliance API
//!
//! - `POST /v1/compliance/evaluate` evaluates a provider's documents
//!   against supplied requirements, or the scope's built-in catalog when
//!   none are supplied.
//! - `GET /v1/compliance/catalog/{scope}` lists a scope's catalog.
//! - `GET /v1/compliance/catalog/{scope}/document-types` lists, per
//!   document type, the requirement codes that accept it.
//!
//! Handlers only validate and delegate; all rules live in evops-compliance.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use evops_compliance::{
    catalog, document_type_index, duplicate_requirement_codes, requirements_or_fallback,
    ComplianceContext, ComplianceStatus, Document, DocumentType, RequirementDefinition,
    RequirementScope,
};
use evops_core::{ProviderId, Timestamp};

use crate::error::AppError;
use crate::extractors::{Validate, ValidatedJson};
use crate::state::AppState;

/// Upper bound on documents per request.
pub const MAX_DOCUMENTS: usize = 1000;
/// Upper bound on supplied requirements per request.
pub const MAX_REQUIREMENTS: usize = 1000;

/// Request body for `POST /v1/compliance/evaluate`.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    pub provider_id: String,
    /// Catalog scope used when `requirements` is empty.
    #[serde(default)]
    pub scope: RequirementScope,
    #[serde(default)]
    pub context: Option<ComplianceContext>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub requirements: Vec<RequirementDefinition>,
    /// Frozen evaluation instant (RFC 3339). Defaults to the server clock.
    #[serde(default)]
    pub now: Option<String>,
}

impl Validate for EvaluateRequest {
    fn validate(&self) -> Result<(), String> {
        if self.provider_id.trim().is_empty() {
            return Err("provider_id must not be empty".into());
        }
        if self.documents.len() > MAX_DOCUMENTS {
            return Err(format!(
                "at most {MAX_DOCUMENTS} documents per request, got {}",
                self.documents.len()
            ));
        }
        if self.requirements.len() > MAX_REQUIREMENTS {
            return Err(format!(
                "at most {MAX_REQUIREMENTS} requirements per request, got {}",
                self.requirements.len()
            ));
        }
        let duplicates = duplicate_requirement_codes(&self.requirements);
        if !duplicates.is_empty() {
            let codes: Vec<&str> = duplicates.iter().map(|c| c.as_str()).collect();
            return Err(format!(
                "requirement codes must be unique, duplicated: {}",
                codes.join(", ")
            ));
        }
        Ok(())
    }
}

/// Response body: the compliance status plus its fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    #[serde(flatten)]
    pub status: ComplianceStatus,
    /// Hex SHA-256 of the canonical status without `evaluated_at`.
    pub fingerprint: String,
}

/// Response body for a scope catalog.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub scope: RequirementScope,
    pub requirements: Vec<RequirementDefinition>,
}

/// Response body for the document type index.
#[derive(Debug, Serialize)]
pub struct DocumentTypeIndexResponse {
    pub scope: RequirementScope,
    pub document_types: BTreeMap<DocumentType, Vec<&'static str>>,
}

/// Build the compliance router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/compliance/evaluate", post(evaluate))
        .route("/v1/compliance/catalog/{scope}", get(get_catalog))
        .route(
            "/v1/compliance/catalog/{scope}/document-types",
            get(get_document_types),
        )
}

async fn evaluate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let provider_id = ProviderId::new(&request.provider_id)?;
    let now = match request.now.as_deref() {
        Some(raw) => Timestamp::parse_lenient(raw)?,
        None => Timestamp::now(),
    };
    let requirements = requirements_or_fallback(request.scope, request.requirements);

    let status = state.evaluator.evaluate_at(
        &provider_id,
        request.context.as_ref(),
        &request.documents,
        &requirements,
        now,
    );
    let fingerprint = status.fingerprint()?;

    metrics::counter!(
        "evops_compliance_evaluations_total",
        "overall" => status.overall.as_str()
    )
    .increment(1);

    Ok(Json(EvaluateResponse {
        status,
        fingerprint: fingerprint.to_hex(),
    }))
}

async fn get_catalog(Path(scope): Path<String>) -> Result<Json<CatalogResponse>, AppError> {
    let scope: RequirementScope = scope.parse()?;
    Ok(Json(CatalogResponse {
        scope,
        requirements: catalog(scope),
    }))
}

async fn get_document_types(
    Path(scope): Path<String>,
) -> Result<Json<DocumentTypeIndexResponse>, AppError> {
    let scope: RequirementScope = scope.parse()?;
    Ok(Json(DocumentTypeIndexResponse {
        scope,
        document_types: document_type_index(scope),
    }))
}
