//! # Health Probes
//!
//! Kubernetes liveness and readiness probes. Liveness only proves the
//! process answers; readiness also checks the evaluator configuration.

use axum::extract::State;
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Build the health probe router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
}

async fn liveness() -> &'static str {
    "ok"
}

async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.evaluator.config().validate()?;
    Ok("ready")
}
