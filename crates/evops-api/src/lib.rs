//! # evops-api: Axum API Service for EVOps Compliance
//!
//! Stateless HTTP front for the compliance evaluator. The dashboard posts
//! a provider's documents and receives the gate-by-gate readiness
//! snapshot; it can also fetch the built-in requirement catalogs.
//!
//! ## API Surface
//!
//! | Method | Path                                             | Purpose                    |
//! |--------|--------------------------------------------------|----------------------------|
//! | POST   | `/v1/compliance/evaluate`                        | Evaluate compliance        |
//! | GET    | `/v1/compliance/catalog/{scope}`                 | Requirement catalog        |
//! | GET    | `/v1/compliance/catalog/{scope}/document-types`  | Document type → codes      |
//! | GET    | `/health/liveness`, `/health/readiness`          | Kubernetes probes          |
//! | GET    | `/metrics`                                       | Prometheus scrape          |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! All errors map to structured JSON responses via [`AppError`].

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::header;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Request body limit. A thousand documents fit comfortably below it.
const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// Assemble the application router with all routes and middleware.
///
/// `/metrics` is mounted only when the state carries a Prometheus handle.
pub fn app(state: AppState) -> Router {
    let metrics_on = state.metrics.is_some();

    let mut router = Router::new()
        .merge(routes::compliance::router())
        .merge(routes::health::router())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES));

    if metrics_on {
        router = router
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .route("/metrics", get(prometheus_metrics));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// GET /metrics: Prometheus text exposition.
async fn prometheus_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let handle = state
        .metrics
        .ok_or_else(|| AppError::NotFound("metrics are disabled".into()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
