//! # Application State
//!
//! Shared state for the Axum application and the environment-driven
//! service configuration. The evaluator holds no mutable state, so it is
//! shared behind an `Arc` without locks.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use evops_compliance::{ComplianceEvaluator, EvaluatorConfig};
use evops_core::EvopsError;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Service configuration read from `EVOPS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `EVOPS_BIND_ADDR`.
    pub bind_addr: SocketAddr,
    /// `EVOPS_EVALUATOR_CONFIG`: optional YAML file for [`EvaluatorConfig`].
    pub evaluator_config: Option<PathBuf>,
    /// `EVOPS_METRICS_ENABLED`: anything but `false` enables `/metrics`.
    pub metrics_enabled: bool,
    /// `EVOPS_LOG_JSON`: `1` or `true` switches to JSON log lines.
    pub log_json: bool,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, EvopsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EvopsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("EVOPS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|e| EvopsError::Config(format!("EVOPS_BIND_ADDR {raw_addr:?}: {e}")))?;

        let evaluator_config = lookup("EVOPS_EVALUATOR_CONFIG")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let metrics_enabled = lookup("EVOPS_METRICS_ENABLED")
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let log_json = lookup("EVOPS_LOG_JSON")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            evaluator_config,
            metrics_enabled,
            log_json,
        })
    }

    /// Load the evaluator configuration, or the defaults when no file is set.
    pub fn load_evaluator_config(&self) -> Result<EvaluatorConfig, EvopsError> {
        match &self.evaluator_config {
            Some(path) => EvaluatorConfig::load(path),
            None => Ok(EvaluatorConfig::default()),
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// The compliance evaluator.
    pub evaluator: Arc<ComplianceEvaluator>,
    /// Prometheus handle, present when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// State with a default evaluator and no metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// State around the given evaluator.
    pub fn with_evaluator(evaluator: ComplianceEvaluator) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle, which mounts `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
