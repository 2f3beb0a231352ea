//! # evops-api binary
//!
//! Reads `EVOPS_*` configuration, initializes tracing and the Prometheus
//! recorder, and serves the API until interrupted.

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::EnvFilter;

use evops_api::{AppConfig, AppState};
use evops_compliance::ComplianceEvaluator;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("reading EVOPS_* environment")?;
    init_tracing(config.log_json);

    let evaluator_config = config
        .load_evaluator_config()
        .context("loading evaluator configuration")?;
    tracing::info!(
        expiring_window_days = evaluator_config.expiring_window_days,
        unknown_condition_policy = ?evaluator_config.unknown_condition_policy,
        "evaluator configured"
    );

    let mut state = AppState::with_evaluator(ComplianceEvaluator::new(evaluator_config));
    if config.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("installing Prometheus recorder")?;
        state = state.with_metrics(handle);
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, metrics = config.metrics_enabled, "evops-api listening");

    axum::serve(listener, evops_api::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;
    Ok(())
}
