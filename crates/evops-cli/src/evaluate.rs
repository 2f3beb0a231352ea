//! # Evaluate Subcommand
//!
//! Evaluates fixture files offline and prints the compliance status as
//! JSON.
//!
//! ```bash
//! evops evaluate --provider-id swapnet-ke --documents docs.yaml \
//!     --context context.yaml --now 2026-10-19T00:00:00Z --fingerprint
//! ```
//!
//! Exit code 0 for READY and WARN, 2 for BLOCKED.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use evops_compliance::{
    duplicate_requirement_codes, requirements_or_fallback, ComplianceContext, ComplianceEvaluator,
    ComplianceStatus, Document, EvaluatorConfig, OverallState, RequirementDefinition,
    RequirementScope,
};
use evops_core::{ProviderId, Timestamp};

use crate::input::load_file;

/// Exit code for a BLOCKED result.
pub const EXIT_BLOCKED: u8 = 2;

/// Arguments for the evaluate subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Provider or station owner being evaluated.
    #[arg(long)]
    pub provider_id: String,

    /// Documents file (JSON or YAML list).
    #[arg(long)]
    pub documents: PathBuf,

    /// Requirements file. Omit to use the scope's built-in catalog.
    #[arg(long)]
    pub requirements: Option<PathBuf>,

    /// Provider context file (countries, regions, standard, capabilities).
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Catalog scope used when no requirements file is given.
    #[arg(long, default_value = "provider")]
    pub scope: RequirementScope,

    /// Frozen evaluation instant (RFC 3339). Defaults to the current time.
    #[arg(long)]
    pub now: Option<String>,

    /// Evaluator configuration (YAML).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Include the status fingerprint in the output.
    #[arg(long)]
    pub fingerprint: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    #[serde(flatten)]
    status: &'a ComplianceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<String>,
}

/// Execute the evaluate subcommand, writing JSON to `out`.
pub fn run_evaluate(args: &EvaluateArgs, out: &mut dyn Write) -> Result<u8> {
    let provider_id = ProviderId::new(&args.provider_id)?;

    let config = match &args.config {
        Some(path) => EvaluatorConfig::load(path)
            .with_context(|| format!("loading evaluator config {}", path.display()))?,
        None => EvaluatorConfig::default(),
    };

    let documents: Vec<Document> = load_file(&args.documents)?;
    let supplied: Vec<RequirementDefinition> = match &args.requirements {
        Some(path) => load_file(path)?,
        None => Vec::new(),
    };
    let duplicates = duplicate_requirement_codes(&supplied);
    if !duplicates.is_empty() {
        let codes: Vec<&str> = duplicates.iter().map(|c| c.as_str()).collect();
        anyhow::bail!(
            "requirement codes must be unique, duplicated: {}",
            codes.join(", ")
        );
    }
    let requirements = requirements_or_fallback(args.scope, supplied);
    let context: Option<ComplianceContext> = match &args.context {
        Some(path) => Some(load_file(path)?),
        None => None,
    };
    let now = match args.now.as_deref() {
        Some(raw) => Timestamp::parse_lenient(raw).context("parsing --now")?,
        None => Timestamp::now(),
    };

    let status = ComplianceEvaluator::new(config).evaluate_at(
        &provider_id,
        context.as_ref(),
        &documents,
        &requirements,
        now,
    );

    let fingerprint = if args.fingerprint {
        Some(status.fingerprint()?.to_hex())
    } else {
        None
    };
    let output = Output {
        status: &status,
        fingerprint,
    };
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)?;

    Ok(match status.overall {
        OverallState::Blocked => EXIT_BLOCKED,
        OverallState::Warn | OverallState::Ready => 0,
    })
}
