//! # Catalog Subcommand
//!
//! Prints a scope's built-in requirement catalog, or the derived index of
//! which requirement codes accept each document type.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use evops_compliance::catalog::duplicate_codes;
use evops_compliance::{catalog, document_type_index, RequirementScope};

/// Arguments for the catalog subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Catalog scope: provider or station-owner.
    #[arg(long, default_value = "provider")]
    pub scope: RequirementScope,

    /// Print the document type → requirement codes index instead.
    #[arg(long)]
    pub by_document_type: bool,
}

/// Execute the catalog subcommand, writing JSON to `out`.
pub fn run_catalog(args: &CatalogArgs, out: &mut dyn Write) -> Result<u8> {
    let duplicates = duplicate_codes(args.scope);
    if !duplicates.is_empty() {
        anyhow::bail!("catalog {} has duplicate codes: {duplicates:?}", args.scope);
    }

    if args.by_document_type {
        serde_json::to_writer_pretty(&mut *out, &document_type_index(args.scope))?;
    } else {
        serde_json::to_writer_pretty(&mut *out, &catalog(args.scope))?;
    }
    writeln!(out)?;
    Ok(0)
}
