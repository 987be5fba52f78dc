//! Assess a single observation

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tokio::io::AsyncReadExt;

use super::{evaluate, KindArg};
use crate::output::format_report;
use crate::AppContext;
use apiary_core::Summary;

#[derive(Args)]
pub struct AssessArgs {
    /// Kind of observation
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Observation file (JSON), or `-` for stdin
    pub file: PathBuf,
}

/// Read a whole observation file, or stdin for `-`
pub async fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .context("Failed to read observation from stdin")?;
        return Ok(raw);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

pub async fn run(args: &AssessArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let raw = read_input(&args.file).await?;
    let kind = args.kind.into();
    tracing::debug!("Assessing {} observation from {}", kind, args.file.display());

    let mut summary = Summary::new();
    let report = evaluate(kind, &raw, &mut summary)?;
    match &report {
        Some(r) => tracing::info!("Assessed {}: {} ({})", kind, r.status, r.score),
        None => tracing::info!("{} observation has nothing to score", kind),
    }

    println!("{}", format_report(report.as_ref(), ctx.format));
    Ok(())
}
